use std::path::Path;

use geometry::Point;
use network::{Network, Step, TrainingSession};
use patterns::{PatternDefinition, PatternError, PatternSet};
use rand::rngs::StdRng;
use rand::SeedableRng;
use scoring::RecognitionResult;

use crate::{RecognitionError, Recognizer, RecognizerConfig};

/// Everything a host needs to recognize and train: the pattern set, the
/// current classifier and the configuration.
///
/// A training run owns its own fresh network until it completes, at which
/// point it replaces the current classifier. While a run is active, network
/// recognition is refused.
pub struct RecognitionContext {
    patterns: PatternSet,
    network: Option<Network>,
    session: Option<TrainingSession>,
    config: RecognizerConfig,
    seed: Option<u64>,
}

impl RecognitionContext {
    pub fn new(config: RecognizerConfig) -> Self {
        Self {
            patterns: PatternSet::new(),
            network: None,
            session: None,
            config,
            seed: None,
        }
    }

    /// Makes weight initialization and shuffling reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn config(&self) -> &RecognizerConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut RecognizerConfig {
        &mut self.config
    }

    pub fn patterns(&self) -> &PatternSet {
        &self.patterns
    }

    pub fn patterns_mut(&mut self) -> &mut PatternSet {
        &mut self.patterns
    }

    pub fn network(&self) -> Option<&Network> {
        self.network.as_ref()
    }

    pub fn install(&mut self, network: Network) {
        log::info!("Installed classifier for {}", network.labels().join(", "));
        self.network = Some(network);
    }

    pub fn recognizer(&self) -> Recognizer {
        Recognizer::from_config(&self.config)
    }

    /// Adds a stroke as a new pattern, normalized to the configured sampling factor.
    pub fn add_pattern(&mut self, name: &str, points: Vec<Point>) -> Result<(), RecognitionError> {
        let pattern =
            PatternDefinition::normalized(name, points, self.config.sampling_factor.value)?;
        self.patterns.insert(pattern)?;
        Ok(())
    }

    pub fn recognize(&mut self, points: &[Point]) -> Result<RecognitionResult, RecognitionError> {
        let recognizer = self.recognizer();
        recognizer.recognize(points, self.ready_network()?)
    }

    pub fn matches(
        &mut self,
        points: &[Point],
        label: &str,
        threshold: f32,
    ) -> Result<bool, RecognitionError> {
        let recognizer = self.recognizer();
        recognizer.matches(points, self.ready_network()?, label, threshold)
    }

    pub fn compare(
        &self,
        template: &str,
        points: Vec<Point>,
    ) -> Result<RecognitionResult, RecognitionError> {
        let template = self
            .patterns
            .get(template)
            .ok_or_else(|| PatternError::UnknownLabel(template.to_string()))?;
        let candidate = PatternDefinition::new("candidate", points, template.sampling_factor())?;

        self.recognizer().compare(&candidate, template)
    }

    pub fn recognize_heuristic(
        &self,
        points: &[Point],
    ) -> Result<RecognitionResult, RecognitionError> {
        self.recognizer()
            .recognize_heuristic(points, self.patterns.as_slice())
    }

    /// Starts a training run on the named patterns, or all of them.
    ///
    /// Patterns are re-simplified to the configured sampling factor and a
    /// fresh network is sized for them. Nothing changes if this fails.
    pub fn begin_training<S: AsRef<str>>(
        &mut self,
        names: &[S],
        epochs: Option<usize>,
    ) -> Result<(), RecognitionError> {
        if self.session.is_some() {
            return Err(RecognitionError::TrainingInProgress);
        }

        let sampling_factor = self.config.sampling_factor.value;
        let mut patterns = if names.is_empty() {
            self.patterns.as_slice().to_vec()
        } else {
            self.patterns.select(names)?
        };
        for pattern in &mut patterns {
            pattern.simplify_to(sampling_factor)?;
        }

        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let network = Network::for_patterns(
            &patterns,
            sampling_factor,
            self.config.hyperparameters(),
            &mut rng,
        )?;

        let epochs = epochs.unwrap_or(self.config.epochs.value);
        self.session = Some(TrainingSession::new(network, &patterns, epochs, rng)?);
        Ok(())
    }

    pub fn is_training(&self) -> bool {
        self.session.is_some()
    }

    /// Current epoch and total of the active run.
    pub fn training_progress(&self) -> Option<(usize, usize)> {
        self.session
            .as_ref()
            .map(|s| (s.epoch(), s.total_epochs()))
    }

    /// Runs one epoch of the active run. A finished run replaces the current classifier.
    pub fn step_training(&mut self) -> Option<Step> {
        let step = self.session.as_mut()?.step();

        if step == Step::Done {
            if let Some(session) = self.session.take() {
                self.install(session.into_network());
            }
        }
        Some(step)
    }

    /// Drops the active run at its epoch boundary, keeping the previous classifier.
    pub fn cancel_training(&mut self) -> Option<(usize, usize)> {
        let session = self.session.take()?;
        log::info!(
            "Training cancelled at epoch {}/{}",
            session.epoch(),
            session.total_epochs()
        );
        Some((session.epoch(), session.total_epochs()))
    }

    pub fn load_patterns(&mut self, path: &Path) -> Result<(), RecognitionError> {
        self.patterns = PatternSet::load(path)?;
        Ok(())
    }

    pub fn save_patterns(&self, path: &Path) -> Result<(), RecognitionError> {
        self.patterns.save(path)?;
        Ok(())
    }

    pub fn load_classifier(&mut self, path: &Path) -> Result<(), RecognitionError> {
        if self.session.is_some() {
            return Err(RecognitionError::TrainingInProgress);
        }
        let network = Network::load(path)?;
        self.install(network);
        Ok(())
    }

    pub fn save_classifier(&self, path: &Path) -> Result<(), RecognitionError> {
        let network = self.network.as_ref().ok_or(RecognitionError::NotTrained)?;
        network.save(path)?;
        Ok(())
    }

    fn ready_network(&mut self) -> Result<&mut Network, RecognitionError> {
        if self.session.is_some() {
            return Err(RecognitionError::TrainingInProgress);
        }
        self.network.as_mut().ok_or(RecognitionError::NotTrained)
    }
}

impl Default for RecognitionContext {
    fn default() -> Self {
        Self::new(RecognizerConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stroke(dx: f32, dy: f32) -> Vec<Point> {
        (0..11)
            .map(|i| Point::new(i as f32 * dx, i as f32 * dy))
            .collect()
    }

    fn context() -> RecognitionContext {
        let mut config = RecognizerConfig::default();
        config.update_from_protocol("LearningRate", "0.2").unwrap();
        config.update_from_protocol("ElasticSigmoid", "1").unwrap();
        config.update_from_protocol("LearningRateDecay", "0.9999").unwrap();

        let mut context = RecognitionContext::new(config).with_seed(17);
        context.add_pattern("horizontal", stroke(10.0, 0.0)).unwrap();
        context.add_pattern("vertical", stroke(0.0, 10.0)).unwrap();
        context.add_pattern("diagonal", stroke(10.0, 10.0)).unwrap();
        context
    }

    fn train(context: &mut RecognitionContext, epochs: usize) {
        context.begin_training::<&str>(&[], Some(epochs)).unwrap();
        while context.step_training() != Some(Step::Done) {}
    }

    #[test]
    fn test_patterns_are_normalized_on_insert() {
        let context = context();
        let pattern = context.patterns().get("diagonal").unwrap();
        assert_eq!(pattern.points().len(), 20);
    }

    #[test]
    fn test_duplicate_pattern() {
        let mut context = context();
        assert!(matches!(
            context.add_pattern("vertical", stroke(0.0, 1.0)),
            Err(RecognitionError::Pattern(PatternError::DuplicateLabel(_)))
        ));
    }

    #[test]
    fn test_recognize_needs_a_classifier() {
        let mut context = context();
        assert!(matches!(
            context.recognize(&stroke(1.0, 0.0)),
            Err(RecognitionError::NotTrained)
        ));
    }

    #[test]
    fn test_train_then_recognize() {
        let mut context = context();
        train(&mut context, 2000);

        assert!(!context.is_training());
        let result = context.recognize(&stroke(4.0, 4.0)).unwrap();
        assert_eq!(result.label, "diagonal");
        assert!(context.matches(&stroke(0.0, 2.0), "vertical", 0.8).unwrap());
    }

    #[test]
    fn test_recognition_refused_while_training() {
        let mut context = context();
        train(&mut context, 5);

        context.begin_training::<&str>(&[], Some(10)).unwrap();
        context.step_training();

        assert!(matches!(
            context.recognize(&stroke(1.0, 0.0)),
            Err(RecognitionError::TrainingInProgress)
        ));
        assert!(matches!(
            context.begin_training::<&str>(&[], None),
            Err(RecognitionError::TrainingInProgress)
        ));
    }

    #[test]
    fn test_cancel_keeps_previous_classifier() {
        let mut context = context();
        train(&mut context, 5);
        let before = context.network().cloned();

        context.begin_training(&["vertical", "horizontal"], Some(50)).unwrap();
        context.step_training();
        context.step_training();

        assert_eq!(context.training_progress(), Some((2, 50)));
        assert_eq!(context.cancel_training(), Some((2, 50)));
        assert_eq!(context.network().cloned(), before);
        assert!(context.recognize(&stroke(1.0, 0.0)).is_ok());
    }

    #[test]
    fn test_training_subset_sets_labels() {
        let mut context = context();
        context.begin_training(&["vertical", "horizontal"], Some(3)).unwrap();
        while context.step_training() != Some(Step::Done) {}

        let labels = context.network().unwrap().labels();
        assert_eq!(labels, ["vertical", "horizontal"].map(String::from));
    }

    #[test]
    fn test_unknown_training_name_changes_nothing() {
        let mut context = context();
        assert!(matches!(
            context.begin_training(&["circle"], None),
            Err(RecognitionError::Pattern(PatternError::UnknownLabel(_)))
        ));
        assert!(!context.is_training());
    }

    #[test]
    fn test_compare_against_stored_pattern() {
        let context = context();

        let result = context.compare("horizontal", stroke(2.0, 0.0)).unwrap();
        assert_eq!(result.label, "horizontal");
        assert!(result.success);

        assert!(context.compare("circle", stroke(2.0, 0.0)).is_err());
    }

    #[test]
    fn test_documents_round_trip() {
        let mut context = context();
        train(&mut context, 20);

        let dir = tempfile::tempdir().unwrap();
        let patterns = dir.path().join("patterns.json");
        let classifier = dir.path().join("classifier.json");
        context.save_patterns(&patterns).unwrap();
        context.save_classifier(&classifier).unwrap();

        let mut restored = RecognitionContext::default();
        restored.load_patterns(&patterns).unwrap();
        restored.load_classifier(&classifier).unwrap();

        assert_eq!(restored.patterns().len(), 3);
        assert_eq!(restored.network(), context.network());
    }

    #[test]
    fn test_save_without_classifier() {
        let context = context();
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            context.save_classifier(&dir.path().join("x.json")),
            Err(RecognitionError::NotTrained)
        ));
    }
}
