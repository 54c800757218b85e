use geometry::{simplify, transform, Point};
use network::Network;
use patterns::{PatternDefinition, PatternError};
use rayon::prelude::*;
use scoring::{score_as_percent, GreedyCloudMatch, HeuristicStrategy, RecognitionResult};

use crate::{RecognitionError, RecognizerConfig};

/// Turns raw strokes into recognition results.
///
/// The network path resamples the stroke to the classifier's sampling factor,
/// extracts angle features and propagates them. The heuristic path compares
/// point clouds directly with `H`, after normalizing scale and position.
#[derive(Debug, Clone)]
pub struct Recognizer<H = GreedyCloudMatch> {
    success_threshold: f32,
    heuristic_threshold: f32,
    heuristic: H,
}

impl Recognizer<GreedyCloudMatch> {
    pub fn from_config(config: &RecognizerConfig) -> Self {
        Self::new(
            config.success_threshold.value,
            config.heuristic_threshold.value,
            config.heuristic(),
        )
    }
}

impl<H: HeuristicStrategy> Recognizer<H> {
    pub fn new(success_threshold: f32, heuristic_threshold: f32, heuristic: H) -> Self {
        Self {
            success_threshold,
            heuristic_threshold,
            heuristic,
        }
    }

    pub fn heuristic(&self) -> &H {
        &self.heuristic
    }

    pub fn recognize(
        &self,
        points: &[Point],
        network: &mut Network,
    ) -> Result<RecognitionResult, RecognitionError> {
        let angles = features(points, network)?;
        let result = network.propagate(&angles, self.success_threshold)?;

        log::debug!("Recognized {} ({:.4})", result.label, result.score);
        Ok(result)
    }

    /// Whether the stroke's activation for `label` reaches `threshold`.
    ///
    /// Looks at `label`'s own output, which need not be the best one.
    pub fn matches(
        &self,
        points: &[Point],
        network: &mut Network,
        label: &str,
        threshold: f32,
    ) -> Result<bool, RecognitionError> {
        if !network.labels().iter().any(|l| l == label) {
            return Err(PatternError::UnknownLabel(label.to_string()).into());
        }

        let angles = features(points, network)?;
        network.propagate(&angles, threshold)?;

        Ok(network
            .activation_of(label)
            .is_some_and(|activation| activation >= threshold))
    }

    /// Scores a candidate against a single template.
    pub fn compare(
        &self,
        candidate: &PatternDefinition,
        template: &PatternDefinition,
    ) -> Result<RecognitionResult, RecognitionError> {
        let n = template.sampling_factor();
        let candidate = normalized_cloud(candidate.name(), candidate.points(), n)?;
        let template_cloud = normalized_cloud(template.name(), template.points(), n)?;

        Ok(self.result(
            self.heuristic.score(&candidate, &template_cloud),
            template.name(),
        ))
    }

    /// Scores a raw stroke against every template and keeps the closest one.
    pub fn recognize_heuristic(
        &self,
        points: &[Point],
        templates: &[PatternDefinition],
    ) -> Result<RecognitionResult, RecognitionError> {
        if points.is_empty() {
            return Err(RecognitionError::InvalidInput("empty stroke".to_string()));
        }
        if templates.is_empty() {
            return Err(RecognitionError::InvalidInput(
                "no patterns to compare against".to_string(),
            ));
        }

        let best = templates
            .par_iter()
            .map(|template| -> Result<(f32, &str), RecognitionError> {
                let n = template.sampling_factor();
                let candidate = normalized_cloud("candidate", points, n)?;
                let cloud = normalized_cloud(template.name(), template.points(), n)?;
                Ok((self.heuristic.score(&candidate, &cloud), template.name()))
            })
            .collect::<Result<Vec<_>, _>>()?
            .into_iter()
            .fold(None, |best: Option<(f32, &str)>, (score, name)| match best {
                Some((best_score, _)) if best_score <= score => best,
                _ => Some((score, name)),
            });

        let Some((score, label)) = best else {
            return Err(RecognitionError::InvalidInput(
                "no patterns to compare against".to_string(),
            ));
        };

        log::debug!("Heuristic match {} ({:.4})", label, score);
        Ok(self.result(score, label))
    }

    fn result(&self, score: f32, label: &str) -> RecognitionResult {
        RecognitionResult::new(
            score_as_percent(score) >= self.heuristic_threshold,
            score,
            label,
        )
    }
}

fn features(points: &[Point], network: &Network) -> Result<Vec<f32>, RecognitionError> {
    if points.is_empty() {
        return Err(RecognitionError::InvalidInput("empty stroke".to_string()));
    }

    let simplified = simplify(points, network.sampling_factor());
    Ok(geometry::angles(&simplified))
}

// Unit bounding box, centred on the centroid, resampled to `n` equidistant points.
fn normalized_cloud(
    name: &str,
    points: &[Point],
    n: usize,
) -> Result<PatternDefinition, RecognitionError> {
    let scaled = transform::scale(points);
    let centred = transform::translate_to_centroid(&scaled);
    let resampled = transform::resample(&centred, n);

    Ok(PatternDefinition::new(name, resampled, n)?)
}
