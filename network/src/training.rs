use patterns::PatternDefinition;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::{Network, NetworkError};

/// Progress report returned by [`TrainingSession::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    InProgress { epoch: usize, total: usize },
    Done,
}

/// Resumable online training run.
///
/// Owns the network for the duration of the run. Each [`step`](Self::step)
/// performs exactly one epoch: every pattern once, in a freshly shuffled
/// order. Dropping the session between steps cancels the run; the network
/// can be taken back at any epoch boundary with
/// [`into_network`](Self::into_network).
pub struct TrainingSession {
    network: Network,
    features: Vec<Vec<f32>>,
    order: Vec<usize>,
    rng: StdRng,
    epoch: usize,
    epochs: usize,
}

impl TrainingSession {
    /// Validates the patterns against the network and prepares the run.
    ///
    /// Pattern `i` is trained against output neuron `i`, and the network's
    /// labels are replaced by the pattern names in that order. Nothing in the
    /// network is touched when validation fails.
    pub fn new(
        mut network: Network,
        patterns: &[PatternDefinition],
        epochs: usize,
        rng: StdRng,
    ) -> Result<Self, NetworkError> {
        if patterns.is_empty() {
            return Err(NetworkError::EmptyTrainingSet);
        }
        if patterns.len() != network.output_size {
            return Err(NetworkError::DimensionMismatch {
                expected: network.output_size,
                actual: patterns.len(),
            });
        }

        let features = patterns
            .iter()
            .map(|pattern| {
                let angles = pattern.angles();
                network.check_input(&angles)?;
                Ok(angles)
            })
            .collect::<Result<Vec<_>, NetworkError>>()?;

        network.labels = patterns.iter().map(|p| p.name().to_string()).collect();

        log::info!(
            "Training {} patterns for {} epochs ({}-{}-{})",
            patterns.len(),
            epochs,
            network.input_size,
            network.hidden_size,
            network.output_size
        );

        Ok(Self {
            network,
            order: (0..features.len()).collect(),
            features,
            rng,
            epoch: 0,
            epochs,
        })
    }

    /// Same as [`new`](Self::new), seeding the shuffle from `seed` or from entropy.
    pub fn with_seed(
        network: Network,
        patterns: &[PatternDefinition],
        epochs: usize,
        seed: Option<u64>,
    ) -> Result<Self, NetworkError> {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::new(network, patterns, epochs, rng)
    }

    /// Runs one epoch.
    pub fn step(&mut self) -> Step {
        if self.is_done() {
            return Step::Done;
        }

        shuffle(&mut self.order, &mut self.rng);

        for &index in &self.order {
            self.network.learn(&self.features[index], index);
        }
        self.epoch += 1;

        if log::log_enabled!(log::Level::Debug) {
            let deltas: Vec<String> = self
                .network
                .output_deltas
                .iter()
                .enumerate()
                .map(|(i, d)| format!("{}: {:.5}", i, d))
                .collect();
            log::debug!("epoch {} deltas [{}]", self.epoch, deltas.join(", "));
        }

        if self.is_done() {
            log::info!("Training finished after {} epochs", self.epoch);
            Step::Done
        } else {
            Step::InProgress {
                epoch: self.epoch,
                total: self.epochs,
            }
        }
    }

    pub fn epoch(&self) -> usize {
        self.epoch
    }

    pub fn total_epochs(&self) -> usize {
        self.epochs
    }

    pub fn is_done(&self) -> bool {
        self.epoch >= self.epochs
    }

    pub fn network(&self) -> &Network {
        &self.network
    }

    /// Runs the remaining epochs and returns the trained network.
    pub fn finish(mut self) -> Network {
        while self.step() != Step::Done {}
        self.network
    }

    /// Stops at the current epoch boundary and returns the network as is.
    pub fn into_network(self) -> Network {
        self.network
    }
}

impl Network {
    /// Trains on `patterns` for `epochs` epochs without yielding.
    pub fn train(
        self,
        patterns: &[PatternDefinition],
        epochs: usize,
        seed: Option<u64>,
    ) -> Result<Network, NetworkError> {
        Ok(TrainingSession::with_seed(self, patterns, epochs, seed)?.finish())
    }
}

// Fisher-Yates, walking from the last slot down.
fn shuffle<R: Rng>(order: &mut [usize], rng: &mut R) {
    for i in (1..order.len()).rev() {
        let j = rng.gen_range(0..=i);
        order.swap(i, j);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shuffle_is_a_permutation() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut order: Vec<usize> = (0..9).collect();
        shuffle(&mut order, &mut rng);

        let mut sorted = order.clone();
        sorted.sort();
        assert_eq!(sorted, (0..9).collect::<Vec<_>>());
    }

    #[test]
    fn test_shuffle_depends_on_seed_only() {
        let mut a: Vec<usize> = (0..16).collect();
        let mut b: Vec<usize> = (0..16).collect();
        shuffle(&mut a, &mut StdRng::seed_from_u64(4));
        shuffle(&mut b, &mut StdRng::seed_from_u64(4));
        assert_eq!(a, b);
    }
}
