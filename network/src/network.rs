use patterns::PatternDefinition;
use rand::Rng;
use scoring::RecognitionResult;

use crate::{Activation, NetworkError};

/// Training target for the output neuron of the presented class.
pub(crate) const TARGET_ON: f32 = 0.99;

/// Hidden layer width for `classes` outputs fed by a `sampling_factor`-point stroke.
/// Halves round to the nearest even width.
pub fn hidden_size_for(classes: usize, sampling_factor: usize) -> usize {
    ((classes + sampling_factor) as f32 / 2.0).round_ties_even() as usize
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hyperparameters {
    pub learning_rate: f32,
    pub theta: f32,
    pub elastic: f32,
    /// Multiplies the learning rate after every training sample.
    pub decay: f32,
}

impl Default for Hyperparameters {
    fn default() -> Self {
        Self {
            learning_rate: 0.013_823_639,
            theta: 0.5,
            elastic: 0.5,
            decay: 0.999,
        }
    }
}

/// Three-layer feed-forward classifier (input, hidden, output).
///
/// Weights are row-major: `hidden_weights[h][i]` connects input `i` to hidden
/// neuron `h`, `output_weights[o][h]` connects hidden `h` to output `o`.
/// `labels[o]` is always the class trained against output neuron `o`.
///
/// The activation buffers are scratch space overwritten by every forward
/// pass, so a network must not be shared between a running training session
/// and recognition.
#[derive(Debug, Clone, PartialEq)]
pub struct Network {
    pub(crate) input_size: usize,
    pub(crate) hidden_size: usize,
    pub(crate) output_size: usize,
    pub(crate) params: Hyperparameters,

    pub(crate) hidden_weights: Vec<Vec<f32>>,
    pub(crate) output_weights: Vec<Vec<f32>>,

    pub(crate) input_activations: Vec<f32>,
    pub(crate) hidden_net: Vec<f32>,
    pub(crate) hidden_activations: Vec<f32>,
    pub(crate) output_net: Vec<f32>,
    pub(crate) output_activations: Vec<f32>,
    pub(crate) output_deltas: Vec<f32>,

    pub(crate) labels: Vec<String>,
}

impl Network {
    /// Creates a network with weights drawn uniformly from `[-1, 1]`.
    ///
    /// The output layer gets one neuron per label.
    pub fn new<R: Rng>(
        input_size: usize,
        hidden_size: usize,
        labels: Vec<String>,
        params: Hyperparameters,
        rng: &mut R,
    ) -> Result<Self, NetworkError> {
        if labels.is_empty() {
            return Err(NetworkError::EmptyTrainingSet);
        }
        let output_size = labels.len();

        let mut random_matrix = |rows: usize, cols: usize| -> Vec<Vec<f32>> {
            (0..rows)
                .map(|_| (0..cols).map(|_| rng.gen_range(-1.0..=1.0)).collect())
                .collect()
        };
        let hidden_weights = random_matrix(hidden_size, input_size);
        let output_weights = random_matrix(output_size, hidden_size);

        Ok(Self {
            input_size,
            hidden_size,
            output_size,
            params,
            hidden_weights,
            output_weights,
            input_activations: vec![0.0; input_size],
            hidden_net: vec![0.0; hidden_size],
            hidden_activations: vec![0.0; hidden_size],
            output_net: vec![0.0; output_size],
            output_activations: vec![0.0; output_size],
            output_deltas: vec![0.0; output_size],
            labels,
        })
    }

    /// Creates a fresh network sized for the given patterns.
    ///
    /// `sampling_factor` points give `sampling_factor - 1` angle inputs.
    pub fn for_patterns<R: Rng>(
        patterns: &[PatternDefinition],
        sampling_factor: usize,
        params: Hyperparameters,
        rng: &mut R,
    ) -> Result<Self, NetworkError> {
        if patterns.is_empty() {
            return Err(NetworkError::EmptyTrainingSet);
        }
        let labels: Vec<String> = patterns.iter().map(|p| p.name().to_string()).collect();
        let hidden = hidden_size_for(labels.len(), sampling_factor);

        Self::new(
            sampling_factor.saturating_sub(1),
            hidden,
            labels,
            params,
            rng,
        )
    }

    pub fn input_size(&self) -> usize {
        self.input_size
    }

    pub fn hidden_size(&self) -> usize {
        self.hidden_size
    }

    pub fn output_size(&self) -> usize {
        self.output_size
    }

    /// Number of stroke points a candidate is resampled to before propagation.
    pub fn sampling_factor(&self) -> usize {
        self.input_size + 1
    }

    pub fn params(&self) -> &Hyperparameters {
        &self.params
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn activation(&self) -> Activation {
        Activation::new(self.params.elastic, self.params.theta)
    }

    /// Classifies one angle feature vector.
    ///
    /// Picks the output neuron with the highest activation, lowest index on
    /// ties. Success when that activation reaches `threshold`.
    pub fn propagate(
        &mut self,
        angles: &[f32],
        threshold: f32,
    ) -> Result<RecognitionResult, NetworkError> {
        self.check_input(angles)?;
        self.forward(angles);

        let mut best_score = -1.0;
        let mut best_index = 0;
        for (i, &score) in self.output_activations.iter().enumerate() {
            if score > best_score {
                best_score = score;
                best_index = i;
            }
        }

        Ok(RecognitionResult::new(
            best_score >= threshold,
            best_score,
            self.labels[best_index].clone(),
        ))
    }

    /// Output activation of `label` from the last forward pass.
    pub fn activation_of(&self, label: &str) -> Option<f32> {
        let index = self.labels.iter().position(|l| l == label)?;
        self.output_activations.get(index).copied()
    }

    pub(crate) fn check_input(&self, angles: &[f32]) -> Result<(), NetworkError> {
        if angles.len() != self.input_size {
            return Err(NetworkError::DimensionMismatch {
                expected: self.input_size,
                actual: angles.len(),
            });
        }
        Ok(())
    }

    pub(crate) fn forward(&mut self, angles: &[f32]) {
        let activation = self.activation();
        self.input_activations.copy_from_slice(angles);

        for h in 0..self.hidden_size {
            let net = dot(&self.hidden_weights[h], &self.input_activations);
            self.hidden_net[h] = net;
            self.hidden_activations[h] = activation.sigmoid(net);
        }

        for o in 0..self.output_size {
            let net = dot(&self.output_weights[o], &self.hidden_activations);
            self.output_net[o] = net;
            self.output_activations[o] = activation.sigmoid(net);
        }
    }

    /// One online backpropagation step on a single sample.
    ///
    /// Output weights are updated first; the hidden layer then backpropagates
    /// through the already updated output weights. Returns the summed output
    /// delta.
    pub(crate) fn learn(&mut self, angles: &[f32], target: usize) -> f32 {
        let activation = self.activation();
        let rate = self.params.learning_rate;

        self.forward(angles);

        let mut total_error = 0.0;
        for o in 0..self.output_size {
            let expected = if o == target { TARGET_ON } else { 0.0 };
            let net = self.output_net[o];
            let delta = (expected - activation.sigmoid(net)) * (activation.slope(net) + 0.1);
            self.output_deltas[o] = delta;
            total_error += delta;

            for (weight, hidden) in self.output_weights[o]
                .iter_mut()
                .zip(&self.hidden_activations)
            {
                *weight += rate * delta * hidden;
            }
        }

        for h in 0..self.hidden_size {
            let back: f32 = (0..self.output_size)
                .map(|o| self.output_deltas[o] * self.output_weights[o][h])
                .sum();
            let gradient = back * activation.slope(self.hidden_net[h]);

            for (weight, input) in self.hidden_weights[h]
                .iter_mut()
                .zip(&self.input_activations)
            {
                *weight += rate * gradient * input;
            }
        }

        self.params.learning_rate *= self.params.decay;
        total_error
    }
}

#[inline(always)]
fn dot(weights: &[f32], values: &[f32]) -> f32 {
    weights.iter().zip(values).map(|(w, v)| w * v).sum()
}
