use network::Hyperparameters;
use protocol::{OptionType, Output, ProtocolOption};
use scoring::GreedyCloudMatch;
use std::str::FromStr;

macro_rules! define_config {
    ($(($field:ident: $type:ty, $name:expr, $option_type:expr, $default:expr)),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub struct RecognizerConfig {
            $(pub $field: ConfigParam<$type>,)*
        }

        impl Default for RecognizerConfig {
            fn default() -> Self {
                Self {
                    $($field: ConfigParam {
                        value: $default,
                        option: Some(ProtocolOption { name: $name, option_type: $option_type }),
                    },)*
                }
            }
        }

        impl RecognizerConfig {
            pub fn update_from_protocol(&mut self, name: &str, value: &str) -> Result<(), String> {
                match name {
                    $($name => self.$field.update_from_protocol(value),)*
                    _ => Err(format!("Unknown parameter: {}", name)),
                }
            }

            pub fn to_protocol(&self, output: &std::sync::mpsc::Sender<Output>) -> Result<(), std::sync::mpsc::SendError<Output>> {
                $(
                    if let Some(line) = self.$field.to_protocol() {
                        output.send(Output::Option(line))?;
                    }
                )*
                Ok(())
            }
        }
    };
}

define_config!(
    // Stroke normalization
    (sampling_factor: usize, "SamplingFactor", OptionType::Spin { min: 2, max: 256 }, 20),

    // Recognition thresholds
    (success_threshold: f32, "SuccessThreshold", OptionType::Float { min: 0.0, max: 1.0 }, 0.8),
    (heuristic_threshold: f32, "HeuristicThreshold", OptionType::Float { min: 0.0, max: 1.0 }, 0.95),

    // Training
    (epochs: usize, "Epochs", OptionType::Spin { min: 1, max: 1_000_000 }, 2000),
    (learning_rate: f32, "LearningRate", OptionType::Float { min: 0.0, max: 10.0 }, 0.013_823_639),
    (learning_rate_decay: f32, "LearningRateDecay", OptionType::Float { min: 0.0, max: 1.0 }, 0.999),
    (theta: f32, "Theta", OptionType::Float { min: -10.0, max: 10.0 }, 0.5),
    (elastic_sigmoid: f32, "ElasticSigmoid", OptionType::Float { min: 0.0, max: 10.0 }, 0.5),

    // Greedy point-cloud heuristic
    (heuristic_epsilon: f32, "HeuristicEpsilon", OptionType::Float { min: 0.0, max: 1.0 }, 0.5),
    (heuristic_weighted: bool, "HeuristicWeighted", OptionType::Check, true),
);

impl RecognizerConfig {
    pub fn hyperparameters(&self) -> Hyperparameters {
        Hyperparameters {
            learning_rate: self.learning_rate.value,
            theta: self.theta.value,
            elastic: self.elastic_sigmoid.value,
            decay: self.learning_rate_decay.value,
        }
    }

    pub fn heuristic(&self) -> GreedyCloudMatch {
        GreedyCloudMatch::new(self.heuristic_epsilon.value, self.heuristic_weighted.value)
    }
}

#[derive(Debug, Clone)]
pub struct ConfigParam<T> {
    pub value: T,
    pub option: Option<ProtocolOption>,
}

impl<T> ConfigParam<T>
where
    T: FromStr + ToString + Clone,
    T::Err: std::fmt::Display,
{
    pub fn update_from_protocol(&mut self, value: &str) -> Result<(), String> {
        if let Some(meta) = &self.option {
            meta.option_type.validate(value)?;
        }

        let new_value = value
            .parse::<T>()
            .map_err(|e| format!("Parse error: {}", e))?;

        self.value = new_value;
        Ok(())
    }

    pub fn to_protocol(&self) -> Option<String> {
        self.option
            .as_ref()
            .map(|meta| meta.option_type.to_protocol(meta.name, &self.value))
    }
}
