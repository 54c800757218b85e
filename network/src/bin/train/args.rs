use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(name = "Gesture Trainer")]
#[command(version = "0.1.0")]
pub struct Args {
    /// Pattern document to train on.
    #[arg(long)]
    pub patterns: PathBuf,

    /// Where to write the classifier state. Defaults to a timestamped file.
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Only train these patterns, in this order.
    #[arg(long, value_delimiter = ',')]
    pub names: Vec<String>,

    /// Number of training epochs.
    #[arg(long, default_value_t = 2000)]
    pub epochs: usize,

    /// Points per stroke after normalization.
    #[arg(long, default_value_t = 20)]
    pub sampling_factor: usize,

    /// Initial learning rate.
    #[arg(long, default_value_t = 0.013_823_639)]
    pub learning_rate: f32,

    /// Learning rate multiplier applied after every sample.
    #[arg(long, default_value_t = 0.999)]
    pub decay: f32,

    /// Sigmoid threshold shift.
    #[arg(long, default_value_t = 0.5)]
    pub theta: f32,

    /// Sigmoid steepness.
    #[arg(long, default_value_t = 0.5)]
    pub elastic: f32,

    /// Seed for weight initialization and shuffling.
    #[arg(long)]
    pub seed: Option<u64>,
}
