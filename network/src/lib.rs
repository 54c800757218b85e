pub mod activation;
mod error;
pub mod network;
mod state;
pub mod training;

pub use activation::Activation;
pub use error::NetworkError;
pub use network::{hidden_size_for, Hyperparameters, Network};
pub use training::{Step, TrainingSession};

#[cfg(test)]
mod tests;
