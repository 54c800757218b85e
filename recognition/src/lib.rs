mod config;
mod context;
mod error;
mod recognizer;

pub use config::{ConfigParam, RecognizerConfig};
pub use context::RecognitionContext;
pub use error::RecognitionError;
pub use recognizer::Recognizer;
