use network::NetworkError;
use patterns::PatternError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RecognitionError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("no classifier has been trained or loaded")]
    NotTrained,

    #[error("a training run is in progress")]
    TrainingInProgress,

    #[error(transparent)]
    Pattern(#[from] PatternError),

    #[error(transparent)]
    Network(#[from] NetworkError),
}
