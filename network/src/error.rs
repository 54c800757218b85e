use thiserror::Error;

#[derive(Error, Debug)]
pub enum NetworkError {
    #[error("expected {expected} values, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("malformed classifier state: {0}")]
    MalformedState(String),

    #[error("nothing to train on")]
    EmptyTrainingSet,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
