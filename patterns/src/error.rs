use thiserror::Error;

#[derive(Error, Debug)]
pub enum PatternError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("a pattern named '{0}' already exists")]
    DuplicateLabel(String),

    #[error("no pattern named '{0}'")]
    UnknownLabel(String),

    #[error("malformed pattern document: {0}")]
    MalformedDocument(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
