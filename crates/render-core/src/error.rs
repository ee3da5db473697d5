use thiserror::Error;

/// Raised by a [`crate::Generator`]. The layout engine never catches or
/// retries these; they reach the caller unchanged.
#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Formatting error: {0}")]
    Fmt(#[from] std::fmt::Error),
    #[error("Generator called out of order: {0}")]
    Protocol(String),
    #[error("Other generator error: {0}")]
    Other(String),
}

impl From<&str> for GeneratorError {
    fn from(s: &str) -> Self {
        GeneratorError::Other(s.to_string())
    }
}
