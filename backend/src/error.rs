#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum BackendError {
    #[error("invalid scheme parameters: {0}")]
    InvalidParameters(String),
}
