use thiserror::Error;

/// Error type for graph, cache and statistics operations.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("cache error: {0}")]
    CacheError(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl GraphError {
    pub fn invalid_input<T: Into<String>>(msg: T) -> Self {
        GraphError::InvalidInput(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        GraphError::NotFound(msg.into())
    }

    pub fn cache<T: Into<String>>(msg: T) -> Self {
        GraphError::CacheError(msg.into())
    }
}
