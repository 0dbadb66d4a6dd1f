//! Error types for feedtriage

/// Result type alias using feedtriage's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for feedtriage operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Rejected input (missing fields, unknown labels)
    #[error("validation error: {0}")]
    Validation(String),

    /// Requested feedback item does not exist
    #[error("not found: {0}")]
    NotFound(String),

    /// Feedback store failures
    #[error("storage error: {0}")]
    Storage(String),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    /// Classifier construction errors
    #[error("classifier error: {0}")]
    Classifier(String),

    /// Filesystem errors
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic internal errors
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a new validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a new not-found error
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create a new storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new classifier error
    pub fn classifier(msg: impl Into<String>) -> Self {
        Self::Classifier(msg.into())
    }

    /// Create a new internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}
