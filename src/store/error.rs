use thiserror::Error;

/// Error types for property store operations
#[derive(Error, Debug)]
pub enum PropertyError {
    #[error("No such namespace: {0}")]
    NamespaceNotFound(String),

    #[error("No such key '{key}' in namespace '{namespace}'")]
    KeyNotFound { namespace: String, key: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
