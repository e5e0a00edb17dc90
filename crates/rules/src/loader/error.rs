//! Error types for rule document loading.

/// Errors that make a rule document unusable. Any of these aborts the run.
#[derive(Debug, thiserror::Error)]
pub enum ConfigLoadError {
    /// Filesystem I/O error (missing or unreadable file).
    #[error("failed to read rules file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// YAML parse/deserialization error.
    #[error("failed to parse rules yaml: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// A rule whose parameters have the wrong shape for its type.
    #[error("invalid rule '{id}': {message}")]
    InvalidRule { id: String, message: String },
}

/// Result alias for rule loading.
pub type Result<T> = std::result::Result<T, ConfigLoadError>;
