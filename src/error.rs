//! Error types for Spectro.

/// Top-level error type for the server.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Screen capture errors.
///
/// The placeholder capturer never produces these; a real capturer reports
/// `Unavailable` when the host refuses screen-recording permission.
#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    #[error("Screen capture unavailable: {reason}")]
    Unavailable { reason: String },

    #[error("Screen capture failed: {0}")]
    Failed(String),
}

/// Analysis errors.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("Analysis failed: {0}")]
    Failed(String),

    #[error("Could not capture input for analysis: {0}")]
    Capture(#[from] CaptureError),
}

/// Result type alias for the server.
pub type Result<T> = std::result::Result<T, Error>;
