//! Shared error types for the crate.
//!
//! Classification itself is total: unsupported shapes are encoded in the
//! descriptor (io disabled, void category), never raised. The error type
//! covers the configuration and emission surfaces.

use thiserror::Error;

/// Main error type for fieldmap operations
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Emission errors
    #[error("Emission error: {0}")]
    Emission(String),

    /// Wrapped external errors
    #[error(transparent)]
    External(#[from] anyhow::Error),

    /// IO errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// TOML errors
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, Error>;
