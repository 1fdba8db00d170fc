//! Configuration error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors loading or checking `manpage.toml`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read manpage config `{}`", .0.display())]
    Io(PathBuf, #[source] std::io::Error),

    #[error("invalid manpage config")]
    Toml(#[from] toml::de::Error),

    #[error("manpage config: {0}")]
    Validation(String),
}
