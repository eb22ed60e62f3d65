// ABOUTME: Error types for configuration loading and shortcut parsing
// The toast lifecycle itself has no failure modes; these cover the edges around it

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ToastboxError {
    #[error("Invalid shortcut '{0}': {1}")]
    InvalidShortcut(String, &'static str),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Config serialize error: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ToastboxError>;
