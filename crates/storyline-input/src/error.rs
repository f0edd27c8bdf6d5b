//! Error types for input configuration.

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Errors raised while loading an [`InputConfig`](crate::InputConfig).
#[derive(Error, Debug, Diagnostic)]
#[non_exhaustive]
pub enum ConfigError {
    /// Reading the file failed.
    #[error("failed to read config file {path}")]
    #[diagnostic(code(storyline::config::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File extension other than `.toml` or `.json`.
    #[error("unsupported config format for {0}")]
    #[diagnostic(
        code(storyline::config::format),
        help("use a .toml or .json file")
    )]
    UnsupportedFormat(PathBuf),

    #[error("invalid TOML config: {0}")]
    #[diagnostic(code(storyline::config::toml))]
    Toml(#[from] toml::de::Error),

    #[error("invalid JSON config: {0}")]
    #[diagnostic(code(storyline::config::json))]
    Json(#[from] serde_json::Error),
}
