use std::path::PathBuf;

use thiserror::Error;

/// Failures while building an engine from configuration.
///
/// Comparisons themselves cannot fail; only loading or validating the
/// configuration can.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("confusion pair #{index} has an empty side")]
    EmptyConfusionPair { index: usize },
    #[error("confusion pair '{left}' <-> '{right}' is listed more than once")]
    DuplicateConfusionPair { left: String, right: String },
    #[error("unknown tokenizer '{name}'. Available: unicode, whitespace")]
    UnknownTokenizer { name: String },
}

impl ConfigError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }

    pub(crate) fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Json { path: path.into(), source }
    }
}
