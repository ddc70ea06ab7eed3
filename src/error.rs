use std::path::PathBuf;

use thiserror::Error;

/// Every failure a feed run can hit. None of them are recovered from; the
/// run aborts and the process exits non-zero.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("authentication failed: {0}")]
    Auth(String),

    #[error("history download failed: {0}")]
    Fetch(String),

    #[error("no cached snapshot at {}", .0.display())]
    NotFound(PathBuf),

    #[error("malformed snapshot at line {line}: {message}")]
    Format { line: usize, message: String },

    #[error("failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl FeedError {
    pub(crate) fn format(line: usize, message: impl Into<String>) -> Self {
        Self::Format {
            line,
            message: message.into(),
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T, E = FeedError> = std::result::Result<T, E>;
