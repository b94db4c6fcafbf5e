use std::io;
use std::path::PathBuf;

use ordmaze::maze::MazeError;
use ordmaze_games::SourceError;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{0}")]
    Usage(String),
    #[error(transparent)]
    Maze(#[from] MazeError),
    #[error(transparent)]
    Source(#[from] SourceError),
    #[error("{path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("config {path}: {source}")]
    Config {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("could not determine config directory")]
    NoConfigDir,
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl CliError {
    pub fn usage(msg: impl Into<String>) -> Self {
        CliError::Usage(msg.into())
    }

    /// Process exit status for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Usage(_) => 2,
            _ => 1,
        }
    }
}
