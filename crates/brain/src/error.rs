use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::types::Pos;

/// Failures while reading options or scenario files. Decision code never returns these.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid options table: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid scenario: {0}")]
    Json(#[from] serde_json::Error),
    #[error("scenario references unknown actor `{0}`")]
    UnknownActor(String),
    #[error("scenario references unknown item template `{0}`")]
    UnknownTemplate(String),
    #[error("scenario names actor `{0}` more than once")]
    DuplicateActor(String),
    #[error("scenario places something outside the map at ({}, {})", .0.y, .0.x)]
    OutOfBounds(Pos),
}
