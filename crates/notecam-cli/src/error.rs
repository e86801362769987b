use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] notecam_core::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    #[error("Note ID cannot be empty")]
    EmptyNoteId,
    #[error("Note not found for id/prefix: {0}")]
    NoteNotFound(String),
    #[error("{0}")]
    AmbiguousNoteId(String),
    #[error("No note is being edited. Run `edit <id>` first.")]
    NotEditing,
    #[error("Permission required to read {}. Grant access and run the command again.", .0.display())]
    PermissionRequired(PathBuf),
    #[error("Image not available at {}: {reason}", .path.display())]
    ImageUnavailable { path: PathBuf, reason: String },
    #[error("{0}")]
    InvalidCommand(String),
    #[error("Configuration error: {0}")]
    Config(String),
}
