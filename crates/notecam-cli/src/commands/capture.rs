//! Camera capture and gallery picker flows.
//!
//! Both flows resolve a local image file to a `file://` URI before touching
//! the store; the file lookup is the only await point.

use std::io;
use std::path::Path;

use notecam_core::NoteStore;

use crate::error::CliError;

pub async fn resolve_image_uri(path: &Path) -> Result<String, CliError> {
    let canonical = tokio::fs::canonicalize(path)
        .await
        .map_err(|error| image_error(path, &error))?;
    let metadata = tokio::fs::metadata(&canonical)
        .await
        .map_err(|error| image_error(path, &error))?;

    if !metadata.is_file() {
        return Err(CliError::ImageUnavailable {
            path: path.to_path_buf(),
            reason: "not a regular file".to_string(),
        });
    }

    Ok(format!("file://{}", canonical.display()))
}

pub fn image_error(path: &Path, error: &io::Error) -> CliError {
    if error.kind() == io::ErrorKind::PermissionDenied {
        tracing::warn!("Permission denied reading image {}", path.display());
        CliError::PermissionRequired(path.to_path_buf())
    } else {
        CliError::ImageUnavailable {
            path: path.to_path_buf(),
            reason: error.to_string(),
        }
    }
}

pub async fn run_capture(
    store: &NoteStore,
    path: &Path,
    title: &str,
    raw_tags: &str,
) -> Result<Vec<String>, CliError> {
    let uri = resolve_image_uri(path).await?;
    let id = store.add_note_from_input(uri, title, raw_tags);
    tracing::info!(note_id = %id, "Captured note");
    Ok(vec![format!("Captured {id}")])
}

pub fn run_add(store: &NoteStore, uri: &str, title: &str, raw_tags: &str) -> Vec<String> {
    let id = store.add_note_from_input(uri, title, raw_tags);
    tracing::info!(note_id = %id, "Added note");
    vec![format!("Added {id}")]
}

pub async fn run_background(
    store: &NoteStore,
    path: Option<&Path>,
    clear: bool,
) -> Result<Vec<String>, CliError> {
    if clear {
        store.update_background_image(None);
        return Ok(vec!["Background cleared".to_string()]);
    }

    let Some(path) = path else {
        return Ok(vec!["Background selection cancelled".to_string()]);
    };

    let uri = resolve_image_uri(path).await?;
    store.update_background_image(Some(uri.clone()));
    Ok(vec![format!("Background set to {uri}")])
}
