use std::path::{Path, PathBuf};

use notecam_core::export::{self, render_notes_export, suggested_export_file_name};
use notecam_core::util::unix_timestamp_millis_now;
use notecam_core::NotesSnapshot;

use crate::cli::ExportFormat;
use crate::error::CliError;

/// Render the session's notes.
///
/// `output` is `None` for stdout, `Some(None)` for a generated file name in
/// the working directory, and `Some(Some(path))` for a file or directory.
pub async fn run_export(
    snapshot: &NotesSnapshot,
    format: ExportFormat,
    output: Option<Option<&Path>>,
) -> Result<Vec<String>, CliError> {
    let format = export::ExportFormat::from(format);
    let rendered = render_notes_export(&snapshot.notes, format)?;

    let Some(output) = output else {
        return Ok(vec![rendered]);
    };

    let path = resolve_output_path(output, format).await;
    tokio::fs::write(&path, rendered).await?;
    tracing::info!(notes = snapshot.notes.len(), "Exported notes to {}", path.display());
    Ok(vec![path.display().to_string()])
}

async fn resolve_output_path(output: Option<&Path>, format: export::ExportFormat) -> PathBuf {
    let file_name = suggested_export_file_name(format, unix_timestamp_millis_now());
    match output {
        None => PathBuf::from(file_name),
        Some(path) => {
            let is_dir = tokio::fs::metadata(path)
                .await
                .is_ok_and(|metadata| metadata.is_dir());
            if is_dir {
                path.join(file_name)
            } else {
                path.to_path_buf()
            }
        }
    }
}
