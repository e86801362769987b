use notecam_core::{NoteListView, NoteStore};

use crate::commands::common::resolve_note_id;
use crate::error::CliError;

pub fn run_edit(store: &NoteStore, view: &mut NoteListView, id: &str) -> Result<Vec<String>, CliError> {
    let snapshot = store.snapshot();
    let note_id = resolve_note_id(id, &snapshot)?;
    if !view.start_edit(&snapshot, &note_id) {
        return Err(CliError::NoteNotFound(id.to_string()));
    }

    let draft = view
        .editing()
        .map(|session| session.draft.clone())
        .unwrap_or_default();
    Ok(vec![
        format!("Editing {note_id}"),
        format!("Current title: \"{draft}\""),
    ])
}

pub fn run_draft(view: &mut NoteListView, text: &[String]) -> Result<Vec<String>, CliError> {
    let draft = text.join(" ");
    if !view.update_draft(draft.clone()) {
        return Err(CliError::NotEditing);
    }
    Ok(vec![format!("Draft: \"{draft}\"")])
}

pub fn run_save(store: &NoteStore, view: &mut NoteListView) -> Result<Vec<String>, CliError> {
    let Some(session) = view.editing().cloned() else {
        return Err(CliError::NotEditing);
    };

    if view.save_edit(store) {
        Ok(vec![format!("Saved {}", session.note_id)])
    } else if store.note(&session.note_id).is_none() {
        Ok(vec![format!("Note {} no longer exists; nothing saved", session.note_id)])
    } else {
        Ok(vec![format!("No changes to {}", session.note_id)])
    }
}

pub fn run_cancel(view: &mut NoteListView) -> Result<Vec<String>, CliError> {
    if view.cancel_edit() {
        Ok(vec!["Edit cancelled".to_string()])
    } else {
        Err(CliError::NotEditing)
    }
}

pub fn run_delete(store: &NoteStore, view: &mut NoteListView, id: &str) -> Result<Vec<String>, CliError> {
    let note_id = resolve_note_id(id, &store.snapshot())?;
    view.delete(store, &note_id);
    Ok(vec![format!("Deleted {note_id}")])
}

/// Positional delete; an out-of-range position changes nothing.
pub fn run_delete_at(store: &NoteStore, view: &mut NoteListView, position: usize) -> Vec<String> {
    let Some(note_id) = store.snapshot().note_at(position).map(|note| note.id) else {
        return vec![format!("No note at position {position}")];
    };
    view.delete(store, &note_id);
    vec![format!("Deleted {note_id}")]
}
