//! Immutable store snapshot and command application.

use serde::Serialize;

use super::{Applied, NoteCommand};
use crate::models::{normalize_tags, Note, NoteId};

/// State published by the store after each change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NotesSnapshot {
    /// Notes, newest first
    pub notes: Vec<Note>,
    /// Selected background image reference
    pub background_image: Option<String>,
    /// Incremented by one for every state change
    pub version: u64,
}

impl NotesSnapshot {
    #[must_use]
    pub fn note(&self, id: &NoteId) -> Option<&Note> {
        self.notes.iter().find(|note| note.id == *id)
    }

    #[must_use]
    pub fn note_at(&self, position: usize) -> Option<&Note> {
        self.notes.get(position)
    }

    /// Absolute position of a note in the unfiltered collection
    #[must_use]
    pub fn position_of(&self, id: &NoteId) -> Option<usize> {
        self.notes.iter().position(|note| note.id == *id)
    }

    /// Ids whose string form starts with `prefix` (case-insensitive), in display order.
    #[must_use]
    pub fn ids_with_prefix(&self, prefix: &str) -> Vec<NoteId> {
        let prefix = prefix.trim().to_ascii_lowercase();
        if prefix.is_empty() {
            return Vec::new();
        }
        self.notes
            .iter()
            .filter(|note| note.id.as_str().starts_with(&prefix))
            .map(|note| note.id)
            .collect()
    }

    /// Apply a command, returning the next snapshot when state changed.
    pub(crate) fn apply(&self, command: NoteCommand) -> Option<(Self, Applied)> {
        match command {
            NoteCommand::Add(mut note) => {
                if self.position_of(&note.id).is_some() {
                    return None;
                }
                note.tags = normalize_tags(note.tags);
                let id = note.id;
                let mut notes = Vec::with_capacity(self.notes.len() + 1);
                notes.push(note);
                notes.extend(self.notes.iter().cloned());
                Some((self.successor(notes, self.background_image.clone()), Applied::Added(id)))
            }
            NoteCommand::Delete(id) => {
                let position = self.position_of(&id)?;
                let mut notes = self.notes.clone();
                notes.remove(position);
                Some((self.successor(notes, self.background_image.clone()), Applied::Changed))
            }
            NoteCommand::Edit(id, patch) => {
                let position = self.position_of(&id)?;
                let mut notes = self.notes.clone();
                if !notes[position].apply_patch(patch) {
                    return None;
                }
                Some((self.successor(notes, self.background_image.clone()), Applied::Changed))
            }
            NoteCommand::SetBackground(uri) => {
                if self.background_image == uri {
                    return None;
                }
                Some((self.successor(self.notes.clone(), uri), Applied::Changed))
            }
        }
    }

    fn successor(&self, notes: Vec<Note>, background_image: Option<String>) -> Self {
        Self {
            notes,
            background_image,
            version: self.version + 1,
        }
    }
}
