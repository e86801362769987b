//! Data models for notecam

mod note;
mod tag;

pub use note::{NewNote, Note, NoteId, NotePatch};
pub use tag::{collect_note_tags, normalize_tags, parse_tags};
