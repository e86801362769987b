//! notecam-core - Core library for notecam
//!
//! This crate contains the note models, the observable note store, and the
//! search/pagination view logic shared by every notecam front end.

pub mod config;
pub mod error;
pub mod export;
pub mod models;
pub mod store;
pub mod util;
pub mod view;

pub use config::{AppConfig, QueryChangePolicy};
pub use error::{Error, Result};
pub use models::{NewNote, Note, NoteId, NotePatch};
pub use store::{Applied, NoteCommand, NoteStore, NotesSnapshot, Subscription};
pub use view::{ItemMode, ListItem, ListPage, NoteListView};
