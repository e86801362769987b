//! Note list view logic: search, pagination, and inline editing.

mod filter;
mod list;
mod pagination;

pub use filter::{filter_notes, normalize_query, note_matches_query};
pub use list::{EditSession, ItemMode, ListItem, ListPage, NoteListView};
pub use pagination::{Pagination, DEFAULT_PAGE_SIZE};
