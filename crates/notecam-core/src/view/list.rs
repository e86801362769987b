//! Paginated, searchable note list with a single inline editor.
//!
//! The view never owns notes. It renders a [`ListPage`] from a store snapshot
//! and routes edit/delete actions back to the [`NoteStore`] by note id, so
//! filtering and paging can never make an action hit the wrong note.

use crate::config::{AppConfig, QueryChangePolicy};
use crate::models::{Note, NoteId, NotePatch};
use crate::store::{NoteStore, NotesSnapshot};

use super::filter::filter_notes;
use super::pagination::Pagination;

/// The note currently being edited and its buffered title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSession {
    pub note_id: NoteId,
    pub draft: String,
}

/// Per-item state: `Viewing -> Editing -> Viewing`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemMode {
    Viewing,
    Editing { draft: String },
}

/// A visible note with its absolute position in the unfiltered collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItem {
    pub note: Note,
    pub position: usize,
    pub mode: ItemMode,
}

/// Everything a screen needs to draw the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListPage {
    pub items: Vec<ListItem>,
    pub query: String,
    pub page: usize,
    pub total_pages: usize,
    pub filtered_count: usize,
    pub total_count: usize,
    pub can_go_previous: bool,
    pub can_go_next: bool,
    pub background_image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteListView {
    query: String,
    pagination: Pagination,
    query_change: QueryChangePolicy,
    editing: Option<EditSession>,
}

impl Default for NoteListView {
    fn default() -> Self {
        Self::from_config(&AppConfig::default())
    }
}

impl NoteListView {
    #[must_use]
    pub fn new(page_size: usize, query_change: QueryChangePolicy) -> Self {
        Self {
            query: String::new(),
            pagination: Pagination::new(page_size),
            query_change,
            editing: None,
        }
    }

    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.page_size, config.query_change)
    }

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    #[must_use]
    pub const fn page(&self) -> usize {
        self.pagination.page()
    }

    #[must_use]
    pub const fn page_size(&self) -> usize {
        self.pagination.page_size()
    }

    #[must_use]
    pub const fn editing(&self) -> Option<&EditSession> {
        self.editing.as_ref()
    }

    /// Replace the live search query.
    ///
    /// With [`QueryChangePolicy::KeepPage`] the current page is kept even when
    /// the new result set is shorter; [`render`](Self::render) then shows an
    /// empty page.
    pub fn set_query(&mut self, query: impl Into<String>) {
        let query = query.into();
        if query == self.query {
            return;
        }
        self.query = query;
        if self.query_change == QueryChangePolicy::ResetToFirst {
            self.pagination.reset();
        }
    }

    #[must_use]
    pub fn filtered_count(&self, snapshot: &NotesSnapshot) -> usize {
        filter_notes(&snapshot.notes, &self.query).len()
    }

    pub fn previous_page(&mut self) -> bool {
        self.pagination.previous()
    }

    pub fn next_page(&mut self, snapshot: &NotesSnapshot) -> bool {
        let count = self.filtered_count(snapshot);
        self.pagination.next(count)
    }

    /// Jump to a 1-based page, clamped to the current result set.
    pub fn go_to_page(&mut self, page: usize, snapshot: &NotesSnapshot) {
        let count = self.filtered_count(snapshot);
        self.pagination.go_to(page, count);
    }

    /// Derive the visible page from a snapshot.
    #[must_use]
    pub fn render(&self, snapshot: &NotesSnapshot) -> ListPage {
        let filtered = filter_notes(&snapshot.notes, &self.query);
        let filtered_count = filtered.len();
        let range = self.pagination.visible_range(filtered_count);

        let items = filtered[range]
            .iter()
            .map(|(position, note)| ListItem {
                note: (*note).clone(),
                position: *position,
                mode: self.item_mode(&note.id),
            })
            .collect();

        ListPage {
            items,
            query: self.query.clone(),
            page: self.pagination.page(),
            total_pages: self.pagination.total_pages(filtered_count),
            filtered_count,
            total_count: snapshot.notes.len(),
            can_go_previous: self.pagination.can_go_previous(),
            can_go_next: self.pagination.can_go_next(filtered_count),
            background_image: snapshot.background_image.clone(),
        }
    }

    #[must_use]
    pub fn item_mode(&self, id: &NoteId) -> ItemMode {
        match &self.editing {
            Some(session) if session.note_id == *id => ItemMode::Editing {
                draft: session.draft.clone(),
            },
            _ => ItemMode::Viewing,
        }
    }

    /// Enter editing for a note, buffering its current title.
    ///
    /// Any other item that was being edited returns to viewing. Returns
    /// `false` when the note is not in the snapshot.
    pub fn start_edit(&mut self, snapshot: &NotesSnapshot, id: &NoteId) -> bool {
        let Some(note) = snapshot.note(id) else {
            return false;
        };
        tracing::debug!(note_id = %id, "Editing note title");
        self.editing = Some(EditSession {
            note_id: *id,
            draft: note.title.clone(),
        });
        true
    }

    /// Replace the buffered title. Returns `false` when nothing is being edited.
    pub fn update_draft(&mut self, text: impl Into<String>) -> bool {
        let Some(session) = self.editing.as_mut() else {
            return false;
        };
        session.draft = text.into();
        true
    }

    /// Commit the buffered title and return to viewing.
    ///
    /// Returns whether the store changed; saving an unchanged title, or a
    /// note that was deleted meanwhile, changes nothing.
    pub fn save_edit(&mut self, store: &NoteStore) -> bool {
        let Some(session) = self.editing.take() else {
            return false;
        };
        let changed = store.edit_note(&session.note_id, NotePatch::title(session.draft));
        if !changed {
            tracing::debug!(note_id = %session.note_id, "Title edit left note unchanged");
        }
        changed
    }

    /// Discard the buffered title. Returns whether an edit was in progress.
    pub fn cancel_edit(&mut self) -> bool {
        self.editing.take().is_some()
    }

    /// Delete a note, leaving editing if it was the edit target.
    pub fn delete(&mut self, store: &NoteStore, id: &NoteId) -> bool {
        if self
            .editing
            .as_ref()
            .is_some_and(|session| session.note_id == *id)
        {
            self.editing = None;
        }
        store.delete_note(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewNote;
    use pretty_assertions::assert_eq;

    fn store_with(count: usize) -> NoteStore {
        let store = NoteStore::new();
        for index in 0..count {
            let tag = if index % 2 == 0 { "even" } else { "odd" };
            store.add_note(NewNote::new(format!("{index}.jpg"), format!("Note {index}")).with_tags([tag]));
        }
        store
    }

    fn titles(page: &ListPage) -> Vec<&str> {
        page.items.iter().map(|item| item.note.title.as_str()).collect()
    }

    #[test]
    fn renders_first_page_newest_first() {
        let store = store_with(25);
        let view = NoteListView::default();
        let page = view.render(&store.snapshot());

        assert_eq!(page.items.len(), 10);
        assert_eq!(page.items[0].note.title, "Note 24");
        assert_eq!(page.items[0].position, 0);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.filtered_count, 25);
        assert_eq!(page.total_count, 25);
        assert!(!page.can_go_previous);
        assert!(page.can_go_next);
    }

    #[test]
    fn pages_through_twenty_five_notes() {
        let store = store_with(25);
        let snapshot = store.snapshot();
        let mut view = NoteListView::default();

        assert!(view.next_page(&snapshot));
        assert!(view.next_page(&snapshot));
        let page = view.render(&snapshot);
        assert_eq!(page.page, 3);
        assert_eq!(page.items.len(), 5);
        assert!(!page.can_go_next);

        assert!(!view.next_page(&snapshot));
        assert_eq!(view.page(), 3);
    }

    #[test]
    fn filtered_items_keep_absolute_positions() {
        let store = store_with(4);
        let mut view = NoteListView::default();
        view.set_query("ODD");

        let page = view.render(&store.snapshot());
        assert_eq!(titles(&page), vec!["Note 3", "Note 1"]);
        assert_eq!(
            page.items.iter().map(|item| item.position).collect::<Vec<_>>(),
            vec![0, 2]
        );
    }

    #[test]
    fn empty_store_has_no_pages() {
        let store = NoteStore::new();
        let mut view = NoteListView::default();
        let page = view.render(&store.snapshot());

        assert!(page.items.is_empty());
        assert_eq!(page.total_pages, 0);
        assert!(!page.can_go_next);
        assert!(!page.can_go_previous);
        assert!(!view.next_page(&store.snapshot()));
    }

    #[test]
    fn keep_page_policy_renders_empty_page_after_narrowing() {
        let store = store_with(25);
        let snapshot = store.snapshot();
        let mut view = NoteListView::new(10, QueryChangePolicy::KeepPage);
        view.go_to_page(3, &snapshot);

        view.set_query("Note 1");
        let page = view.render(&snapshot);
        assert_eq!(page.page, 3);
        assert_eq!(page.filtered_count, 11);
        assert_eq!(page.total_pages, 2);
        assert!(page.items.is_empty());
        assert!(!page.can_go_next);
        assert!(page.can_go_previous);

        assert!(view.previous_page());
        assert_eq!(view.render(&snapshot).items.len(), 1);
    }

    #[test]
    fn reset_policy_returns_to_first_page() {
        let store = store_with(25);
        let snapshot = store.snapshot();
        let mut view = NoteListView::new(10, QueryChangePolicy::ResetToFirst);
        view.go_to_page(3, &snapshot);

        view.set_query("even");
        assert_eq!(view.page(), 1);
        assert_eq!(view.render(&snapshot).items.len(), 10);
    }

    #[test]
    fn unchanged_query_keeps_page_under_reset_policy() {
        let store = store_with(25);
        let snapshot = store.snapshot();
        let mut view = NoteListView::new(10, QueryChangePolicy::ResetToFirst);
        view.set_query("note");
        view.go_to_page(2, &snapshot);

        view.set_query("note");
        assert_eq!(view.page(), 2);
    }

    #[test]
    fn edit_flow_saves_title_only() {
        let store = NoteStore::new();
        let id = store.add_note(NewNote::new("a.jpg", "Groceries").with_tags(["food"]));
        let mut view = NoteListView::default();

        assert!(view.start_edit(&store.snapshot(), &id));
        assert_eq!(
            view.item_mode(&id),
            ItemMode::Editing {
                draft: "Groceries".to_string()
            }
        );

        assert!(view.update_draft("Market run"));
        assert!(view.save_edit(&store));
        assert_eq!(view.item_mode(&id), ItemMode::Viewing);

        let note = store.note(&id).unwrap();
        assert_eq!(note.title, "Market run");
        assert_eq!(note.uri, "a.jpg");
        assert_eq!(note.tags, vec!["food".to_string()]);
    }

    #[test]
    fn cancel_discards_draft() {
        let store = NoteStore::new();
        let id = store.add_note(NewNote::new("a.jpg", "Keep"));
        let mut view = NoteListView::default();

        view.start_edit(&store.snapshot(), &id);
        view.update_draft("Discard me");
        assert!(view.cancel_edit());
        assert!(view.editing().is_none());
        assert_eq!(store.note(&id).unwrap().title, "Keep");
        assert!(!view.cancel_edit());
    }

    #[test]
    fn only_one_item_edits_at_a_time() {
        let store = store_with(2);
        let snapshot = store.snapshot();
        let first = snapshot.notes[0].id;
        let second = snapshot.notes[1].id;
        let mut view = NoteListView::default();

        view.start_edit(&snapshot, &first);
        view.start_edit(&snapshot, &second);

        let page = view.render(&snapshot);
        let editing = page
            .items
            .iter()
            .filter(|item| matches!(item.mode, ItemMode::Editing { .. }))
            .map(|item| item.note.id)
            .collect::<Vec<_>>();
        assert_eq!(editing, vec![second]);
    }

    #[test]
    fn start_edit_unknown_note_is_rejected() {
        let store = store_with(1);
        let mut view = NoteListView::default();
        assert!(!view.start_edit(&store.snapshot(), &NoteId::new()));
        assert!(view.editing().is_none());
        assert!(!view.update_draft("nothing"));
        assert!(!view.save_edit(&store));
    }

    #[test]
    fn edit_targets_note_even_after_it_moves() {
        let store = NoteStore::new();
        let id = store.add_note(NewNote::new("a.jpg", "Old"));
        let mut view = NoteListView::default();
        view.start_edit(&store.snapshot(), &id);

        // A capture lands while editing and shifts every position by one.
        store.add_note(NewNote::new("b.jpg", "Newer"));
        view.update_draft("Renamed");
        assert!(view.save_edit(&store));

        let titles = store.notes().into_iter().map(|note| note.title).collect::<Vec<_>>();
        assert_eq!(titles, vec!["Newer".to_string(), "Renamed".to_string()]);
    }

    #[test]
    fn save_after_note_deleted_is_noop() {
        let store = NoteStore::new();
        let id = store.add_note(NewNote::new("a.jpg", "Gone soon"));
        let mut view = NoteListView::default();
        view.start_edit(&store.snapshot(), &id);

        store.delete_note(&id);
        assert!(!view.save_edit(&store));
        assert!(view.editing().is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn delete_clears_edit_target() {
        let store = store_with(2);
        let id = store.notes()[0].id;
        let mut view = NoteListView::default();
        view.start_edit(&store.snapshot(), &id);

        assert!(view.delete(&store, &id));
        assert!(view.editing().is_none());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn render_carries_background_image() {
        let store = NoteStore::new();
        store.update_background_image(Some("bg.jpg".to_string()));
        let page = NoteListView::default().render(&store.snapshot());
        assert_eq!(page.background_image.as_deref(), Some("bg.jpg"));
    }
}
