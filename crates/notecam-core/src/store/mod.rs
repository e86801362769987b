//! Observable note store
//!
//! `NoteStore` is the single owner of the note collection and the background
//! image. Every mutation is expressed as a [`NoteCommand`] applied to the
//! current immutable [`NotesSnapshot`]; when the command changes state the new
//! snapshot is installed and every subscriber is called with it.
//!
//! The store is single-threaded (`Rc`/`RefCell`), matching the event-driven
//! model of the front ends: each mutation completes, including notification,
//! before the call returns. A subscriber may dispatch again; the nested change
//! is delivered to every subscriber and the outer delivery of the older
//! snapshot stops, so the last snapshot each subscriber sees is the current one.

mod snapshot;

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use std::sync::Arc;

pub use snapshot::NotesSnapshot;

use crate::models::{parse_tags, NewNote, Note, NoteId, NotePatch};

/// Callback invoked with the new snapshot after every state change.
pub type Subscriber = Rc<dyn Fn(&Arc<NotesSnapshot>)>;

type SubscriberList = RefCell<Vec<(u64, Subscriber)>>;

/// A mutation request against the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteCommand {
    /// Prepend a note; ignored when a note with the same id already exists
    Add(Note),
    /// Remove the note with this id
    Delete(NoteId),
    /// Merge a partial update into the note with this id
    Edit(NoteId, NotePatch),
    /// Replace (or clear) the background image
    SetBackground(Option<String>),
}

/// Outcome of dispatching a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    /// A note was added with this id
    Added(NoteId),
    /// State changed
    Changed,
    /// Nothing to do (unknown id, out-of-range position, identical value)
    Unchanged,
}

impl Applied {
    #[must_use]
    pub const fn is_changed(self) -> bool {
        !matches!(self, Self::Unchanged)
    }
}

/// Handle returned by [`NoteStore::subscribe`]; dropping it unsubscribes.
#[must_use = "dropping a Subscription immediately unsubscribes"]
pub struct Subscription {
    id: u64,
    subscribers: Weak<SubscriberList>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(subscribers) = self.subscribers.upgrade() {
            subscribers
                .borrow_mut()
                .retain(|(subscriber_id, _)| *subscriber_id != self.id);
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

/// Session-scoped store of notes and the background image.
pub struct NoteStore {
    state: RefCell<Arc<NotesSnapshot>>,
    subscribers: Rc<SubscriberList>,
    next_subscriber_id: Cell<u64>,
}

impl Default for NoteStore {
    fn default() -> Self {
        Self::new()
    }
}

impl NoteStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: RefCell::new(Arc::new(NotesSnapshot::default())),
            subscribers: Rc::new(RefCell::new(Vec::new())),
            next_subscriber_id: Cell::new(0),
        }
    }

    /// Current immutable snapshot
    #[must_use]
    pub fn snapshot(&self) -> Arc<NotesSnapshot> {
        Arc::clone(&self.state.borrow())
    }

    /// Notes in display order (newest first)
    #[must_use]
    pub fn notes(&self) -> Vec<Note> {
        self.snapshot().notes.clone()
    }

    #[must_use]
    pub fn background_image(&self) -> Option<String> {
        self.snapshot().background_image.clone()
    }

    #[must_use]
    pub fn note(&self, id: &NoteId) -> Option<Note> {
        self.snapshot().note(id).cloned()
    }

    #[must_use]
    pub fn position_of(&self, id: &NoteId) -> Option<usize> {
        self.snapshot().position_of(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.state.borrow().notes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Register a callback called with every new snapshot.
    pub fn subscribe(&self, subscriber: impl Fn(&Arc<NotesSnapshot>) + 'static) -> Subscription {
        let id = self.next_subscriber_id.get();
        self.next_subscriber_id.set(id + 1);
        self.subscribers
            .borrow_mut()
            .push((id, Rc::new(subscriber)));
        Subscription {
            id,
            subscribers: Rc::downgrade(&self.subscribers),
        }
    }

    /// Apply a command to the current snapshot and notify on change.
    pub fn dispatch(&self, command: NoteCommand) -> Applied {
        let current = self.snapshot();
        let Some((next, applied)) = current.apply(command) else {
            tracing::trace!(version = current.version, "Note command left state unchanged");
            return Applied::Unchanged;
        };

        let next = Arc::new(next);
        *self.state.borrow_mut() = Arc::clone(&next);
        tracing::debug!(
            version = next.version,
            notes = next.notes.len(),
            ?applied,
            "Applied note command"
        );
        self.notify(&next);
        applied
    }

    /// Prepend a note and return its id. Always succeeds.
    pub fn add_note(&self, new_note: NewNote) -> NoteId {
        let note = Note::from(new_note);
        let id = note.id;
        self.dispatch(NoteCommand::Add(note));
        id
    }

    /// Capture-flow entry: parse a comma-separated tag string, then add.
    pub fn add_note_from_input(
        &self,
        uri: impl Into<String>,
        title: impl Into<String>,
        raw_tags: &str,
    ) -> NoteId {
        self.add_note(NewNote {
            uri: uri.into(),
            title: title.into(),
            tags: Some(parse_tags(raw_tags)),
        })
    }

    /// Delete by id; unknown ids are a no-op returning `false`.
    pub fn delete_note(&self, id: &NoteId) -> bool {
        self.dispatch(NoteCommand::Delete(*id)).is_changed()
    }

    /// Delete the note at a zero-based position in the current order.
    ///
    /// Out-of-range positions are a no-op returning `false`.
    pub fn delete_note_at(&self, position: usize) -> bool {
        let Some(id) = self.id_at(position) else {
            return false;
        };
        self.delete_note(&id)
    }

    /// Merge `patch` into the note with this id; unknown ids are a no-op.
    pub fn edit_note(&self, id: &NoteId, patch: NotePatch) -> bool {
        self.dispatch(NoteCommand::Edit(*id, patch)).is_changed()
    }

    /// Merge `patch` into the note at a zero-based position; out of range is a no-op.
    pub fn edit_note_at(&self, position: usize, patch: NotePatch) -> bool {
        let Some(id) = self.id_at(position) else {
            return false;
        };
        self.edit_note(&id, patch)
    }

    /// Replace the background image; `None` clears it.
    pub fn update_background_image(&self, uri: Option<String>) -> bool {
        self.dispatch(NoteCommand::SetBackground(uri)).is_changed()
    }

    fn id_at(&self, position: usize) -> Option<NoteId> {
        self.state.borrow().note_at(position).map(|note| note.id)
    }

    fn notify(&self, snapshot: &Arc<NotesSnapshot>) {
        // Copy so subscribers may subscribe, unsubscribe or dispatch re-entrantly.
        let subscribers = self
            .subscribers
            .borrow()
            .iter()
            .map(|(_, subscriber)| Rc::clone(subscriber))
            .collect::<Vec<_>>();
        for subscriber in subscribers {
            // A nested dispatch already delivered a newer snapshot to everyone.
            if self.state.borrow().version != snapshot.version {
                tracing::trace!(
                    version = snapshot.version,
                    "Superseded snapshot, stopping notification"
                );
                break;
            }
            subscriber(snapshot);
        }
    }
}
