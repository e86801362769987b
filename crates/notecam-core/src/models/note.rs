//! Note model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::tag::normalize_tags;
use crate::util::unix_timestamp_millis_now;

/// A unique identifier for a note, using UUID v7 (time-sortable)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NoteId(Uuid);

impl NoteId {
    /// Create a new unique note ID using UUID v7
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Get the string representation of this ID
    #[must_use]
    pub fn as_str(&self) -> String {
        self.0.to_string()
    }

    /// Short display form used in list output.
    #[must_use]
    pub fn short(&self) -> String {
        self.as_str().chars().take(13).collect()
    }
}

impl Default for NoteId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for NoteId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// A captured photo note
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Unique identifier
    pub id: NoteId,
    /// Image reference (file or content URI)
    pub uri: String,
    /// Free text title
    pub title: String,
    /// Trimmed, non-empty tags
    pub tags: Vec<String>,
    /// Creation timestamp (Unix ms)
    pub created_at: i64,
    /// Last update timestamp (Unix ms)
    pub updated_at: i64,
}

impl Note {
    /// Create a new note. Tags are normalized; `uri` and `title` are stored as given.
    #[must_use]
    pub fn new<I, S>(uri: impl Into<String>, title: impl Into<String>, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let now = unix_timestamp_millis_now();
        Self {
            id: NoteId::new(),
            uri: uri.into(),
            title: title.into(),
            tags: normalize_tags(tags),
            created_at: now,
            updated_at: now,
        }
    }

    /// Merge the fields present in `patch` into this note.
    ///
    /// Returns `true` when any field actually changed; `updated_at` is only
    /// bumped in that case.
    pub fn apply_patch(&mut self, patch: NotePatch) -> bool {
        let mut changed = false;

        if let Some(uri) = patch.uri {
            if uri != self.uri {
                self.uri = uri;
                changed = true;
            }
        }
        if let Some(title) = patch.title {
            if title != self.title {
                self.title = title;
                changed = true;
            }
        }
        if let Some(tags) = patch.tags {
            let tags = normalize_tags(tags);
            if tags != self.tags {
                self.tags = tags;
                changed = true;
            }
        }

        if changed {
            self.updated_at = unix_timestamp_millis_now().max(self.updated_at);
        }
        changed
    }
}

impl From<NewNote> for Note {
    fn from(new_note: NewNote) -> Self {
        Self::new(
            new_note.uri,
            new_note.title,
            new_note.tags.unwrap_or_default(),
        )
    }
}

/// Input for creating a note. Omitted tags mean an empty tag list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewNote {
    pub uri: String,
    pub title: String,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

impl NewNote {
    #[must_use]
    pub fn new(uri: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            title: title.into(),
            tags: None,
        }
    }

    #[must_use]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }
}

/// Partial update for a note; `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotePatch {
    #[serde(default)]
    pub uri: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

impl NotePatch {
    /// Patch that only replaces the title
    #[must_use]
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    /// Patch that only replaces the image reference
    #[must_use]
    pub fn uri(uri: impl Into<String>) -> Self {
        Self {
            uri: Some(uri.into()),
            ..Self::default()
        }
    }

    /// Patch that only replaces the tags
    #[must_use]
    pub fn tags<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tags: Some(tags.into_iter().map(Into::into).collect()),
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.uri.is_none() && self.title.is_none() && self.tags.is_none()
    }
}
