//! Note list filtering (title + tag search).

use crate::models::Note;

/// Normalize a raw search query for matching.
#[must_use]
pub fn normalize_query(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Whether a note matches an already-normalized query.
///
/// The query matches when it is a substring of the title or of any tag,
/// ignoring case. An empty query matches every note.
#[must_use]
pub fn note_matches_query(note: &Note, normalized_query: &str) -> bool {
    if normalized_query.is_empty() {
        return true;
    }
    note.title.to_lowercase().contains(normalized_query)
        || note
            .tags
            .iter()
            .any(|tag| tag.to_lowercase().contains(normalized_query))
}

/// Filter notes by case-insensitive text query, keeping each note's absolute
/// position in the unfiltered collection.
#[must_use]
pub fn filter_notes<'a>(notes: &'a [Note], search_query: &str) -> Vec<(usize, &'a Note)> {
    let normalized_query = normalize_query(search_query);
    notes
        .iter()
        .enumerate()
        .filter(|(_, note)| note_matches_query(note, &normalized_query))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewNote;

    fn sample_notes() -> Vec<Note> {
        vec![
            Note::from(NewNote::new("a.jpg", "Meeting Notes").with_tags(["work"])),
            Note::from(NewNote::new("b.jpg", "Recipe").with_tags(["food", "dinner"])),
        ]
    }

    #[test]
    fn matches_tag_case_insensitively() {
        let notes = sample_notes();
        let filtered = filter_notes(&notes, "WORK");

        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].0, 0);
        assert_eq!(filtered[0].1.title, "Meeting Notes");
    }

    #[test]
    fn matches_title_substring() {
        let notes = sample_notes();
        let filtered = filter_notes(&notes, "cip");

        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].0, 1);
    }

    #[test]
    fn matches_partial_tag() {
        let notes = sample_notes();
        let filtered = filter_notes(&notes, "dinn");
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].1.title, "Recipe");
    }

    #[test]
    fn empty_query_matches_everything() {
        let notes = sample_notes();
        assert_eq!(filter_notes(&notes, "").len(), 2);
        assert_eq!(filter_notes(&notes, "   ").len(), 2);
    }

    #[test]
    fn no_match_returns_empty() {
        let notes = sample_notes();
        assert!(filter_notes(&notes, "gym").is_empty());
    }
}
