//! Tag parsing and normalization
//!
//! Tags are free text attached to a note. They are trimmed and never empty;
//! matching against them is case-insensitive, so the original case is kept.

use std::collections::BTreeSet;

use super::Note;

/// Parse a comma-separated tag list as typed by the user.
///
/// # Examples
///
/// ```
/// use notecam_core::models::parse_tags;
///
/// let tags = parse_tags(" work, ,Ideas ,");
/// assert_eq!(tags, vec!["work".to_string(), "Ideas".to_string()]);
/// ```
#[must_use]
pub fn parse_tags(raw: &str) -> Vec<String> {
    normalize_tags(raw.split(','))
}

/// Trim every tag and drop the ones left empty, keeping caller order.
#[must_use]
pub fn normalize_tags<I, S>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    tags.into_iter()
        .filter_map(|tag| {
            let tag = tag.as_ref().trim();
            (!tag.is_empty()).then(|| tag.to_string())
        })
        .collect()
}

/// Return a sorted, deduplicated tag list discovered across notes.
#[must_use]
pub fn collect_note_tags(notes: &[Note]) -> Vec<String> {
    let mut tags = BTreeSet::new();
    for note in notes {
        for tag in &note.tags {
            tags.insert(tag.clone());
        }
    }
    tags.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewNote;

    #[test]
    fn parse_tags_splits_and_trims() {
        assert_eq!(parse_tags("food, dinner"), vec!["food", "dinner"]);
    }

    #[test]
    fn parse_tags_drops_empty_entries() {
        assert!(parse_tags("").is_empty());
        assert!(parse_tags(" , ,, ").is_empty());
        assert_eq!(parse_tags(",work,"), vec!["work"]);
    }

    #[test]
    fn normalize_tags_keeps_case_and_order() {
        let tags = normalize_tags(["  Zeta", "alpha ", "   "]);
        assert_eq!(tags, vec!["Zeta", "alpha"]);
    }

    #[test]
    fn collects_sorted_unique_tags() {
        let notes = vec![
            Note::from(NewNote::new("a.jpg", "Ship").with_tags(["work", "urgent"])),
            Note::from(NewNote::new("b.jpg", "Hike").with_tags(["personal", "urgent"])),
            Note::from(NewNote::new("c.jpg", "Plain")),
        ];

        assert_eq!(
            collect_note_tags(&notes),
            vec![
                "personal".to_string(),
                "urgent".to_string(),
                "work".to_string()
            ]
        );
    }
}
