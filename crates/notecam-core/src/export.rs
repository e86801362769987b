//! Note export helpers (JSON and Markdown).

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::Note;

/// Export output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExportFormat {
    Json,
    Markdown,
}

impl ExportFormat {
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Markdown => "md",
        }
    }
}

/// Serializable note representation used in JSON and Markdown exports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportNote {
    pub id: String,
    pub uri: String,
    pub title: String,
    pub tags: Vec<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Convert a note into an export record with stable tag ordering.
#[must_use]
pub fn note_to_export_item(note: &Note) -> ExportNote {
    let mut tags = note.tags.clone();
    tags.sort();

    ExportNote {
        id: note.id.to_string(),
        uri: note.uri.clone(),
        title: note.title.clone(),
        tags,
        created_at: note.created_at,
        updated_at: note.updated_at,
    }
}

/// Render notes as pretty-printed JSON.
pub fn render_json_export(notes: &[Note]) -> serde_json::Result<String> {
    let items = notes
        .iter()
        .map(note_to_export_item)
        .collect::<Vec<ExportNote>>();
    serde_json::to_string_pretty(&items)
}

/// Render notes in Markdown with frontmatter blocks.
#[must_use]
pub fn render_markdown_export(notes: &[Note]) -> String {
    let mut output = String::new();

    for (index, note) in notes.iter().enumerate() {
        if index > 0 {
            output.push('\n');
        }

        let export_note = note_to_export_item(note);
        let _ = writeln!(output, "---");
        let _ = writeln!(output, "id: {}", export_note.id);
        let _ = writeln!(output, "uri: {}", yaml_string(&export_note.uri));
        let _ = writeln!(output, "created_at: {}", export_note.created_at);
        let _ = writeln!(output, "updated_at: {}", export_note.updated_at);
        let _ = writeln!(output, "tags:");
        for tag in &export_note.tags {
            let _ = writeln!(output, "  - {}", yaml_string(tag));
        }
        let _ = writeln!(output, "---");
        let _ = writeln!(output);
        let _ = writeln!(output, "# {}", single_line(&export_note.title));
        let _ = writeln!(output);
        let _ = writeln!(
            output,
            "![{}]({})",
            escape_link_text(&export_note.title),
            link_destination(&export_note.uri)
        );
    }

    output
}

// JSON strings are valid YAML double-quoted scalars.
fn yaml_string(value: &str) -> String {
    serde_json::Value::from(value).to_string()
}

fn single_line(value: &str) -> String {
    value
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn escape_link_text(value: &str) -> String {
    let mut escaped = String::new();
    for ch in single_line(value).chars() {
        if matches!(ch, '\\' | '[' | ']') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

/// Angle-bracket destination so spaces and parentheses survive.
fn link_destination(uri: &str) -> String {
    let mut destination = String::from("<");
    for ch in single_line(uri).chars() {
        if matches!(ch, '\\' | '<' | '>') {
            destination.push('\\');
        }
        destination.push(ch);
    }
    destination.push('>');
    destination
}

/// Render notes based on selected export format.
pub fn render_notes_export(notes: &[Note], format: ExportFormat) -> serde_json::Result<String> {
    match format {
        ExportFormat::Json => render_json_export(notes),
        ExportFormat::Markdown => Ok(render_markdown_export(notes)),
    }
}

/// Build a deterministic default file name for export flows.
#[must_use]
pub fn suggested_export_file_name(format: ExportFormat, timestamp_ms: i64) -> String {
    format!("notecam-export-{timestamp_ms}.{}", format.extension())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NoteId;

    fn fixed_note() -> Note {
        Note {
            id: "cccccccc-cccc-7ccc-8ccc-111111111111".parse::<NoteId>().unwrap(),
            uri: "file:///photos/receipt.jpg".to_string(),
            title: "Receipt".to_string(),
            tags: vec!["zeta".to_string(), "alpha".to_string()],
            created_at: 123,
            updated_at: 456,
        }
    }

    #[test]
    fn note_to_export_item_sorts_tags() {
        let export = note_to_export_item(&fixed_note());
        assert_eq!(export.tags, vec!["alpha", "zeta"]);
    }

    #[test]
    fn render_json_export_keeps_fields() {
        let rendered = render_json_export(&[fixed_note()]).unwrap();
        let parsed: Vec<ExportNote> = serde_json::from_str(&rendered).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].title, "Receipt");
        assert_eq!(parsed[0].uri, "file:///photos/receipt.jpg");
    }

    #[test]
    fn render_markdown_export_includes_frontmatter_and_image() {
        let rendered = render_markdown_export(&[fixed_note()]);
        assert!(rendered.contains("id: cccccccc-cccc-7ccc-8ccc-111111111111"));
        assert!(rendered.contains("created_at: 123"));
        assert!(rendered.contains("updated_at: 456"));
        assert!(rendered.contains("uri: \"file:///photos/receipt.jpg\""));
        assert!(rendered.contains("tags:\n  - \"alpha\"\n  - \"zeta\""));
        assert!(rendered.contains("# Receipt"));
        assert!(rendered.contains("![Receipt](<file:///photos/receipt.jpg>)"));
    }

    #[test]
    fn render_markdown_export_escapes_hostile_title_and_uri() {
        let mut note = fixed_note();
        note.title = "Line one\n---\n[draft]".to_string();
        note.uri = "file:///my photos/a (1).jpg".to_string();
        note.tags = vec!["a: b".to_string()];

        let rendered = render_markdown_export(&[note]);
        assert_eq!(rendered.lines().filter(|line| *line == "---").count(), 2);
        assert!(rendered.contains("uri: \"file:///my photos/a (1).jpg\""));
        assert!(rendered.contains("  - \"a: b\""));
        assert!(rendered.contains("# Line one --- [draft]\n"));
        assert!(rendered.contains("![Line one --- \\[draft\\]](<file:///my photos/a (1).jpg>)"));
    }

    #[test]
    fn render_markdown_export_empty_is_empty() {
        assert!(render_markdown_export(&[]).is_empty());
    }

    #[test]
    fn suggested_export_file_name_uses_format_extension() {
        assert_eq!(
            suggested_export_file_name(ExportFormat::Json, 123),
            "notecam-export-123.json"
        );
        assert_eq!(
            suggested_export_file_name(ExportFormat::Markdown, 456),
            "notecam-export-456.md"
        );
    }
}
