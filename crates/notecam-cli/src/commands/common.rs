use chrono::Utc;
use notecam_core::util::truncate_with_ellipsis;
use notecam_core::{ItemMode, ListItem, ListPage, Note, NoteId, NotesSnapshot};
use serde::Serialize;

use crate::error::CliError;

const TITLE_COLUMN_WIDTH: usize = 32;

#[derive(Debug, Serialize)]
pub struct NoteListItem {
    pub id: String,
    pub position: usize,
    pub uri: String,
    pub title: String,
    pub tags: Vec<String>,
    pub created_at: i64,
    pub updated_at: i64,
    pub relative_time: String,
    pub editing: bool,
}

#[derive(Debug, Serialize)]
pub struct NoteListPage {
    pub page: usize,
    pub total_pages: usize,
    pub filtered_count: usize,
    pub total_count: usize,
    pub query: String,
    pub background_image: Option<String>,
    pub notes: Vec<NoteListItem>,
}

pub fn normalize_note_identifier(id: &str) -> Result<String, CliError> {
    let trimmed = id.trim();
    if trimmed.is_empty() {
        Err(CliError::EmptyNoteId)
    } else {
        Ok(trimmed.to_string())
    }
}

/// Resolve a full note ID or a unique ID prefix against a snapshot.
pub fn resolve_note_id(note_query: &str, snapshot: &NotesSnapshot) -> Result<NoteId, CliError> {
    let note_query = normalize_note_identifier(note_query)?;

    if let Ok(note_id) = note_query.parse::<NoteId>() {
        if snapshot.note(&note_id).is_some() {
            return Ok(note_id);
        }
    }

    let matching_ids = snapshot.ids_with_prefix(&note_query);
    match matching_ids.as_slice() {
        [] => Err(CliError::NoteNotFound(note_query)),
        [note_id] => Ok(*note_id),
        _ => {
            let options = matching_ids
                .iter()
                .take(3)
                .map(NoteId::short)
                .collect::<Vec<_>>()
                .join(", ");

            Err(CliError::AmbiguousNoteId(format!(
                "ID prefix '{note_query}' is ambiguous; matches: {options}"
            )))
        }
    }
}

pub fn format_page_lines(page: &ListPage) -> Vec<String> {
    let now_ms = Utc::now().timestamp_millis();
    let mut lines = Vec::new();

    lines.push(page.background_image.as_ref().map_or_else(
        || "Background: default".to_string(),
        |uri| format!("Background: {uri}"),
    ));

    if page.total_count == 0 {
        lines.push("No saved notes yet. Capture one with `capture <path> --title <title>`.".to_string());
        return lines;
    }

    let query = page.query.trim();
    let query_label = if query.is_empty() {
        String::new()
    } else {
        format!(" matching \"{query}\"")
    };
    lines.push(format!(
        "Page {}/{}  ({} of {} notes{query_label})",
        page.page, page.total_pages, page.filtered_count, page.total_count
    ));

    if page.items.is_empty() {
        if page.filtered_count == 0 {
            lines.push("No notes match the current search.".to_string());
        } else {
            lines.push("Nothing on this page. Use `prev` or `page 1`.".to_string());
        }
    }

    for item in &page.items {
        lines.push(format_item_line(item, now_ms));
        if let ItemMode::Editing { draft } = &item.mode {
            lines.push(format!("       editing: \"{draft}\"  (draft <text> | save | cancel)"));
        }
    }

    let mut navigation = Vec::new();
    if page.can_go_previous {
        navigation.push("prev");
    }
    if page.can_go_next {
        navigation.push("next");
    }
    if !navigation.is_empty() {
        lines.push(format!("More: {}", navigation.join(" | ")));
    }

    lines
}

fn format_item_line(item: &ListItem, now_ms: i64) -> String {
    let short_id = item.note.id.short();
    let title = display_title(&item.note);
    let relative_time = format_relative_time(item.note.updated_at, now_ms);
    let tags = render_tags(&item.note);
    let position = item.position;
    let width = TITLE_COLUMN_WIDTH;

    if tags.is_empty() {
        format!("{position:>4}  {short_id:<13}  {title:<width$}  {relative_time}")
    } else {
        format!(
            "{position:>4}  {short_id:<13}  {title:<width$}  {relative_time:<10}  {tags}"
        )
    }
}

pub fn display_title(note: &Note) -> String {
    if note.title.trim().is_empty() {
        "(untitled)".to_string()
    } else {
        truncate_with_ellipsis(note.title.trim(), TITLE_COLUMN_WIDTH)
    }
}

pub fn page_to_list_page(page: &ListPage) -> NoteListPage {
    let now_ms = Utc::now().timestamp_millis();
    NoteListPage {
        page: page.page,
        total_pages: page.total_pages,
        filtered_count: page.filtered_count,
        total_count: page.total_count,
        query: page.query.clone(),
        background_image: page.background_image.clone(),
        notes: page
            .items
            .iter()
            .map(|item| note_to_list_item(item, now_ms))
            .collect(),
    }
}

pub fn note_to_list_item(item: &ListItem, now_ms: i64) -> NoteListItem {
    NoteListItem {
        id: item.note.id.to_string(),
        position: item.position,
        uri: item.note.uri.clone(),
        title: item.note.title.clone(),
        tags: item.note.tags.clone(),
        created_at: item.note.created_at,
        updated_at: item.note.updated_at,
        relative_time: format_relative_time(item.note.updated_at, now_ms),
        editing: matches!(item.mode, ItemMode::Editing { .. }),
    }
}

pub fn render_tags(note: &Note) -> String {
    note.tags
        .iter()
        .map(|tag| format!("#{tag}"))
        .collect::<Vec<String>>()
        .join(" ")
}

pub fn format_relative_time(timestamp_ms: i64, now_ms: i64) -> String {
    let diff = now_ms.saturating_sub(timestamp_ms);
    let minute = 60_000;
    let hour = 60 * minute;
    let day = 24 * hour;

    if diff < minute {
        "just now".to_string()
    } else if diff < hour {
        format!("{}m ago", diff / minute)
    } else if diff < day {
        format!("{}h ago", diff / hour)
    } else {
        format!("{}d ago", diff / day)
    }
}
