use notecam_core::models::collect_note_tags;
use notecam_core::{NoteListView, NotesSnapshot};

use crate::commands::common::{format_page_lines, page_to_list_page};
use crate::error::CliError;

pub fn run_list(
    view: &NoteListView,
    snapshot: &NotesSnapshot,
    as_json: bool,
) -> Result<Vec<String>, CliError> {
    let page = view.render(snapshot);
    if as_json {
        let json_page = page_to_list_page(&page);
        Ok(vec![serde_json::to_string_pretty(&json_page)?])
    } else {
        Ok(format_page_lines(&page))
    }
}

pub fn run_search(view: &mut NoteListView, snapshot: &NotesSnapshot, query: &[String]) -> Vec<String> {
    view.set_query(query.join(" "));
    format_page_lines(&view.render(snapshot))
}

pub fn run_next(view: &mut NoteListView, snapshot: &NotesSnapshot) -> Vec<String> {
    if !view.next_page(snapshot) {
        return vec!["Already on the last page".to_string()];
    }
    format_page_lines(&view.render(snapshot))
}

pub fn run_prev(view: &mut NoteListView, snapshot: &NotesSnapshot) -> Vec<String> {
    if !view.previous_page() {
        return vec!["Already on the first page".to_string()];
    }
    format_page_lines(&view.render(snapshot))
}

pub fn run_page(view: &mut NoteListView, snapshot: &NotesSnapshot, number: usize) -> Vec<String> {
    view.go_to_page(number, snapshot);
    format_page_lines(&view.render(snapshot))
}

pub fn run_tags(snapshot: &NotesSnapshot) -> Vec<String> {
    let tags = collect_note_tags(&snapshot.notes);
    if tags.is_empty() {
        return vec!["No tags yet".to_string()];
    }
    tags.into_iter().map(|tag| format!("#{tag}")).collect()
}
