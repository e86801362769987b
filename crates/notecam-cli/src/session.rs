//! Interactive and scripted notecam sessions.
//!
//! A session owns the note store and the list view for the lifetime of the
//! process. Commands are applied one at a time; when a command changes the
//! store, the subscription flags the list for a refresh and the current page
//! is rendered after the command output.

use std::cell::Cell;
use std::io::{self, IsTerminal, Write};
use std::path::Path;
use std::rc::Rc;

use clap::error::ErrorKind;
use clap::Parser;
use notecam_core::{AppConfig, NoteListView, NoteStore, Subscription};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::cli::{SessionCommand, SessionLine};
use crate::commands::{capture, common, edit, export, list};
use crate::error::CliError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Flow {
    #[default]
    Continue,
    Quit,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outcome {
    pub lines: Vec<String>,
    pub flow: Flow,
}

impl Outcome {
    fn with_lines(lines: Vec<String>) -> Self {
        Self {
            lines,
            flow: Flow::Continue,
        }
    }
}

pub struct Session {
    store: NoteStore,
    view: NoteListView,
    refresh_pending: Rc<Cell<bool>>,
    _subscription: Subscription,
}

impl Session {
    pub fn new(config: &AppConfig) -> Self {
        let store = NoteStore::new();
        let refresh_pending = Rc::new(Cell::new(false));
        let flag = Rc::clone(&refresh_pending);
        let subscription = store.subscribe(move |snapshot| {
            tracing::debug!(version = snapshot.version, "Note list refresh scheduled");
            flag.set(true);
        });

        Self {
            store,
            view: NoteListView::from_config(config),
            refresh_pending,
            _subscription: subscription,
        }
    }

    pub const fn store(&self) -> &NoteStore {
        &self.store
    }

    pub const fn view(&self) -> &NoteListView {
        &self.view
    }

    /// Parse and run one input line. Blank lines and `#` comments do nothing.
    pub async fn execute_line(&mut self, line: &str) -> Result<Outcome, CliError> {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return Ok(Outcome::default());
        }

        let words = shell_words::split(trimmed)
            .map_err(|error| CliError::InvalidCommand(format!("Could not parse line: {error}")))?;
        match SessionLine::try_parse_from(words) {
            Ok(parsed) => self.execute(parsed.command).await,
            Err(error) if error.kind() == ErrorKind::DisplayHelp => {
                Ok(Outcome::with_lines(vec![error.to_string().trim_end().to_string()]))
            }
            Err(error) => Err(CliError::InvalidCommand(error.to_string().trim_end().to_string())),
        }
    }

    pub async fn execute(&mut self, command: SessionCommand) -> Result<Outcome, CliError> {
        let snapshot = self.store.snapshot();
        let mut lines = match command {
            SessionCommand::Capture { path, title, tags } => {
                capture::run_capture(&self.store, &path, &title, &tags).await?
            }
            SessionCommand::Add { uri, title, tags } => {
                capture::run_add(&self.store, &uri, &title, &tags)
            }
            SessionCommand::List { json } => list::run_list(&self.view, &snapshot, json)?,
            SessionCommand::Search { query } => list::run_search(&mut self.view, &snapshot, &query),
            SessionCommand::Next => list::run_next(&mut self.view, &snapshot),
            SessionCommand::Prev => list::run_prev(&mut self.view, &snapshot),
            SessionCommand::Page { number } => list::run_page(&mut self.view, &snapshot, number),
            SessionCommand::Tags => list::run_tags(&snapshot),
            SessionCommand::Edit { id } => edit::run_edit(&self.store, &mut self.view, &id)?,
            SessionCommand::Draft { text } => edit::run_draft(&mut self.view, &text)?,
            SessionCommand::Save => edit::run_save(&self.store, &mut self.view)?,
            SessionCommand::Cancel => edit::run_cancel(&mut self.view)?,
            SessionCommand::Delete { id } => edit::run_delete(&self.store, &mut self.view, &id)?,
            SessionCommand::DeleteAt { position } => {
                edit::run_delete_at(&self.store, &mut self.view, position)
            }
            SessionCommand::Background { path, clear } => {
                capture::run_background(&self.store, path.as_deref(), clear).await?
            }
            SessionCommand::Export { format, output } => {
                let output = output.as_ref().map(Option::as_deref);
                export::run_export(&snapshot, format, output).await?
            }
            SessionCommand::Quit => {
                return Ok(Outcome {
                    lines: Vec::new(),
                    flow: Flow::Quit,
                });
            }
        };

        if self.refresh_pending.replace(false) {
            lines.extend(common::format_page_lines(&self.view.render(&self.store.snapshot())));
        }
        Ok(Outcome::with_lines(lines))
    }
}

/// Read commands from stdin until EOF or `quit`.
pub async fn run_interactive(session: &mut Session) -> Result<(), CliError> {
    let interactive = io::stdin().is_terminal();
    tracing::info!("Session started");

    if interactive {
        print_lines(&common::format_page_lines(
            &session.view().render(&session.store().snapshot()),
        ));
        println!("Type `help` for commands.");
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        if interactive {
            print!("notecam> ");
            io::stdout().flush()?;
        }
        let Some(line) = lines.next_line().await? else {
            break;
        };
        if run_line(session, &line).await == Flow::Quit {
            break;
        }
    }

    tracing::info!(notes = session.store().len(), "Session ended");
    Ok(())
}

/// Replay a script of session commands.
pub async fn run_script(session: &mut Session, script: &Path) -> Result<(), CliError> {
    let contents = tokio::fs::read_to_string(script).await?;
    tracing::info!("Running script {}", script.display());

    for line in contents.lines() {
        if run_line(session, line).await == Flow::Quit {
            break;
        }
    }
    Ok(())
}

async fn run_line(session: &mut Session, line: &str) -> Flow {
    match session.execute_line(line).await {
        Ok(outcome) => {
            print_lines(&outcome.lines);
            outcome.flow
        }
        Err(error) => {
            eprintln!("Error: {error}");
            Flow::Continue
        }
    }
}

fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{line}");
    }
}
