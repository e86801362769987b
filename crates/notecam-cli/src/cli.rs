use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use notecam_core::export;
use notecam_core::QueryChangePolicy;

#[derive(Parser)]
#[command(name = "notecam")]
#[command(about = "Capture photo notes, tag them, and browse them in a session")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Optional path to the JSON config file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Notes shown per page (overrides config and NOTECAM_PAGE_SIZE)
    #[arg(long, global = true, value_name = "N")]
    pub page_size: Option<usize>,

    /// Page handling when the search query changes
    #[arg(long, global = true, value_enum, value_name = "POLICY")]
    pub policy: Option<PolicyArg>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start an interactive session (default)
    Session,
    /// Replay session commands from a script, one per line
    Run {
        /// Script path
        script: PathBuf,
    },
    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: CompletionShell,
        /// Optional output path (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum PolicyArg {
    KeepPage,
    ResetToFirst,
}

impl From<PolicyArg> for QueryChangePolicy {
    fn from(value: PolicyArg) -> Self {
        match value {
            PolicyArg::KeepPage => Self::KeepPage,
            PolicyArg::ResetToFirst => Self::ResetToFirst,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum ExportFormat {
    Json,
    Markdown,
}

impl From<ExportFormat> for export::ExportFormat {
    fn from(value: ExportFormat) -> Self {
        match value {
            ExportFormat::Json => Self::Json,
            ExportFormat::Markdown => Self::Markdown,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
}

/// One line typed into a session.
#[derive(Parser, Debug)]
#[command(name = "notecam", no_binary_name = true, disable_version_flag = true)]
pub struct SessionLine {
    #[command(subcommand)]
    pub command: SessionCommand,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum SessionCommand {
    /// Capture a photo note from a local image file
    Capture {
        /// Image file path
        path: PathBuf,
        /// Note title
        #[arg(short, long, default_value = "", allow_hyphen_values = true)]
        title: String,
        /// Comma-separated tags
        #[arg(long, default_value = "", allow_hyphen_values = true)]
        tags: String,
    },
    /// Add a note for an existing image reference
    Add {
        /// Image URI (file://, content://, ...)
        uri: String,
        /// Note title
        #[arg(short, long, default_value = "", allow_hyphen_values = true)]
        title: String,
        /// Comma-separated tags
        #[arg(long, default_value = "", allow_hyphen_values = true)]
        tags: String,
    },
    /// Show the current page
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Set the search query (no words clears it)
    Search {
        /// Query words
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        query: Vec<String>,
    },
    /// Go to the next page
    Next,
    /// Go to the previous page
    #[command(alias = "previous")]
    Prev,
    /// Jump to a page
    Page {
        /// 1-based page number
        number: usize,
    },
    /// List every tag in use
    Tags,
    /// Start editing a note title
    Edit {
        /// Note ID or unique ID prefix
        id: String,
    },
    /// Replace the title being edited
    Draft {
        /// New title words
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        text: Vec<String>,
    },
    /// Save the title being edited
    Save,
    /// Discard the title being edited
    Cancel,
    /// Delete a note
    Delete {
        /// Note ID or unique ID prefix
        id: String,
    },
    /// Delete the note at a zero-based position in the full list
    DeleteAt {
        /// Position in the unfiltered, newest-first list
        position: usize,
    },
    /// Choose the background image; no path cancels the selection
    Background {
        /// Image file path
        path: Option<PathBuf>,
        /// Clear the background image
        #[arg(long, conflicts_with = "path")]
        clear: bool,
    },
    /// Export the notes of this session
    Export {
        /// Export format
        #[arg(long, value_enum, default_value_t = ExportFormat::Json)]
        format: ExportFormat,
        /// Write to a file instead of stdout; a directory or no value uses a
        /// generated `notecam-export-<millis>.<ext>` name
        #[arg(short, long, value_name = "PATH")]
        output: Option<Option<PathBuf>>,
    },
    /// End the session
    #[command(alias = "exit")]
    Quit,
}
