//! notecam CLI - capture photo notes and browse them in a session
//!
//! Notes live only for the lifetime of the session.

mod cli;
mod commands;
mod error;
mod session;

use std::path::PathBuf;

use clap::Parser;
use notecam_core::AppConfig;

use crate::cli::{Cli, Commands};
use crate::commands::completions::run_completions;
use crate::error::CliError;
use crate::session::{run_interactive, run_script, Session};

const CONFIG_FILE_NAME: &str = "config.json";

#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    let config = load_config(&cli)?;

    match cli.command {
        Some(Commands::Completions { shell, output }) => {
            run_completions(shell, output.as_deref())?;
        }
        Some(Commands::Run { script }) => {
            let mut session = Session::new(&config);
            run_script(&mut session, &script).await?;
        }
        Some(Commands::Session) | None => {
            let mut session = Session::new(&config);
            run_interactive(&mut session).await?;
        }
    }

    Ok(())
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::from_default_env();
    let filter = match "notecam=info".parse() {
        Ok(directive) => filter.add_directive(directive),
        Err(_) => filter,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(cli: &Cli) -> Result<AppConfig, CliError> {
    let path = cli.config.clone().or_else(default_config_path);
    let mut config = match path {
        Some(path) => AppConfig::load_from_path(&path)?,
        None => AppConfig::default(),
    };
    config.apply_env_overrides()?;
    apply_cli_overrides(&mut config, cli)?;
    tracing::debug!(
        page_size = config.page_size,
        policy = ?config.query_change,
        "Resolved configuration"
    );
    Ok(config)
}

fn apply_cli_overrides(config: &mut AppConfig, cli: &Cli) -> Result<(), CliError> {
    if let Some(page_size) = cli.page_size {
        if page_size == 0 {
            return Err(CliError::Config("--page-size must be at least 1".to_string()));
        }
        config.page_size = page_size;
    }
    if let Some(policy) = cli.policy {
        config.query_change = policy.into();
    }
    Ok(())
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("notecam").join(CONFIG_FILE_NAME))
}
