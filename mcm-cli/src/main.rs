//! mcm - personal movie collection manager
//!
//! Records movies per profile, enriches titles through OMDb, keeps them in
//! SQLite and renders a static HTML gallery.

use anyhow::Result;
use clap::Parser;
use mcm_cli::cli::{self, Cli, Command};
use mcm_cli::enrichment::{MetadataSource, OmdbClient};
use mcm_cli::website::DEFAULT_OUTPUT_DIR;
use mcm_cli::{menu, App};
use mcm_common::config::{Config, ENV_OMDB_API_KEY};
use std::io::Write;
use std::path::Path;
use std::process::ExitCode;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // A missing .env is normal
    let dotenv = dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = Config::resolve(cli.database.as_deref(), cli.config.as_deref())?;

    // Logs go to stderr so they never interleave with menu output
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    info!("Starting {}", mcm_cli::build_info());
    if let Some(path) = dotenv {
        info!("Loaded environment from {}", path.display());
    }
    if let Some(path) = &config.config_file {
        info!("Config file: {}", path.display());
    }
    info!("Database: {}", config.database_path.display());

    let pool = mcm_common::db::init_database(&config.database_path).await?;

    let source: Option<Box<dyn MetadataSource>> = match &config.omdb_api_key {
        Some(key) => {
            let client = OmdbClient::with_base_url(key.clone(), config.omdb_url.clone())?;
            Some(Box::new(client) as Box<dyn MetadataSource>)
        }
        None => {
            warn!(
                "OMDb API key not configured (set {} or omdb_api_key in config.toml); \
                 adding movies is disabled",
                ENV_OMDB_API_KEY
            );
            None
        }
    };

    let app = App::new(pool.clone(), source);
    let status = run(&app, cli).await;
    pool.close().await;

    match status {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(err) if err.is_recoverable() => {
            eprintln!("Error: {}", err);
            Ok(ExitCode::FAILURE)
        }
        Err(err) => {
            error!("Fatal: {}", err);
            Err(err.into())
        }
    }
}

async fn run(app: &App, cli: Cli) -> mcm_cli::AppResult<()> {
    let mut stdout = std::io::stdout();

    match cli.command.unwrap_or(Command::Menu) {
        Command::Menu => {
            let preselected = match cli.user.as_deref() {
                Some(name) => Some(cli::resolve_owner(app, Some(name)).await?),
                None => None,
            };
            let mut stdin = tokio::io::BufReader::new(tokio::io::stdin());
            menu::run_menu(
                app,
                preselected,
                Path::new(DEFAULT_OUTPUT_DIR),
                &mut stdin,
                &mut stdout,
            )
            .await?;
        }
        command => cli::run_command(app, cli.user.as_deref(), command, &mut stdout).await?,
    }

    stdout.flush()?;
    Ok(())
}
