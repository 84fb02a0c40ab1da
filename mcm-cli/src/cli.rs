//! Command-line surface
//!
//! With no subcommand the interactive menu starts. Every other subcommand
//! runs a single operation against the selected profile and exits.

use crate::actions;
use crate::error::AppResult;
use crate::website::DEFAULT_OUTPUT_DIR;
use crate::App;
use clap::{Parser, Subcommand};
use mcm_common::db::User;
use mcm_common::Error;
use std::io::Write;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "mcm", version, about = "Personal movie collection manager")]
pub struct Cli {
    /// SQLite database file (overrides MCM_DATABASE and config.toml)
    #[arg(long, value_name = "PATH")]
    pub database: Option<PathBuf>,

    /// TOML config file (overrides MCM_CONFIG)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Profile to act as
    #[arg(long, short, env = "MCM_USER")]
    pub user: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List profiles
    Users,
    /// Create a profile
    AddUser { name: String },
    /// List the profile's movies
    List,
    /// Look a title up and add it
    Add {
        #[arg(required = true, num_args = 1..)]
        title: Vec<String>,
    },
    /// Delete a movie by exact title
    Delete {
        #[arg(required = true, num_args = 1..)]
        title: Vec<String>,
    },
    /// Replace a movie's note
    Note { title: String, note: String },
    /// Replace a movie's rating (0-10)
    Rate { title: String, rating: String },
    /// Average, median, best and worst movies
    Stats,
    /// Pick a random movie
    Random,
    /// Case-insensitive title search
    Search { query: String },
    /// Movies ordered by rating, best first
    Sort {
        /// Worst first
        #[arg(long)]
        ascending: bool,
    },
    /// Render every collection to a static site
    Website {
        #[arg(long, value_name = "DIR", default_value = DEFAULT_OUTPUT_DIR)]
        out: PathBuf,
    },
    /// Interactive menu (default)
    Menu,
}

impl Command {
    /// Whether the command acts on one profile's collection
    pub fn needs_owner(&self) -> bool {
        !matches!(
            self,
            Command::Users | Command::AddUser { .. } | Command::Website { .. } | Command::Menu
        )
    }
}

/// Resolve the profile for one-shot commands
///
/// An explicit name must exist. Without one, a lone profile is used
/// implicitly; otherwise the caller has to choose.
pub async fn resolve_owner(app: &App, requested: Option<&str>) -> AppResult<User> {
    if let Some(name) = requested {
        return app
            .users
            .find_by_name(name)
            .await?
            .ok_or_else(|| Error::NotFound(format!("user '{}'", name.trim())).into());
    }

    let mut users = app.users.list().await?;
    match users.len() {
        0 => Err(Error::InvalidInput(
            "no profiles yet; create one with `mcm add-user <name>`".to_string(),
        )
        .into()),
        1 => Ok(users.remove(0)),
        _ => Err(Error::InvalidInput(
            "several profiles exist; choose one with --user <name>".to_string(),
        )
        .into()),
    }
}

/// Run one non-interactive command
pub async fn run_command(
    app: &App,
    user: Option<&str>,
    command: Command,
    out: &mut dyn Write,
) -> AppResult<()> {
    let owner = if command.needs_owner() {
        Some(resolve_owner(app, user).await?)
    } else {
        None
    };
    let owner = owner.as_ref();

    match (command, owner) {
        (Command::Users, _) => actions::list_users(app, out).await,
        (Command::AddUser { name }, _) => actions::add_user(app, &name, out).await.map(|_| ()),
        (Command::Website { out: dir }, _) => actions::generate_site(app, &dir, out).await,
        (Command::Menu, _) => Ok(()),
        (Command::List, Some(owner)) => actions::list_movies(app, owner, out).await,
        (Command::Add { title }, Some(owner)) => {
            actions::add_movie(app, owner, &title.join(" "), out).await
        }
        (Command::Delete { title }, Some(owner)) => {
            actions::delete_movie(app, owner, &title.join(" "), out).await
        }
        (Command::Note { title, note }, Some(owner)) => {
            actions::update_note(app, owner, &title, &note, out).await
        }
        (Command::Rate { title, rating }, Some(owner)) => {
            actions::update_rating(app, owner, &title, &rating, out).await
        }
        (Command::Stats, Some(owner)) => actions::show_stats(app, owner, out).await,
        (Command::Random, Some(owner)) => actions::random_movie(app, owner, out).await,
        (Command::Search { query }, Some(owner)) => {
            actions::search_movies(app, owner, &query, out).await
        }
        (Command::Sort { ascending }, Some(owner)) => {
            actions::sorted_movies(app, owner, !ascending, out).await
        }
        (_, None) => Err(Error::Internal("command requires a profile".to_string()).into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_multi_word_title_collected() {
        let cli = Cli::try_parse_from(["mcm", "--user", "ana", "add", "the", "matrix"]).unwrap();
        assert_eq!(cli.user.as_deref(), Some("ana"));
        match cli.command {
            Some(Command::Add { title }) => assert_eq!(title.join(" "), "the matrix"),
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_no_subcommand_means_menu() {
        let cli = Cli::try_parse_from(["mcm"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_owner_requirements() {
        assert!(Command::List.needs_owner());
        assert!(Command::Sort { ascending: false }.needs_owner());
        assert!(!Command::Users.needs_owner());
        assert!(!Command::Website { out: PathBuf::from("x") }.needs_owner());
    }
}
