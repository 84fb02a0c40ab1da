//! Interactive numbered menu
//!
//! Reads one line per prompt. End of input behaves like choosing "Exit".
//! Recoverable errors are printed and the loop continues; anything else is
//! returned to the caller.

use crate::actions;
use crate::error::AppResult;
use crate::App;
use mcm_common::db::User;
use std::io::Write;
use std::path::Path;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::debug;

const MENU: &str = "
********** My Movies Database **********
Menu:
0. Exit
1. List movies
2. Add movie
3. Delete movie
4. Update movie (add note)
5. Stats
6. Random movie
7. Search movie
8. Movies sorted by rating
9. Generate website
10. Update rating
";

/// Print `label`, read one trimmed line; `None` at end of input
async fn prompt<R>(input: &mut R, out: &mut dyn Write, label: &str) -> AppResult<Option<String>>
where
    R: AsyncBufRead + Unpin,
{
    write!(out, "{}", label)?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line).await? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Print recoverable errors and swallow them; pass everything else up
fn report(result: AppResult<()>, out: &mut dyn Write) -> AppResult<()> {
    match result {
        Err(err) if err.is_recoverable() => {
            debug!(error = %err, "Operation failed");
            writeln!(out, "Error: {}", err)?;
            Ok(())
        }
        other => other,
    }
}

/// Choose an existing profile or create one; `None` at end of input
pub async fn select_profile<R>(app: &App, input: &mut R, out: &mut dyn Write) -> AppResult<Option<User>>
where
    R: AsyncBufRead + Unpin,
{
    loop {
        let users = app.users.list().await?;
        if users.is_empty() {
            writeln!(out, "No users found. Create a new user:")?;
            let Some(name) = prompt(input, out, "Enter username: ").await? else {
                return Ok(None);
            };
            if let Some(user) = create_profile(app, &name, out).await? {
                return Ok(Some(user));
            }
            continue;
        }

        writeln!(out, "\nSelect user:")?;
        for user in &users {
            writeln!(out, "{}. {}", user.id, user.name)?;
        }
        writeln!(out, "0. Create new user")?;

        let Some(choice) = prompt(input, out, "Enter choice: ").await? else {
            return Ok(None);
        };

        if choice == "0" {
            let Some(name) = prompt(input, out, "Enter username: ").await? else {
                return Ok(None);
            };
            if let Some(user) = create_profile(app, &name, out).await? {
                return Ok(Some(user));
            }
            continue;
        }

        match choice.parse::<i64>().ok().and_then(|id| users.iter().find(|u| u.id == id)) {
            Some(user) => return Ok(Some(user.clone())),
            None => writeln!(out, "Invalid choice.")?,
        }
    }
}

async fn create_profile(app: &App, name: &str, out: &mut dyn Write) -> AppResult<Option<User>> {
    match actions::add_user(app, name, out).await {
        Ok(user) => Ok(Some(user)),
        Err(err) if err.is_recoverable() => {
            writeln!(out, "Error: {}", err)?;
            Ok(None)
        }
        Err(err) => Err(err),
    }
}

/// Run the menu loop until the user exits or input ends
///
/// `preselected` skips profile selection; `site_dir` receives the generated
/// website.
pub async fn run_menu<R>(
    app: &App,
    preselected: Option<User>,
    site_dir: &Path,
    input: &mut R,
    out: &mut dyn Write,
) -> AppResult<()>
where
    R: AsyncBufRead + Unpin,
{
    let owner = match preselected {
        Some(user) => user,
        None => match select_profile(app, input, out).await? {
            Some(user) => user,
            None => {
                writeln!(out, "Bye!")?;
                return Ok(());
            }
        },
    };
    writeln!(out, "Welcome, {}!", owner.name)?;

    loop {
        writeln!(out, "{}", MENU)?;
        let Some(choice) = prompt(input, out, "Enter choice (0-10): ").await? else {
            break;
        };

        let result = match choice.as_str() {
            "0" => break,
            "1" => actions::list_movies(app, &owner, out).await,
            "2" => match prompt(input, out, "Enter movie title: ").await? {
                Some(title) if !title.is_empty() => actions::add_movie(app, &owner, &title, out).await,
                Some(_) => Ok(()),
                None => break,
            },
            "3" => match prompt(input, out, "Enter movie title to delete: ").await? {
                Some(title) => actions::delete_movie(app, &owner, &title, out).await,
                None => break,
            },
            "4" => {
                let Some(title) = prompt(input, out, "Enter movie name: ").await? else {
                    break;
                };
                let Some(note) = prompt(input, out, "Enter movie note: ").await? else {
                    break;
                };
                actions::update_note(app, &owner, &title, &note, out).await
            }
            "5" => actions::show_stats(app, &owner, out).await,
            "6" => actions::random_movie(app, &owner, out).await,
            "7" => match prompt(input, out, "Enter part of movie name: ").await? {
                Some(query) => actions::search_movies(app, &owner, &query, out).await,
                None => break,
            },
            "8" => actions::sorted_movies(app, &owner, true, out).await,
            "9" => actions::generate_site(app, site_dir, out).await,
            "10" => {
                let Some(title) = prompt(input, out, "Enter movie name: ").await? else {
                    break;
                };
                let Some(rating) = prompt(input, out, "Enter new rating (0-10): ").await? else {
                    break;
                };
                actions::update_rating(app, &owner, &title, &rating, out).await
            }
            _ => {
                writeln!(out, "Invalid choice.")?;
                Ok(())
            }
        };

        report(result, out)?;
    }

    writeln!(out, "Bye!")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AppError;
    use mcm_common::Error;
    use std::sync::{Arc, Mutex};
    use tracing::{Level, Subscriber};
    use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

    /// Records the level of every event
    #[derive(Clone, Default)]
    struct LevelCapture {
        levels: Arc<Mutex<Vec<Level>>>,
    }

    impl<S: Subscriber> Layer<S> for LevelCapture {
        fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
            self.levels.lock().unwrap().push(*event.metadata().level());
        }
    }

    #[test]
    fn test_recoverable_error_printed_once_and_logged_quietly() {
        let capture = LevelCapture::default();
        let subscriber = tracing_subscriber::registry().with(capture.clone());
        let mut out = Vec::new();

        let result = tracing::subscriber::with_default(subscriber, || {
            report(
                Err(AppError::from(Error::NotFound("Heat".to_string()))),
                &mut out,
            )
        });

        assert!(result.is_ok());
        assert_eq!(String::from_utf8(out).unwrap(), "Error: Not found: Heat\n");
        let levels = capture.levels.lock().unwrap().clone();
        assert_eq!(levels, vec![Level::DEBUG]);
    }

    #[test]
    fn test_fatal_error_passed_through() {
        let mut out = Vec::new();
        let result = report(
            Err(AppError::from(std::io::Error::other("disk gone"))),
            &mut out,
        );

        assert!(matches!(result, Err(AppError::Io(_))));
        assert!(out.is_empty());
    }
}
