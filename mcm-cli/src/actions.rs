//! User-facing operations shared by one-shot commands and the menu
//!
//! Each action writes its report to `out`. Expected outcomes such as an
//! empty collection or a missing title are reported here; errors are left
//! to the caller to classify with [`AppError::is_recoverable`].
//!
//! [`AppError::is_recoverable`]: crate::AppError::is_recoverable

use crate::error::AppResult;
use crate::website;
use crate::App;
use mcm_common::db::{Movie, User};
use mcm_common::validation::{parse_rating, validate_title};
use std::io::Write;
use std::path::Path;

/// One-line summary: `Title (Year) [CC]: rating | Note: ...`
pub fn format_movie(movie: &Movie) -> String {
    let year = movie
        .year
        .map(|y| y.to_string())
        .unwrap_or_else(|| "n/a".to_string());
    let note = movie
        .note()
        .map(|n| format!(" | Note: {}", n))
        .unwrap_or_default();
    format!(
        "{} ({}) [{}]: {:.1}{}",
        movie.title, year, movie.country_code, movie.rating, note
    )
}

fn print_movies(out: &mut dyn Write, movies: &[Movie]) -> AppResult<()> {
    for movie in movies {
        writeln!(out, "{}", format_movie(movie))?;
    }
    Ok(())
}

pub async fn list_users(app: &App, out: &mut dyn Write) -> AppResult<()> {
    let users = app.users.list().await?;
    if users.is_empty() {
        writeln!(out, "No users yet.")?;
    }
    for user in users {
        writeln!(out, "{}. {}", user.id, user.name)?;
    }
    Ok(())
}

pub async fn add_user(app: &App, name: &str, out: &mut dyn Write) -> AppResult<User> {
    let id = app.users.create(name).await?;
    let name = name.trim().to_string();
    writeln!(out, "User '{}' created.", name)?;
    Ok(User { id, name })
}

pub async fn list_movies(app: &App, owner: &User, out: &mut dyn Write) -> AppResult<()> {
    let movies = app.movies.list(owner.id).await?;
    if movies.is_empty() {
        writeln!(out, "{}, your movie collection is empty.", owner.name)?;
        return Ok(());
    }
    writeln!(out, "{} movies in total", movies.len())?;
    print_movies(out, &movies)
}

pub async fn add_movie(app: &App, owner: &User, title: &str, out: &mut dyn Write) -> AppResult<()> {
    let title = validate_title(title)?;
    let source = app.source()?;

    let added = app.movies.add_from_enrichment(source, owner.id, title).await?;
    writeln!(out, "Movie '{}' added successfully.", added.movie.title)?;
    writeln!(out, "{}", format_movie(&added.movie))?;
    if let Some(actors) = added.actors {
        writeln!(out, "Starring: {}", actors)?;
    }
    Ok(())
}

pub async fn delete_movie(app: &App, owner: &User, title: &str, out: &mut dyn Write) -> AppResult<()> {
    let title = validate_title(title)?;
    if app.movies.delete(owner.id, title).await? {
        writeln!(out, "Movie '{}' deleted successfully.", title)?;
    } else {
        writeln!(out, "Movie '{}' not found.", title)?;
    }
    Ok(())
}

pub async fn update_note(
    app: &App,
    owner: &User,
    title: &str,
    note: &str,
    out: &mut dyn Write,
) -> AppResult<()> {
    let title = validate_title(title)?;
    if app.movies.update_notes(owner.id, title, note.trim()).await? {
        writeln!(out, "Movie '{}' updated successfully.", title)?;
    } else {
        writeln!(out, "Movie '{}' not found.", title)?;
    }
    Ok(())
}

/// `rating` is the raw user input; it is validated before the store is touched.
pub async fn update_rating(
    app: &App,
    owner: &User,
    title: &str,
    rating: &str,
    out: &mut dyn Write,
) -> AppResult<()> {
    let title = validate_title(title)?;
    let rating = parse_rating(rating)?;
    if app.movies.update_rating(owner.id, title, rating).await? {
        writeln!(out, "Movie '{}' rated {:.1}.", title, rating)?;
    } else {
        writeln!(out, "Movie '{}' not found.", title)?;
    }
    Ok(())
}

pub async fn show_stats(app: &App, owner: &User, out: &mut dyn Write) -> AppResult<()> {
    let Some(stats) = app.movies.stats(owner.id).await? else {
        writeln!(out, "No movies in your collection.")?;
        return Ok(());
    };
    writeln!(out, "Movies: {}", stats.count)?;
    writeln!(out, "Average rating: {:.1}", stats.average)?;
    writeln!(out, "Median rating: {:.1}", stats.median)?;
    writeln!(out, "Best movie(s): {}", stats.best.join(", "))?;
    writeln!(out, "Worst movie(s): {}", stats.worst.join(", "))?;
    Ok(())
}

pub async fn random_movie(app: &App, owner: &User, out: &mut dyn Write) -> AppResult<()> {
    match app.movies.random_pick(owner.id).await? {
        Some(movie) => writeln!(out, "Random movie: {}", format_movie(&movie))?,
        None => writeln!(out, "No movies in your collection.")?,
    }
    Ok(())
}

pub async fn search_movies(app: &App, owner: &User, query: &str, out: &mut dyn Write) -> AppResult<()> {
    let found = app.movies.search(owner.id, query).await?;
    if found.is_empty() {
        writeln!(out, "No matching movies found.")?;
        return Ok(());
    }
    print_movies(out, &found)
}

pub async fn sorted_movies(
    app: &App,
    owner: &User,
    descending: bool,
    out: &mut dyn Write,
) -> AppResult<()> {
    let sorted = app.movies.sort_by_rating(owner.id, descending).await?;
    if sorted.is_empty() {
        writeln!(out, "No movies in your collection.")?;
        return Ok(());
    }
    print_movies(out, &sorted)
}

pub async fn generate_site(app: &App, out_dir: &Path, out: &mut dyn Write) -> AppResult<()> {
    let index = website::generate_website(&app.users, &app.movies, out_dir).await?;
    writeln!(out, "Website generated: {}", index.display())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_movie_with_note() {
        let movie = Movie {
            id: 1,
            owner_id: 1,
            title: "Dune".to_string(),
            year: Some(2021),
            rating: 8.0,
            poster_url: None,
            notes: Some("watch part two".to_string()),
            country_code: "US".to_string(),
        };
        assert_eq!(format_movie(&movie), "Dune (2021) [US]: 8.0 | Note: watch part two");
    }

    #[test]
    fn test_format_movie_without_year_or_note() {
        let movie = Movie {
            id: 1,
            owner_id: 1,
            title: "Unknown".to_string(),
            year: None,
            rating: 0.0,
            poster_url: None,
            notes: Some(String::new()),
            country_code: "UN".to_string(),
        };
        assert_eq!(format_movie(&movie), "Unknown (n/a) [UN]: 0.0");
    }
}
