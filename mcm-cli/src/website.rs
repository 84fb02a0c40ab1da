//! Static website generation
//!
//! Renders every profile's collection into `index.html` + `style.css`. The
//! output is a read-only projection of the store, regenerated in full on
//! each run and overwriting any previous version.

use crate::db::{MovieRepository, UserRepository};
use crate::error::AppResult;
use chrono::Local;
use mcm_common::db::{Movie, User};
use std::path::{Path, PathBuf};
use tracing::info;

pub const HTML_FILE: &str = "index.html";
pub const CSS_FILE: &str = "style.css";

/// Default output directory, relative to the working directory
pub const DEFAULT_OUTPUT_DIR: &str = "_static";

const SITE_TITLE: &str = "My Movie Collection";

const STYLESHEET: &str = r#"body {background: #F5F5F0; color: black; font-family: Monaco, monospace;}
.list-movies-title {padding: 10px 0; background: #009B50; color: white; text-align: center; font-size: 16pt;}
.collection-owner {text-align: center;}
.movie-grid {list-style: none; display: flex; flex-wrap: wrap; justify-content: center; padding: 0; margin: 0;}
.movie-grid li {padding: 10px; text-align: center;}
.movie {width: 140px; margin: 5px; position: relative;}
.movie-title, .movie-year, .movie-rating {font-size: 0.8em;}
.movie-year {color: #999;}
.movie-poster {width: 128px; height: 193px; box-shadow: 0 3px 6px rgba(0,0,0,0.16), 0 3px 6px rgba(0,0,0,0.23);}
.generated-at {color: #999; font-size: 0.7em; text-align: center;}
"#;

/// Rendered site contents
#[derive(Debug, Clone)]
pub struct Site {
    pub index_html: String,
    pub style_css: String,
}

/// Render the site for the given collections
///
/// Profiles with an empty collection are skipped.
pub fn render_site(collections: &[(User, Vec<Movie>)], generated_at: &str) -> Site {
    let mut sections = String::new();
    for (user, movies) in collections.iter().filter(|(_, movies)| !movies.is_empty()) {
        sections.push_str(&format!(
            "<h2 class=\"collection-owner\">{}'s Collection</h2>\n<ol class=\"movie-grid\">\n",
            escape_html(&user.name)
        ));
        for movie in movies {
            sections.push_str(&render_movie(movie));
        }
        sections.push_str("</ol>\n");
    }

    let index_html = format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8"/>
    <title>{title}</title>
    <link rel="stylesheet" href="{css}"/>
</head>
<body>
<div class="list-movies-title">
    <h1>{title}</h1>
</div>
{sections}<p class="generated-at">Generated {generated_at}</p>
</body>
</html>
"#,
        title = SITE_TITLE,
        css = CSS_FILE,
        sections = sections,
        generated_at = escape_html(generated_at),
    );

    Site {
        index_html,
        style_css: STYLESHEET.to_string(),
    }
}

fn render_movie(movie: &Movie) -> String {
    let year = movie.year.map(|y| y.to_string()).unwrap_or_default();
    format!(
        r#"<li>
    <div class="movie">
        <img class="movie-poster" src="{poster}" alt="{title}" title="{note}"/>
        <div class="movie-title">{title}</div>
        <div class="movie-year">{year} {country}</div>
        <div class="movie-rating">&#11088; {rating:.1}</div>
    </div>
</li>
"#,
        poster = escape_html(movie.poster_url.as_deref().unwrap_or_default()),
        title = escape_html(&movie.title),
        note = escape_html(movie.note().unwrap_or_default()),
        year = year,
        country = escape_html(&movie.country_code),
        rating = movie.rating,
    )
}

/// Escape text for element content and double-quoted attributes
pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Read every collection and write the site into `out_dir`
///
/// Returns the path of the written `index.html`.
pub async fn generate_website(
    users: &UserRepository,
    movies: &MovieRepository,
    out_dir: &Path,
) -> AppResult<PathBuf> {
    let mut collections = Vec::new();
    for user in users.list().await? {
        let owned = movies.list(user.id).await?;
        collections.push((user, owned));
    }

    let generated_at = Local::now().format("%Y-%m-%d %H:%M").to_string();
    let site = render_site(&collections, &generated_at);

    std::fs::create_dir_all(out_dir)?;
    let index_path = out_dir.join(HTML_FILE);
    std::fs::write(&index_path, site.index_html)?;
    std::fs::write(out_dir.join(CSS_FILE), site.style_css)?;

    info!(
        path = %index_path.display(),
        users = collections.len(),
        "Website generated"
    );
    Ok(index_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: i64, name: &str) -> User {
        User {
            id,
            name: name.to_string(),
        }
    }

    fn movie(title: &str, note: Option<&str>) -> Movie {
        Movie {
            id: 1,
            owner_id: 1,
            title: title.to_string(),
            year: Some(2021),
            rating: 8.0,
            poster_url: Some("p.jpg".to_string()),
            notes: note.map(str::to_string),
            country_code: "US".to_string(),
        }
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<b>"Tom & Jerry's"</b>"#),
            "&lt;b&gt;&quot;Tom &amp; Jerry&#39;s&quot;&lt;/b&gt;"
        );
    }

    #[test]
    fn test_render_includes_movie_fields() {
        let site = render_site(
            &[(user(1, "ana"), vec![movie("Dune", Some("see \"part two\""))])],
            "2026-01-01 10:00",
        );

        assert!(site.index_html.contains("ana's Collection"));
        assert!(site.index_html.contains(r#"<div class="movie-title">Dune</div>"#));
        assert!(site.index_html.contains(r#"src="p.jpg""#));
        assert!(site.index_html.contains("2021 US"));
        assert!(site.index_html.contains("8.0"));
        assert!(site.index_html.contains(r#"title="see &quot;part two&quot;""#));
        assert!(site.index_html.contains(CSS_FILE));
        assert!(site.style_css.contains(".movie-grid"));
    }

    #[test]
    fn test_empty_collections_skipped() {
        let site = render_site(
            &[(user(1, "ana"), vec![]), (user(2, "ben"), vec![movie("Alien", None)])],
            "now",
        );

        assert!(!site.index_html.contains("ana's Collection"));
        assert!(site.index_html.contains("ben's Collection"));
    }

    #[test]
    fn test_each_collection_is_one_closed_grid() {
        let site = render_site(
            &[
                (user(1, "ana"), vec![movie("Dune", None), movie("Heat", None)]),
                (user(2, "ben <admin>"), vec![movie("Alien", None)]),
            ],
            "now",
        );

        assert!(site.index_html.contains(
            "<h2 class=\"collection-owner\">ana's Collection</h2>\n<ol class=\"movie-grid\">\n<li>"
        ));
        assert!(site.index_html.contains("ben &lt;admin&gt;'s Collection"));
        assert_eq!(site.index_html.matches("<ol class=\"movie-grid\">").count(), 2);
        assert_eq!(site.index_html.matches("</ol>").count(), 2);
        assert_eq!(site.index_html.matches("<li>").count(), 3);
    }
}
