//! Movie database operations
//!
//! Every operation is scoped to one owner. `(owner_id, title)` is unique, so
//! a title addresses at most one row per owner.

use crate::collection::{self, CollectionStats};
use crate::enrichment::{EnrichedMovie, MetadataSource};
use crate::error::AppResult;
use mcm_common::db::Movie;
use mcm_common::validation::validate_title;
use mcm_common::{Error, Result};
use rand::seq::SliceRandom;
use sqlx::SqlitePool;
use tracing::{debug, info};

/// Result of a successful add
#[derive(Debug, Clone)]
pub struct AddedMovie {
    /// Row as stored
    pub movie: Movie,
    /// Cast from the lookup, for display only
    pub actors: Option<String>,
}

#[derive(Clone)]
pub struct MovieRepository {
    pool: SqlitePool,
}

impl MovieRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Every movie the owner holds, in insertion order
    pub async fn list(&self, owner_id: i64) -> Result<Vec<Movie>> {
        let movies = sqlx::query_as::<_, Movie>(
            r#"
            SELECT id, owner_id, title, year, rating, poster_url, notes, country_code
            FROM movies
            WHERE owner_id = ?
            ORDER BY id
            "#,
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;

        debug!(owner_id, count = movies.len(), "Listed movies");
        Ok(movies)
    }

    pub async fn get(&self, owner_id: i64, title: &str) -> Result<Option<Movie>> {
        let movie = sqlx::query_as::<_, Movie>(
            r#"
            SELECT id, owner_id, title, year, rating, poster_url, notes, country_code
            FROM movies
            WHERE owner_id = ? AND title = ?
            "#,
        )
        .bind(owner_id)
        .bind(title)
        .fetch_optional(&self.pool)
        .await?;
        Ok(movie)
    }

    pub async fn exists(&self, owner_id: i64, title: &str) -> Result<bool> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM movies WHERE owner_id = ? AND title = ?")
                .bind(owner_id)
                .bind(title)
                .fetch_one(&self.pool)
                .await?;
        Ok(count > 0)
    }

    /// Look a title up and store the normalized result
    ///
    /// The duplicate check uses the canonical title returned by the lookup,
    /// so "dune" and "Dune" resolve to the same entry.
    ///
    /// # Errors
    /// - `Enrichment(..)` when the lookup fails (nothing stored)
    /// - `Common(Duplicate)` when the owner already holds the title
    /// - `Common(NotFound)` when the owner does not exist
    pub async fn add_from_enrichment(
        &self,
        source: &dyn MetadataSource,
        owner_id: i64,
        title: &str,
    ) -> AppResult<AddedMovie> {
        let title = validate_title(title)?;

        debug!(owner_id, title = %title, source = source.name(), "Enriching title");
        let enriched = source.fetch(title).await?;

        if self.exists(owner_id, &enriched.title).await? {
            return Err(Error::Duplicate(format!(
                "'{}' is already in the collection",
                enriched.title
            ))
            .into());
        }

        let movie = self.insert(owner_id, &enriched).await?;
        Ok(AddedMovie {
            movie,
            actors: enriched.actors,
        })
    }

    /// Store an already-normalized record with empty notes
    pub async fn insert(&self, owner_id: i64, movie: &EnrichedMovie) -> Result<Movie> {
        let result = sqlx::query(
            r#"
            INSERT INTO movies (owner_id, title, year, rating, poster_url, notes, country_code)
            VALUES (?, ?, ?, ?, ?, '', ?)
            "#,
        )
        .bind(owner_id)
        .bind(&movie.title)
        .bind(movie.year)
        .bind(movie.rating)
        .bind(&movie.poster_url)
        .bind(&movie.country_code)
        .execute(&self.pool)
        .await
        .map_err(|e| insert_error(e, owner_id, &movie.title))?;

        let id = result.last_insert_rowid();
        info!(owner_id, movie_id = id, title = %movie.title, "Added movie");

        Ok(Movie {
            id,
            owner_id,
            title: movie.title.clone(),
            year: movie.year,
            rating: movie.rating,
            poster_url: Some(movie.poster_url.clone()),
            notes: Some(String::new()),
            country_code: movie.country_code.clone(),
        })
    }

    /// Remove a title; `false` when the owner holds no such title
    pub async fn delete(&self, owner_id: i64, title: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM movies WHERE owner_id = ? AND title = ?")
            .bind(owner_id)
            .bind(title)
            .execute(&self.pool)
            .await?;

        let removed = result.rows_affected() > 0;
        if removed {
            info!(owner_id, title = %title, "Deleted movie");
        } else {
            debug!(owner_id, title = %title, "Delete skipped, movie not found");
        }
        Ok(removed)
    }

    /// Overwrite notes; `false` when the owner holds no such title
    pub async fn update_notes(&self, owner_id: i64, title: &str, note: &str) -> Result<bool> {
        let result = sqlx::query("UPDATE movies SET notes = ? WHERE owner_id = ? AND title = ?")
            .bind(note)
            .bind(owner_id)
            .bind(title)
            .execute(&self.pool)
            .await?;

        let updated = result.rows_affected() > 0;
        if updated {
            info!(owner_id, title = %title, "Updated notes");
        }
        Ok(updated)
    }

    /// Overwrite rating; `false` when the owner holds no such title
    ///
    /// Range checks belong to the caller (see `mcm_common::validation`).
    pub async fn update_rating(&self, owner_id: i64, title: &str, rating: f64) -> Result<bool> {
        let result = sqlx::query("UPDATE movies SET rating = ? WHERE owner_id = ? AND title = ?")
            .bind(rating)
            .bind(owner_id)
            .bind(title)
            .execute(&self.pool)
            .await?;

        let updated = result.rows_affected() > 0;
        if updated {
            info!(owner_id, title = %title, rating, "Updated rating");
        }
        Ok(updated)
    }

    /// `None` for an empty collection
    pub async fn stats(&self, owner_id: i64) -> Result<Option<CollectionStats>> {
        let movies = self.list(owner_id).await?;
        Ok(collection::compute_stats(&movies))
    }

    /// Uniformly random movie, `None` for an empty collection
    pub async fn random_pick(&self, owner_id: i64) -> Result<Option<Movie>> {
        let movies = self.list(owner_id).await?;
        Ok(movies.choose(&mut rand::thread_rng()).cloned())
    }

    /// Case-insensitive title substring search
    pub async fn search(&self, owner_id: i64, needle: &str) -> Result<Vec<Movie>> {
        let movies = self.list(owner_id).await?;
        Ok(collection::filter_by_title(movies, needle))
    }

    /// Stable sort by rating; ties keep insertion order
    pub async fn sort_by_rating(&self, owner_id: i64, descending: bool) -> Result<Vec<Movie>> {
        let movies = self.list(owner_id).await?;
        Ok(collection::sort_by_rating(movies, descending))
    }
}

fn insert_error(err: sqlx::Error, owner_id: i64, title: &str) -> Error {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            Error::Duplicate(format!("'{}' is already in the collection", title))
        }
        sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation() => {
            Error::NotFound(format!("user {}", owner_id))
        }
        _ => Error::Database(err),
    }
}
