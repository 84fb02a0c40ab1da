//! Database models

/// Country code stored when no mapping is known
pub const UNKNOWN_COUNTRY: &str = "UN";

/// A profile owning a movie collection. No authentication is attached.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub name: String,
}

/// One row of the `movies` table
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Movie {
    pub id: i64,
    pub owner_id: i64,
    pub title: String,
    pub year: Option<i32>,
    pub rating: f64,
    pub poster_url: Option<String>,
    pub notes: Option<String>,
    /// ISO-3166 alpha-2, or [`UNKNOWN_COUNTRY`]
    pub country_code: String,
}

impl Movie {
    /// Note text, treating an empty string the same as no note
    pub fn note(&self) -> Option<&str> {
        self.notes.as_deref().filter(|n| !n.is_empty())
    }
}
