//! Shared test utilities for mcm-cli
//!
//! Canned metadata sources and in-memory application setup.

#![allow(dead_code)]

use async_trait::async_trait;
use mcm_cli::enrichment::{
    normalize_response, EnrichedMovie, EnrichmentError, MetadataSource, OmdbResponse,
};
use mcm_cli::App;
use mcm_common::db::init_memory_database;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Answers from a fixed table of OMDb-shaped JSON responses
///
/// Titles not in the table answer `{"Response": "False"}`.
#[derive(Default)]
pub struct CannedSource {
    responses: HashMap<String, Value>,
    calls: Arc<AtomicUsize>,
}

impl CannedSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, title: &str, response: Value) -> Self {
        self.responses.insert(title.to_lowercase(), response);
        self
    }

    /// Shared call counter, readable after the source is boxed
    pub fn calls(&self) -> Arc<AtomicUsize> {
        self.calls.clone()
    }
}

#[async_trait]
impl MetadataSource for CannedSource {
    fn name(&self) -> &'static str {
        "canned"
    }

    async fn fetch(&self, title: &str) -> Result<EnrichedMovie, EnrichmentError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let value = self
            .responses
            .get(&title.trim().to_lowercase())
            .cloned()
            .unwrap_or_else(|| json!({"Response": "False", "Error": "Movie not found!"}));
        let response: OmdbResponse =
            serde_json::from_value(value).map_err(|e| EnrichmentError::Parse(e.to_string()))?;
        normalize_response(title.trim(), response)
    }
}

/// Fails every lookup as if the network were down
pub struct UnreachableSource;

#[async_trait]
impl MetadataSource for UnreachableSource {
    fn name(&self) -> &'static str {
        "unreachable"
    }

    async fn fetch(&self, _title: &str) -> Result<EnrichedMovie, EnrichmentError> {
        Err(EnrichmentError::Network("connection refused".to_string()))
    }
}

/// OMDb-shaped response with every consumed field set
pub fn omdb_movie(title: &str, year: &str, rating: &str, country: &str) -> Value {
    json!({
        "Response": "True",
        "Title": title,
        "Year": year,
        "imdbRating": rating,
        "Poster": format!("https://img.example/{}.jpg", title.to_lowercase().replace(' ', "_")),
        "Country": country,
        "Actors": "Someone Famous, Someone Else"
    })
}

/// A source that knows a handful of well-known titles
pub fn library_source() -> CannedSource {
    CannedSource::new()
        .with(
            "dune",
            json!({
                "Response": "True",
                "Title": "Dune",
                "Year": "2021",
                "imdbRating": "8.0",
                "Poster": "p.jpg",
                "Country": "United States"
            }),
        )
        .with("alien", omdb_movie("Alien", "1979", "8.5", "United Kingdom, United States"))
        .with("the matrix", omdb_movie("The Matrix", "1999", "8.7", "United States, Australia"))
        .with("arrival", omdb_movie("Arrival", "2016", "7.9", "United States"))
        .with("amelie", omdb_movie("Amélie", "2001", "8.3", "France, Germany"))
}

/// In-memory application with an optional metadata source
pub async fn test_app(source: Option<Box<dyn MetadataSource>>) -> App {
    let pool = init_memory_database().await.unwrap();
    App::new(pool, source)
}
