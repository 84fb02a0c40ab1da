//! OMDb Client
//!
//! Looks a title up on the OMDb API (or any service speaking the same JSON)
//! and normalizes the answer into an [`EnrichedMovie`].
//!
//! # API Reference
//! - Endpoint: `GET http://www.omdbapi.com/?apikey=<key>&t=<title>`
//! - Documentation: https://www.omdbapi.com/
//! - `"Response": "False"` marks a failed lookup; `"N/A"` marks a missing field
//!
//! One request per lookup, bounded by a short timeout. No retries: the
//! caller reports the failure and the interactive session continues.

use super::{country_code, EnrichedMovie, EnrichmentError, MetadataSource};
use async_trait::async_trait;
use mcm_common::config::DEFAULT_OMDB_URL;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

/// Timeout for OMDb API requests
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Placeholder OMDb uses for missing fields
const NOT_AVAILABLE: &str = "N/A";

/// OMDb Client
///
/// # Example
/// ```rust,ignore
/// use mcm_cli::enrichment::{MetadataSource, OmdbClient};
///
/// let client = OmdbClient::new("your_api_key".to_string())?;
/// let movie = client.fetch("dune").await?;
/// println!("{} ({:?}) rated {}", movie.title, movie.year, movie.rating);
/// ```
pub struct OmdbClient {
    /// HTTP client for API requests
    http_client: Client,
    /// OMDb API key
    api_key: String,
    /// Endpoint the query string is appended to
    base_url: String,
}

impl OmdbClient {
    /// Create client for the public OMDb endpoint
    pub fn new(api_key: String) -> Result<Self, EnrichmentError> {
        Self::with_base_url(api_key, DEFAULT_OMDB_URL.to_string())
    }

    /// Create client for a custom endpoint
    pub fn with_base_url(api_key: String, base_url: String) -> Result<Self, EnrichmentError> {
        let http_client = Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .map_err(|e| EnrichmentError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            api_key,
            base_url,
        })
    }

    /// Endpoint this client queries
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Query OMDb by title
    ///
    /// # Errors
    /// - `Network` if the request fails or times out
    /// - `Api` if OMDb returns an error status (e.g. 401 for a bad key)
    /// - `Parse` if the body is not OMDb JSON
    async fn query_title(&self, title: &str) -> Result<OmdbResponse, EnrichmentError> {
        debug!(title = %title, url = %self.base_url, "Querying OMDb");

        let response = self
            .http_client
            .get(&self.base_url)
            .query(&[("apikey", self.api_key.as_str()), ("t", title)])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    EnrichmentError::Network(format!(
                        "OMDb request timed out after {}s",
                        DEFAULT_TIMEOUT.as_secs()
                    ))
                } else {
                    EnrichmentError::Network(format!("OMDb request failed: {}", e))
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| EnrichmentError::Network(format!("Failed to read OMDb response: {}", e)))?;

        if !status.is_success() {
            // OMDb still sends its JSON envelope on errors; prefer its message
            let detail = serde_json::from_str::<OmdbResponse>(&body)
                .ok()
                .and_then(|r| r.error)
                .unwrap_or(body);
            return Err(EnrichmentError::Api(format!(
                "OMDb returned error {}: {}",
                status, detail
            )));
        }

        serde_json::from_str(&body).map_err(|e| {
            EnrichmentError::Parse(format!("Failed to parse OMDb response: {}", e))
        })
    }
}

#[async_trait]
impl MetadataSource for OmdbClient {
    fn name(&self) -> &'static str {
        "OMDb"
    }

    async fn fetch(&self, title: &str) -> Result<EnrichedMovie, EnrichmentError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(EnrichmentError::InvalidInput(
                "title must not be empty".to_string(),
            ));
        }

        let response = self.query_title(title).await?;
        let movie = normalize_response(title, response)?;

        debug!(
            title = %movie.title,
            year = ?movie.year,
            rating = movie.rating,
            country = %movie.country_code,
            "OMDb lookup complete"
        );

        Ok(movie)
    }
}

/// Normalize an OMDb response
///
/// Tolerates every field being missing; only `Response: "False"` fails.
pub fn normalize_response(
    input_title: &str,
    response: OmdbResponse,
) -> Result<EnrichedMovie, EnrichmentError> {
    if response
        .response
        .as_deref()
        .is_some_and(|r| r.eq_ignore_ascii_case("false"))
    {
        return Err(match response.error {
            Some(message) if !message.to_lowercase().contains("not found") => {
                EnrichmentError::Api(message)
            }
            _ => EnrichmentError::NotFound(input_title.to_string()),
        });
    }

    let title = present(response.title.as_deref())
        .unwrap_or(input_title)
        .trim()
        .to_string();

    Ok(EnrichedMovie {
        year: parse_year(response.year.as_deref()),
        rating: parse_rating(response.imdb_rating.as_deref()),
        poster_url: present(response.poster.as_deref())
            .unwrap_or_default()
            .to_string(),
        country_code: country_code(present(response.country.as_deref())),
        actors: present(response.actors.as_deref()).map(str::to_string),
        title,
    })
}

/// First run of four ASCII digits, so `"1999–2004"` yields 1999
fn parse_year(raw: Option<&str>) -> Option<i32> {
    raw?.as_bytes()
        .windows(4)
        .find(|w| w.iter().all(u8::is_ascii_digit))
        .and_then(|w| std::str::from_utf8(w).ok())
        .and_then(|s| s.parse().ok())
}

fn parse_rating(raw: Option<&str>) -> f64 {
    let Some(raw) = present(raw) else {
        return 0.0;
    };
    match raw.trim().parse::<f64>() {
        Ok(rating) if rating.is_finite() => rating,
        _ => {
            warn!(rating = %raw, "Unparseable OMDb rating, storing 0.0");
            0.0
        }
    }
}

fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty() && *v != NOT_AVAILABLE)
}

// ============================================================================
// OMDb API Response Types
// ============================================================================

/// Fields of the OMDb title response that are consumed
#[derive(Debug, Default, Deserialize)]
pub struct OmdbResponse {
    #[serde(rename = "Response")]
    pub response: Option<String>,
    #[serde(rename = "Error")]
    pub error: Option<String>,
    #[serde(rename = "Title")]
    pub title: Option<String>,
    #[serde(rename = "Year")]
    pub year: Option<String>,
    #[serde(rename = "imdbRating")]
    pub imdb_rating: Option<String>,
    #[serde(rename = "Poster")]
    pub poster: Option<String>,
    #[serde(rename = "Country")]
    pub country: Option<String>,
    #[serde(rename = "Actors")]
    pub actors: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response(value: serde_json::Value) -> OmdbResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_full_response_normalized() {
        let movie = normalize_response(
            "dune",
            response(json!({
                "Response": "True",
                "Title": "Dune",
                "Year": "2021",
                "imdbRating": "8.0",
                "Poster": "p.jpg",
                "Country": "United States, Canada",
                "Actors": "Timothée Chalamet, Rebecca Ferguson"
            })),
        )
        .unwrap();

        assert_eq!(movie.title, "Dune");
        assert_eq!(movie.year, Some(2021));
        assert_eq!(movie.rating, 8.0);
        assert_eq!(movie.poster_url, "p.jpg");
        assert_eq!(movie.country_code, "US");
        assert_eq!(
            movie.actors.as_deref(),
            Some("Timothée Chalamet, Rebecca Ferguson")
        );
    }

    #[test]
    fn test_missing_fields_fall_back() {
        let movie = normalize_response("  some title ", response(json!({"Response": "True"}))).unwrap();

        assert_eq!(movie.title, "some title");
        assert_eq!(movie.year, None);
        assert_eq!(movie.rating, 0.0);
        assert_eq!(movie.poster_url, "");
        assert_eq!(movie.country_code, "UN");
        assert_eq!(movie.actors, None);
    }

    #[test]
    fn test_not_available_sentinels() {
        let movie = normalize_response(
            "x",
            response(json!({
                "Title": "X",
                "Year": "N/A",
                "imdbRating": "N/A",
                "Poster": "N/A",
                "Country": "N/A",
                "Actors": "N/A"
            })),
        )
        .unwrap();

        assert_eq!(movie.year, None);
        assert_eq!(movie.rating, 0.0);
        assert_eq!(movie.poster_url, "");
        assert_eq!(movie.country_code, "UN");
        assert_eq!(movie.actors, None);
    }

    #[test]
    fn test_year_ranges_take_first_year() {
        assert_eq!(parse_year(Some("1999–2004")), Some(1999));
        assert_eq!(parse_year(Some("2011–")), Some(2011));
        assert_eq!(parse_year(Some("c. 1984")), Some(1984));
        assert_eq!(parse_year(Some("soon")), None);
        assert_eq!(parse_year(Some("99")), None);
        assert_eq!(parse_year(None), None);
    }

    #[test]
    fn test_garbage_rating_is_zero() {
        assert_eq!(parse_rating(Some("eight")), 0.0);
        assert_eq!(parse_rating(Some("7.3")), 7.3);
    }

    #[test]
    fn test_response_false_is_not_found() {
        let err = normalize_response("Nope", response(json!({"Response": "False"}))).unwrap_err();
        assert!(matches!(err, EnrichmentError::NotFound(ref t) if t == "Nope"));

        let err = normalize_response(
            "Nope",
            response(json!({"Response": "False", "Error": "Movie not found!"})),
        )
        .unwrap_err();
        assert!(matches!(err, EnrichmentError::NotFound(_)));
    }

    #[test]
    fn test_response_false_with_other_error_is_api_error() {
        let err = normalize_response(
            "Dune",
            response(json!({"Response": "False", "Error": "Request limit reached!"})),
        )
        .unwrap_err();

        assert!(matches!(err, EnrichmentError::Api(ref m) if m == "Request limit reached!"));
        assert!(err.is_transport());
    }

    #[test]
    fn test_client_name() {
        let client = OmdbClient::new("key".to_string()).unwrap();
        assert_eq!(client.name(), "OMDb");
        assert_eq!(client.base_url(), DEFAULT_OMDB_URL);
    }

    #[tokio::test]
    async fn test_empty_title_rejected_without_request() {
        // Unroutable endpoint: reaching the network would fail differently
        let client =
            OmdbClient::with_base_url("key".to_string(), "http://127.0.0.1:9/".to_string()).unwrap();

        let err = client.fetch("   ").await.unwrap_err();
        assert!(matches!(err, EnrichmentError::InvalidInput(_)));
    }
}
