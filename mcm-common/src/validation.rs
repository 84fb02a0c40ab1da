//! Input validation applied at the interactive boundary
//!
//! The store itself does not constrain ratings; values are checked here
//! before any repository call is attempted.

use crate::{Error, Result};

/// Lowest accepted rating
pub const MIN_RATING: f64 = 0.0;

/// Highest accepted rating
pub const MAX_RATING: f64 = 10.0;

/// Trim a title and reject it when nothing is left.
pub fn validate_title(raw: &str) -> Result<&str> {
    let title = raw.trim();
    if title.is_empty() {
        return Err(Error::InvalidInput("title must not be empty".to_string()));
    }
    Ok(title)
}

/// Trim a profile name and reject it when nothing is left.
pub fn validate_user_name(raw: &str) -> Result<&str> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(Error::InvalidInput("user name must not be empty".to_string()));
    }
    Ok(name)
}

/// Parse a rating typed by the user.
///
/// Accepts any finite number in `MIN_RATING..=MAX_RATING`.
pub fn parse_rating(raw: &str) -> Result<f64> {
    let rating: f64 = raw
        .trim()
        .parse()
        .map_err(|_| Error::InvalidInput(format!("'{}' is not a number", raw.trim())))?;
    validate_rating(rating)
}

/// Check a rating is finite and within range.
pub fn validate_rating(rating: f64) -> Result<f64> {
    if !rating.is_finite() || !(MIN_RATING..=MAX_RATING).contains(&rating) {
        return Err(Error::InvalidInput(format!(
            "rating must be between {} and {}, got {}",
            MIN_RATING, MAX_RATING, rating
        )));
    }
    Ok(rating)
}
