//! Read-only analytics over a collection
//!
//! Inputs are in encounter order (ascending row id); every function here
//! preserves that order wherever ties occur.

use mcm_common::db::Movie;

/// Aggregate rating statistics for one collection
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionStats {
    pub count: usize,
    pub average: f64,
    pub median: f64,
    /// Every title tied at the highest rating
    pub best: Vec<String>,
    /// Every title tied at the lowest rating
    pub worst: Vec<String>,
}

/// Compute statistics, or `None` for an empty collection.
pub fn compute_stats(movies: &[Movie]) -> Option<CollectionStats> {
    if movies.is_empty() {
        return None;
    }

    let ratings: Vec<f64> = movies.iter().map(|m| m.rating).collect();
    let count = ratings.len();
    let average = ratings.iter().sum::<f64>() / count as f64;

    let mut sorted = ratings.clone();
    sorted.sort_by(f64::total_cmp);
    let mid = count / 2;
    let median = if count % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    };

    let max = sorted[count - 1];
    let min = sorted[0];
    let titles_rated = |target: f64| -> Vec<String> {
        movies
            .iter()
            .filter(|m| m.rating == target)
            .map(|m| m.title.clone())
            .collect()
    };

    Some(CollectionStats {
        count,
        average,
        median,
        best: titles_rated(max),
        worst: titles_rated(min),
    })
}

/// Case-insensitive substring match on title
pub fn filter_by_title(movies: Vec<Movie>, needle: &str) -> Vec<Movie> {
    let needle = needle.trim().to_lowercase();
    movies
        .into_iter()
        .filter(|m| m.title.to_lowercase().contains(&needle))
        .collect()
}

/// Stable sort by rating; equal ratings keep encounter order.
pub fn sort_by_rating(mut movies: Vec<Movie>, descending: bool) -> Vec<Movie> {
    if descending {
        movies.sort_by(|a, b| b.rating.total_cmp(&a.rating));
    } else {
        movies.sort_by(|a, b| a.rating.total_cmp(&b.rating));
    }
    movies
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn movie(id: i64, title: &str, rating: f64) -> Movie {
        Movie {
            id,
            owner_id: 1,
            title: title.to_string(),
            year: Some(2000),
            rating,
            poster_url: None,
            notes: None,
            country_code: "UN".to_string(),
        }
    }

    fn titles(movies: &[Movie]) -> Vec<&str> {
        movies.iter().map(|m| m.title.as_str()).collect()
    }

    #[test]
    fn test_empty_collection_has_no_stats() {
        assert_eq!(compute_stats(&[]), None);
    }

    #[test]
    fn test_ties_listed_at_both_extremes() {
        let movies = vec![movie(1, "A", 9.0), movie(2, "B", 9.0), movie(3, "C", 5.0)];

        let stats = compute_stats(&movies).unwrap();

        assert_eq!(stats.count, 3);
        assert_eq!(stats.best, vec!["A", "B"]);
        assert_eq!(stats.worst, vec!["C"]);
        assert!((stats.average - 23.0 / 3.0).abs() < 1e-9);
        assert_eq!(stats.median, 9.0);
    }

    #[test]
    fn test_even_count_median_averages_middle() {
        let movies = vec![
            movie(1, "A", 4.0),
            movie(2, "B", 8.0),
            movie(3, "C", 6.0),
            movie(4, "D", 2.0),
        ];

        let stats = compute_stats(&movies).unwrap();

        assert_eq!(stats.median, 5.0);
        assert_eq!(stats.average, 5.0);
    }

    #[test]
    fn test_single_movie_is_best_and_worst() {
        let stats = compute_stats(&[movie(1, "Solo", 7.0)]).unwrap();
        assert_eq!(stats.best, vec!["Solo"]);
        assert_eq!(stats.worst, vec!["Solo"]);
    }

    #[test]
    fn test_sort_descending_is_stable() {
        let movies = vec![movie(1, "A", 7.0), movie(2, "B", 9.0), movie(3, "C", 7.0)];

        let sorted = sort_by_rating(movies, true);

        assert_eq!(titles(&sorted), vec!["B", "A", "C"]);
    }

    #[test]
    fn test_sort_ascending_is_stable() {
        let movies = vec![movie(1, "A", 7.0), movie(2, "B", 9.0), movie(3, "C", 7.0)];

        let sorted = sort_by_rating(movies, false);

        assert_eq!(titles(&sorted), vec!["A", "C", "B"]);
    }

    #[test]
    fn test_filter_is_case_insensitive() {
        let movies = vec![
            movie(1, "The Matrix", 8.7),
            movie(2, "Matrix Reloaded", 7.2),
            movie(3, "Dune", 8.0),
        ];

        let found = filter_by_title(movies.clone(), "MATRIX");
        assert_eq!(titles(&found), vec!["The Matrix", "Matrix Reloaded"]);

        assert!(filter_by_title(movies, "alien").is_empty());
    }
}
