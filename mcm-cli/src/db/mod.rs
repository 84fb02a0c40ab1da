//! Data access for the collection
//!
//! Each repository holds its own handle to the shared pool; nothing else
//! writes to the `users` or `movies` tables.

pub mod movies;
pub mod users;

pub use movies::{AddedMovie, MovieRepository};
pub use users::UserRepository;
