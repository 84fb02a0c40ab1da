//! # MCM Common Library
//!
//! Shared code for the movie collection manager:
//! - Error taxonomy shared by every layer
//! - Configuration resolution (CLI → environment → TOML → defaults)
//! - Schema Manager and row models for the `users`/`movies` tables
//! - Input validation used at the interactive boundary

pub mod config;
pub mod db;
pub mod error;
pub mod validation;

pub use error::{Error, Result};
