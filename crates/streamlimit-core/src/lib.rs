//! # streamlimit-core
//!
//! Core crate for StreamLimit. Contains the store and subscriber traits,
//! configuration schemas, typed identifiers, the stream limit type,
//! and the unified error system.
//!
//! This crate has **no** internal dependencies on other StreamLimit crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
