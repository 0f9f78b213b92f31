//! # mentorhub-core
//!
//! Core crate for the MentorHub client. Contains the session store and
//! navigator traits, configuration schemas, session types, and the unified
//! error system.
//!
//! This crate has **no** internal dependencies on other MentorHub crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
