//! # mentorhub-session
//!
//! Session credential stores for the MentorHub client. Supports two modes:
//!
//! - **memory**: In-process store backed by a concurrent map
//! - **file**: JSON document on disk that survives process restarts
//!
//! The backend is selected at runtime based on configuration. The
//! [`credentials`] module layers the login/teardown vocabulary on top of
//! whichever backend is active.

pub mod credentials;
#[cfg(feature = "file")]
pub mod file;
pub mod keys;
#[cfg(feature = "memory")]
pub mod memory;
pub mod provider;

pub use provider::SessionStoreManager;
