//! Core type definitions used across the MentorHub workspace.

pub mod credentials;
pub mod user_type;

pub use credentials::SessionCredentials;
pub use user_type::UserType;
