//! Endpoint wrappers built on the request pipeline.

pub mod auth;

pub use auth::AuthApi;
