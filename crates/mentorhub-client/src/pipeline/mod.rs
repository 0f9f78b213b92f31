//! Authenticated request pipeline.

pub mod client;
pub mod refresh;
pub mod request;

pub use client::ApiClient;
pub use refresh::RefreshCoordinator;
pub use request::ApiRequest;
