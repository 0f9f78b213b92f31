//! # mentorhub-client
//!
//! Authenticated access to the MentorHub REST API.
//!
//! ## Modules
//!
//! - `pipeline`: request pipeline: bearer injection, 401 detection,
//!   single-flight token refresh, and replay of queued requests
//! - `session`: forced session teardown, redirect policy, navigation,
//!   and the inactivity monitor
//! - `api`: endpoint wrappers built on the pipeline (login/logout)

pub mod api;
pub mod pipeline;
pub mod session;

pub use api::AuthApi;
pub use pipeline::{ApiClient, ApiRequest, RefreshCoordinator};
pub use session::{ActivityTracker, IdleMonitor, RedirectPolicy, RouteNavigator, SessionTerminator};
