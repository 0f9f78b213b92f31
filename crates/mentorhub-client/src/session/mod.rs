//! Client-side session lifecycle: teardown, redirects, and inactivity.

pub mod idle;
pub mod navigator;
pub mod redirect;
pub mod teardown;

pub use idle::{ActivityTracker, IdleMonitor};
pub use navigator::RouteNavigator;
pub use redirect::RedirectPolicy;
pub use teardown::SessionTerminator;
