//! File-backed session store.

pub mod store;

pub use store::FileSessionStore;
