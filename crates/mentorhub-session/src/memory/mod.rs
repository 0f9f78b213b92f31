//! In-process session store.

pub mod store;

pub use store::MemorySessionStore;
