//! # mentorhub-cli
//!
//! Command definitions for the `mentorhub` binary: log in and out, inspect
//! the stored session, and send authenticated requests through the client
//! pipeline.

pub mod commands;
pub mod output;

pub use commands::Cli;
