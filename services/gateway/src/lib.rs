//! shipdeck gateway library.
//!
//! This crate primarily ships a `gateway` binary, but we expose a small
//! library surface to enable integration testing and reuse.

pub mod api;
pub mod config;
pub mod mock;
pub mod state;
pub mod sweeper;
