//! CLI command implementations.

pub mod user;
