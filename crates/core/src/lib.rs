//! Limeleaf Core - Shared types library.
//!
//! This crate provides common types used across all Limeleaf components:
//! - `accounts` - User accounts, profiles, and billing data
//! - `cli` - Command-line tools for account management
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access. This
//! keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs and email addresses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
