//! Database operations for the accounts `PostgreSQL` schema.
//!
//! # Schema: `accounts`
//!
//! ## Tables
//!
//! - `user` - Email-keyed identity records (unique email, staff/active flags)
//! - `user_password` - Argon2id password hashes, one row per user
//! - `profile` - One-to-one profile per user (display name, phone, join date),
//!   cascade-deleted with the user
//! - `billing_address` - One billing address per user (address, city, country)
//!
//! Queries use the runtime-bound sqlx API so the workspace builds without a
//! live database. Uniqueness (email, one profile per user) is enforced by
//! database constraints and surfaced as [`RepositoryError::Conflict`].

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub mod addresses;
pub mod profiles;
pub mod users;

/// Errors from repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., unique email).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
/// * `max_connections` - Upper bound for the pool
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(
    database_url: &secrecy::SecretString,
    max_connections: u32,
) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
