//! Integration tests for Limeleaf.
//!
//! # Running Tests
//!
//! These tests run against a real `PostgreSQL` database and are `#[ignore]`d
//! by default so `cargo test` passes without one.
//!
//! ```bash
//! # Point at a disposable test database
//! export ACCOUNTS_TEST_DATABASE_URL=postgres://localhost/limeleaf_test
//!
//! # Run the ignored database tests
//! cargo test -p limeleaf-integration-tests -- --ignored
//! ```
//!
//! # Expected schema
//!
//! The test database must carry the `accounts` schema:
//!
//! ```sql
//! CREATE SCHEMA IF NOT EXISTS accounts;
//!
//! CREATE TABLE accounts."user" (
//!     id           SERIAL PRIMARY KEY,
//!     email        TEXT NOT NULL UNIQUE,
//!     is_staff     BOOLEAN NOT NULL DEFAULT FALSE,
//!     is_superuser BOOLEAN NOT NULL DEFAULT FALSE,
//!     is_active    BOOLEAN NOT NULL DEFAULT TRUE,
//!     created_at   TIMESTAMPTZ NOT NULL DEFAULT NOW(),
//!     updated_at   TIMESTAMPTZ NOT NULL DEFAULT NOW()
//! );
//!
//! CREATE TABLE accounts.user_password (
//!     user_id       INTEGER PRIMARY KEY REFERENCES accounts."user"(id) ON DELETE CASCADE,
//!     password_hash TEXT NOT NULL
//! );
//!
//! CREATE TABLE accounts.profile (
//!     id          SERIAL PRIMARY KEY,
//!     user_id     INTEGER NOT NULL UNIQUE REFERENCES accounts."user"(id) ON DELETE CASCADE,
//!     full_name   TEXT NOT NULL DEFAULT '',
//!     phone       TEXT NOT NULL DEFAULT '',
//!     date_joined TIMESTAMPTZ NOT NULL DEFAULT NOW()
//! );
//!
//! CREATE TABLE accounts.billing_address (
//!     id         SERIAL PRIMARY KEY,
//!     user_id    INTEGER NOT NULL UNIQUE REFERENCES accounts."user"(id) ON DELETE CASCADE,
//!     address    TEXT NOT NULL,
//!     city       TEXT NOT NULL,
//!     country    TEXT NOT NULL,
//!     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
//!     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
//! );
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::time::{SystemTime, UNIX_EPOCH};

use sqlx::PgPool;

/// Connect to the test database.
///
/// Reads `ACCOUNTS_TEST_DATABASE_URL`, falling back to
/// `ACCOUNTS_DATABASE_URL`.
///
/// # Panics
///
/// Panics if neither variable is set or the connection fails - these tests
/// only run when a database was explicitly provided.
pub async fn test_pool() -> PgPool {
    dotenvy::dotenv().ok();

    let url = std::env::var("ACCOUNTS_TEST_DATABASE_URL")
        .or_else(|_| std::env::var("ACCOUNTS_DATABASE_URL"))
        .expect("set ACCOUNTS_TEST_DATABASE_URL to run database tests");

    PgPool::connect(&url)
        .await
        .expect("failed to connect to the test database")
}

/// Generate a unique email so tests never collide on the unique constraint.
#[must_use]
pub fn unique_email(prefix: &str) -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();
    format!("{prefix}+{nanos}@test.limeleaf.example")
}
