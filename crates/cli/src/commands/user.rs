//! User account management commands.
//!
//! # Usage
//!
//! ```bash
//! # Create a regular user with a seeded profile
//! lime-cli user create -e user@example.com -p "a strong password" -n "Ada Lovelace"
//!
//! # Create a superuser
//! lime-cli user create-superuser -e admin@example.com -p "a strong password"
//! ```
//!
//! # Environment Variables
//!
//! - `ACCOUNTS_DATABASE_URL` - `PostgreSQL` connection string

use sqlx::PgPool;
use thiserror::Error;

use limeleaf_accounts::config::{AccountsConfig, ConfigError};
use limeleaf_accounts::db;
use limeleaf_accounts::services::account::{AccountError, AccountService, CreateUserOptions};

/// Errors that can occur during user commands.
#[derive(Debug, Error)]
pub enum UserCommandError {
    /// Configuration failed to load.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Database connection error.
    #[error("database connection error: {0}")]
    Database(#[from] sqlx::Error),

    /// Account operation error.
    #[error("account error: {0}")]
    Account(#[from] AccountError),

    /// No user exists with the given email.
    #[error("no user found with email: {0}")]
    NoSuchUser(String),
}

async fn connect() -> Result<PgPool, UserCommandError> {
    let config = AccountsConfig::from_env()?;

    tracing::info!("Connecting to accounts database...");
    let pool = db::create_pool(&config.database_url, config.db_max_connections).await?;

    Ok(pool)
}

/// Create a new user.
///
/// # Arguments
///
/// * `email` - Unique account email
/// * `password` - Plaintext password (hashed before storage)
/// * `full_name` / `phone` - Optional profile seed values
/// * `staff` - Grant administrative access
pub async fn create(
    email: &str,
    password: &str,
    full_name: Option<String>,
    phone: Option<String>,
    staff: bool,
) -> Result<(), UserCommandError> {
    let pool = connect().await?;
    let service = AccountService::new(&pool);

    let options = CreateUserOptions {
        is_staff: staff.then_some(true),
        full_name,
        phone,
        ..CreateUserOptions::default()
    };

    let user = service.create_user(email, password, options).await?;

    tracing::info!(
        "User created successfully! ID: {}, Email: {}",
        user.id,
        user.email
    );

    Ok(())
}

/// Create a new superuser.
pub async fn create_superuser(email: &str, password: &str) -> Result<(), UserCommandError> {
    let pool = connect().await?;
    let service = AccountService::new(&pool);

    let user = service
        .create_superuser(email, password, CreateUserOptions::default())
        .await?;

    tracing::info!(
        "Superuser created successfully! ID: {}, Email: {}",
        user.id,
        user.email
    );

    Ok(())
}

/// Deactivate a user account by email (soft delete).
pub async fn deactivate(email: &str) -> Result<(), UserCommandError> {
    let pool = connect().await?;
    let service = AccountService::new(&pool);

    let user = service
        .find_by_email(email)
        .await?
        .ok_or_else(|| UserCommandError::NoSuchUser(email.to_owned()))?;

    service.deactivate(user.id).await?;

    tracing::info!("Deactivated user {} ({})", user.id, user.email);
    tracing::info!("Reactivate later by flipping is_active; no data is deleted.");

    Ok(())
}
