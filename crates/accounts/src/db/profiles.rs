//! Profile repository for database operations.
//!
//! Profiles are provisioned here, not constructed by application code:
//! [`ProfileRepository::ensure_for_user`] runs at the end of user creation
//! and after user-mutating operations, and is idempotent.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use limeleaf_core::{ProfileId, UserId};

use super::RepositoryError;
use crate::models::profile::Profile;

/// Database row for a profile.
#[derive(sqlx::FromRow)]
struct ProfileRow {
    id: i32,
    user_id: i32,
    full_name: String,
    phone: String,
    date_joined: DateTime<Utc>,
}

impl From<ProfileRow> for Profile {
    fn from(row: ProfileRow) -> Self {
        Self {
            id: ProfileId::new(row.id),
            user_id: UserId::new(row.user_id),
            full_name: row.full_name,
            phone: row.phone,
            date_joined: row.date_joined,
        }
    }
}

const PROFILE_COLUMNS: &str = "id, user_id, full_name, phone, date_joined";

/// Repository for profile database operations.
pub struct ProfileRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProfileRepository<'a> {
    /// Create a new profile repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Provision the profile for a user, creating it if absent.
    ///
    /// Idempotent: the unique constraint on `user_id` plus
    /// `ON CONFLICT DO NOTHING` guarantee at most one profile per user, so
    /// repeated calls (every user save goes through here) never create a
    /// duplicate. Seed values only apply on first creation; an existing
    /// profile is returned untouched.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    /// Returns `RepositoryError::NotFound` if the user doesn't exist.
    pub async fn ensure_for_user(
        &self,
        user_id: UserId,
        full_name: &str,
        phone: &str,
    ) -> Result<Profile, RepositoryError> {
        let inserted = sqlx::query_as::<_, ProfileRow>(&format!(
            "INSERT INTO accounts.profile (user_id, full_name, phone)
             VALUES ($1, $2, $3)
             ON CONFLICT (user_id) DO NOTHING
             RETURNING {PROFILE_COLUMNS}"
        ))
        .bind(user_id.as_i32())
        .bind(full_name)
        .bind(phone)
        .fetch_optional(self.pool)
        .await?;

        match inserted {
            Some(row) => Ok(row.into()),
            // Conflict path: the profile already existed.
            None => self
                .get_by_user(user_id)
                .await?
                .ok_or(RepositoryError::NotFound),
        }
    }

    /// Get the profile for a user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_user(&self, user_id: UserId) -> Result<Option<Profile>, RepositoryError> {
        let row = sqlx::query_as::<_, ProfileRow>(&format!(
            "SELECT {PROFILE_COLUMNS} FROM accounts.profile WHERE user_id = $1"
        ))
        .bind(user_id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    /// Update a user's profile fields. `date_joined` is never touched.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the user has no profile.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(
        &self,
        user_id: UserId,
        full_name: &str,
        phone: &str,
    ) -> Result<Profile, RepositoryError> {
        let row = sqlx::query_as::<_, ProfileRow>(&format!(
            "UPDATE accounts.profile
             SET full_name = $1, phone = $2
             WHERE user_id = $3
             RETURNING {PROFILE_COLUMNS}"
        ))
        .bind(full_name)
        .bind(phone)
        .bind(user_id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        row.map(Into::into).ok_or(RepositoryError::NotFound)
    }
}
