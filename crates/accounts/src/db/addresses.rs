//! Billing address repository for database operations.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use limeleaf_core::{AddressId, UserId};

use super::RepositoryError;
use crate::forms::BillingAddressInput;
use crate::models::address::BillingAddress;

/// Database row for a billing address.
#[derive(sqlx::FromRow)]
struct AddressRow {
    id: i32,
    user_id: i32,
    address: String,
    city: String,
    country: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<AddressRow> for BillingAddress {
    fn from(row: AddressRow) -> Self {
        Self {
            id: AddressId::new(row.id),
            user_id: UserId::new(row.user_id),
            address: row.address,
            city: row.city,
            country: row.country,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const ADDRESS_COLUMNS: &str = "id, user_id, address, city, country, created_at, updated_at";

/// Repository for billing address database operations.
pub struct BillingAddressRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> BillingAddressRepository<'a> {
    /// Create a new billing address repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Write a user's billing address, replacing any existing one.
    ///
    /// One billing address per user; the unique constraint on `user_id`
    /// turns a second save into an update.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails (including a
    /// foreign-key violation when the user doesn't exist).
    pub async fn upsert(
        &self,
        user_id: UserId,
        input: &BillingAddressInput,
    ) -> Result<BillingAddress, RepositoryError> {
        let row = sqlx::query_as::<_, AddressRow>(&format!(
            "INSERT INTO accounts.billing_address (user_id, address, city, country)
             VALUES ($1, $2, $3, $4)
             ON CONFLICT (user_id) DO UPDATE
             SET address = EXCLUDED.address,
                 city = EXCLUDED.city,
                 country = EXCLUDED.country,
                 updated_at = NOW()
             RETURNING {ADDRESS_COLUMNS}"
        ))
        .bind(user_id.as_i32())
        .bind(&input.address)
        .bind(&input.city)
        .bind(&input.country)
        .fetch_one(self.pool)
        .await?;

        Ok(row.into())
    }

    /// Get a user's billing address.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_user(
        &self,
        user_id: UserId,
    ) -> Result<Option<BillingAddress>, RepositoryError> {
        let row = sqlx::query_as::<_, AddressRow>(&format!(
            "SELECT {ADDRESS_COLUMNS} FROM accounts.billing_address WHERE user_id = $1"
        ))
        .bind(user_id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Into::into))
    }
}
