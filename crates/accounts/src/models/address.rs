//! Billing address domain type.

use chrono::{DateTime, Utc};

use limeleaf_core::{AddressId, UserId};

/// A user's billing address (domain type).
///
/// One row per user, written through the
/// [`BillingAddressForm`](crate::forms::BillingAddressForm) binding.
#[derive(Debug, Clone)]
pub struct BillingAddress {
    /// Unique address ID.
    pub id: AddressId,
    /// The owning user. Cascade-deleted with them.
    pub user_id: UserId,
    /// Street address.
    pub address: String,
    /// City.
    pub city: String,
    /// Country.
    pub country: String,
    /// When the address was first saved.
    pub created_at: DateTime<Utc>,
    /// When the address was last updated.
    pub updated_at: DateTime<Utc>,
}
