//! Domain models for accounts.
//!
//! These types represent validated domain objects separate from database
//! row types.

pub mod address;
pub mod profile;
pub mod user;

pub use address::BillingAddress;
pub use profile::Profile;
pub use user::{User, UserFlags};
