//! Profile domain type.

use core::fmt;

use chrono::{DateTime, Utc};

use limeleaf_core::{ProfileId, UserId};

/// A user's profile (domain type).
///
/// Exactly one profile exists per user once provisioning has run; profiles
/// are never constructed directly by application code. See
/// [`ProfileRepository::ensure_for_user`](crate::db::profiles::ProfileRepository::ensure_for_user).
#[derive(Debug, Clone)]
pub struct Profile {
    /// Unique profile ID.
    pub id: ProfileId,
    /// The owning user. Cascade-deleted with them.
    pub user_id: UserId,
    /// Display name. Empty string when not yet filled in.
    pub full_name: String,
    /// Contact phone number. Empty string when not yet filled in.
    pub phone: String,
    /// When the profile was first created. Never updated afterwards.
    pub date_joined: DateTime<Utc>,
}

impl Profile {
    /// Whether the user has filled in every editable profile field.
    ///
    /// Checks `full_name` and `phone` - the fields a user actually edits.
    /// `date_joined` and the user reference are set by the database and
    /// never count toward completeness.
    #[must_use]
    pub fn is_fully_filled(&self) -> bool {
        !self.full_name.is_empty() && !self.phone.is_empty()
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "profile of user {}", self.user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(full_name: &str, phone: &str) -> Profile {
        Profile {
            id: ProfileId::new(1),
            user_id: UserId::new(1),
            full_name: full_name.to_owned(),
            phone: phone.to_owned(),
            date_joined: Utc::now(),
        }
    }

    #[test]
    fn test_fresh_profile_is_not_fully_filled() {
        assert!(!profile("", "").is_fully_filled());
    }

    #[test]
    fn test_partially_filled_profile_is_not_fully_filled() {
        assert!(!profile("Ada Lovelace", "").is_fully_filled());
        assert!(!profile("", "+45 555 0100").is_fully_filled());
    }

    #[test]
    fn test_completed_profile_is_fully_filled() {
        assert!(profile("Ada Lovelace", "+45 555 0100").is_fully_filled());
    }
}
