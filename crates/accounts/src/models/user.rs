//! User domain type.

use core::fmt;

use chrono::{DateTime, Utc};

use limeleaf_core::{Email, UserId};

/// A Limeleaf user (domain type).
///
/// Identity is keyed by email - there is no separate username. The display
/// name lives on the user's [`Profile`](crate::models::Profile), so the
/// name accessors here return the email.
#[derive(Debug, Clone)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// User's email address (unique, normalized).
    pub email: Email,
    /// Whether the user can access administrative features.
    pub is_staff: bool,
    /// Whether the user has every permission without explicit grants.
    pub is_superuser: bool,
    /// Active flag. Deactivate instead of deleting accounts.
    pub is_active: bool,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// The user's full name for display purposes. Users carry no name field
    /// of their own, so this is the email address.
    #[must_use]
    pub fn full_name(&self) -> &str {
        self.email.as_str()
    }

    /// The user's short name for display purposes. Also the email address.
    #[must_use]
    pub fn short_name(&self) -> &str {
        self.email.as_str()
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.email)
    }
}

/// Resolved account flags for a new user row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserFlags {
    /// Administrative access flag.
    pub is_staff: bool,
    /// Full-permission flag.
    pub is_superuser: bool,
    /// Active flag.
    pub is_active: bool,
}

impl Default for UserFlags {
    fn default() -> Self {
        Self {
            is_staff: false,
            is_superuser: false,
            is_active: true,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User {
            id: UserId::new(1),
            email: Email::parse("user@example.com").unwrap(),
            is_staff: false,
            is_superuser: false,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_names_are_the_email() {
        let user = sample_user();
        assert_eq!(user.full_name(), "user@example.com");
        assert_eq!(user.short_name(), "user@example.com");
    }

    #[test]
    fn test_display_is_the_email() {
        assert_eq!(sample_user().to_string(), "user@example.com");
    }

    #[test]
    fn test_default_flags() {
        let flags = UserFlags::default();
        assert!(!flags.is_staff);
        assert!(!flags.is_superuser);
        assert!(flags.is_active);
    }
}
