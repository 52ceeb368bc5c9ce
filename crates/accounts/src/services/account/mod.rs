//! Account service.
//!
//! The validated construction and persistence path for users: creation
//! (normal and superuser), password login, password changes, soft
//! deactivation, and profile access. Every operation that saves a user
//! finishes by provisioning their profile explicitly - there is no global
//! post-save hook.

mod error;

pub use error::AccountError;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use sqlx::PgPool;

use limeleaf_core::{Email, UserId};

use crate::db::RepositoryError;
use crate::db::profiles::ProfileRepository;
use crate::db::users::UserRepository;
use crate::models::profile::Profile;
use crate::models::user::{User, UserFlags};

/// Minimum password length.
const MIN_PASSWORD_LENGTH: usize = 8;

/// Optional attributes accepted when creating a user.
///
/// Flags are `Option<bool>` so that an explicitly passed `false` stays
/// distinguishable from "not specified" - superuser creation rejects the
/// former. `full_name` and `phone` seed the provisioned profile.
#[derive(Debug, Clone, Default)]
pub struct CreateUserOptions {
    /// Administrative access flag (default: false).
    pub is_staff: Option<bool>,
    /// Full-permission flag (default: false).
    pub is_superuser: Option<bool>,
    /// Active flag (default: true).
    pub is_active: Option<bool>,
    /// Initial profile display name.
    pub full_name: Option<String>,
    /// Initial profile phone number.
    pub phone: Option<String>,
}

/// Account service.
///
/// Handles user creation, password authentication, and profile access.
pub struct AccountService<'a> {
    users: UserRepository<'a>,
    profiles: ProfileRepository<'a>,
}

impl<'a> AccountService<'a> {
    /// Create a new account service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            users: UserRepository::new(pool),
            profiles: ProfileRepository::new(pool),
        }
    }

    // =========================================================================
    // User Creation
    // =========================================================================

    /// Create and save a user with the given email and password.
    ///
    /// The email is normalized before storage. The user and password hash
    /// commit in one transaction, after which the profile is provisioned
    /// (seeded from `options.full_name` / `options.phone`).
    ///
    /// # Errors
    ///
    /// Returns `AccountError::InvalidEmail` if the email is empty or malformed.
    /// Returns `AccountError::WeakPassword` if the password doesn't meet requirements.
    /// Returns `AccountError::UserAlreadyExists` if the email is already registered.
    pub async fn create_user(
        &self,
        email: &str,
        password: &str,
        options: CreateUserOptions,
    ) -> Result<User, AccountError> {
        let email = Email::parse(email)?;

        validate_password(password)?;
        let password_hash = hash_password(password)?;

        let flags = UserFlags {
            is_staff: options.is_staff.unwrap_or(false),
            is_superuser: options.is_superuser.unwrap_or(false),
            is_active: options.is_active.unwrap_or(true),
        };

        let user = self
            .users
            .create(&email, &password_hash, flags)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => AccountError::UserAlreadyExists,
                other => AccountError::Repository(other),
            })?;

        // The user row is committed at this point; provisioning observes it.
        self.profiles
            .ensure_for_user(
                user.id,
                options.full_name.as_deref().unwrap_or(""),
                options.phone.as_deref().unwrap_or(""),
            )
            .await?;

        tracing::info!(user_id = %user.id, email = %user.email, "created user");

        Ok(user)
    }

    /// Create and save a superuser with the given email and password.
    ///
    /// Forces `is_staff`, `is_superuser`, and `is_active` to true, then
    /// delegates to [`Self::create_user`].
    ///
    /// # Errors
    ///
    /// Returns `AccountError::Validation` if the caller explicitly passed
    /// `false` for the staff or superuser flag, plus everything
    /// [`Self::create_user`] can return.
    pub async fn create_superuser(
        &self,
        email: &str,
        password: &str,
        options: CreateUserOptions,
    ) -> Result<User, AccountError> {
        let options = superuser_options(options)?;
        self.create_user(email, password, options).await
    }

    // =========================================================================
    // Password Authentication
    // =========================================================================

    /// Login with email and password.
    ///
    /// # Errors
    ///
    /// Returns `AccountError::InvalidCredentials` if the email/password is wrong.
    /// Returns `AccountError::UserInactive` for a deactivated account.
    pub async fn login_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<User, AccountError> {
        let email = Email::parse(email)?;

        let (user, password_hash) = self
            .users
            .get_password_hash(&email)
            .await?
            .ok_or(AccountError::InvalidCredentials)?;

        verify_password(password, &password_hash)?;

        if !user.is_active {
            return Err(AccountError::UserInactive);
        }

        Ok(user)
    }

    /// Change a user's password.
    ///
    /// # Errors
    ///
    /// Returns `AccountError::UserNotFound` if the user doesn't exist.
    /// Returns `AccountError::WeakPassword` if the password doesn't meet requirements.
    pub async fn change_password(
        &self,
        user_id: UserId,
        new_password: &str,
    ) -> Result<(), AccountError> {
        validate_password(new_password)?;
        let password_hash = hash_password(new_password)?;

        let user = self.get_user(user_id).await?;
        self.users
            .set_password_hash(user.id, &password_hash)
            .await?;
        self.profiles.ensure_for_user(user.id, "", "").await?;

        Ok(())
    }

    // =========================================================================
    // Account Lifecycle
    // =========================================================================

    /// Deactivate a user (soft delete).
    ///
    /// # Errors
    ///
    /// Returns `AccountError::UserNotFound` if the user doesn't exist.
    pub async fn deactivate(&self, user_id: UserId) -> Result<(), AccountError> {
        self.set_active(user_id, false).await
    }

    /// Reactivate a previously deactivated user.
    ///
    /// # Errors
    ///
    /// Returns `AccountError::UserNotFound` if the user doesn't exist.
    pub async fn reactivate(&self, user_id: UserId) -> Result<(), AccountError> {
        self.set_active(user_id, true).await
    }

    async fn set_active(&self, user_id: UserId, is_active: bool) -> Result<(), AccountError> {
        self.users
            .set_active(user_id, is_active)
            .await
            .map_err(|e| match e {
                RepositoryError::NotFound => AccountError::UserNotFound,
                other => AccountError::Repository(other),
            })?;

        // Save semantics: every user save re-runs profile provisioning.
        self.profiles.ensure_for_user(user_id, "", "").await?;

        tracing::info!(user_id = %user_id, is_active, "updated active flag");

        Ok(())
    }

    // =========================================================================
    // Lookups & Profiles
    // =========================================================================

    /// Get a user by ID.
    ///
    /// # Errors
    ///
    /// Returns `AccountError::UserNotFound` if the user doesn't exist.
    pub async fn get_user(&self, user_id: UserId) -> Result<User, AccountError> {
        self.users
            .get_by_id(user_id)
            .await?
            .ok_or(AccountError::UserNotFound)
    }

    /// Find a user by email, if one exists.
    ///
    /// # Errors
    ///
    /// Returns `AccountError::InvalidEmail` if the email is malformed.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, AccountError> {
        let email = Email::parse(email)?;
        Ok(self.users.get_by_email(&email).await?)
    }

    /// Get a user's profile, provisioning it if absent.
    ///
    /// # Errors
    ///
    /// Returns `AccountError::Repository` if the database operation fails.
    pub async fn profile(&self, user_id: UserId) -> Result<Profile, AccountError> {
        Ok(self.profiles.ensure_for_user(user_id, "", "").await?)
    }

    /// Update a user's profile display name and phone.
    ///
    /// # Errors
    ///
    /// Returns `AccountError::Repository` if the database operation fails.
    pub async fn update_profile(
        &self,
        user_id: UserId,
        full_name: &str,
        phone: &str,
    ) -> Result<Profile, AccountError> {
        // Provision first so an update never races a missing profile.
        self.profiles.ensure_for_user(user_id, "", "").await?;
        Ok(self.profiles.update(user_id, full_name, phone).await?)
    }
}

/// Resolve creation options for a superuser.
///
/// Rejects explicitly-false staff/superuser flags, then forces all three
/// account flags to true.
fn superuser_options(mut options: CreateUserOptions) -> Result<CreateUserOptions, AccountError> {
    if options.is_staff == Some(false) {
        return Err(AccountError::Validation(
            "superuser must have is_staff=true".to_owned(),
        ));
    }
    if options.is_superuser == Some(false) {
        return Err(AccountError::Validation(
            "superuser must have is_superuser=true".to_owned(),
        ));
    }

    options.is_staff = Some(true);
    options.is_superuser = Some(true);
    options.is_active = Some(true);

    Ok(options)
}

/// Validate password meets requirements.
fn validate_password(password: &str) -> Result<(), AccountError> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(AccountError::WeakPassword(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }

    Ok(())
}

/// Hash a password using Argon2id.
fn hash_password(password: &str) -> Result<String, AccountError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AccountError::PasswordHash)
}

/// Verify a password against a hash.
fn verify_password(password: &str, hash: &str) -> Result<(), AccountError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AccountError::InvalidCredentials)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AccountError::InvalidCredentials)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hash_differs_from_plaintext() {
        let hash = hash_password("correct horse battery").unwrap();
        assert_ne!(hash, "correct horse battery");
        assert!(hash.starts_with("$argon2"));
    }

    #[test]
    fn test_password_verifies_against_own_hash() {
        let hash = hash_password("correct horse battery").unwrap();
        assert!(verify_password("correct horse battery", &hash).is_ok());
    }

    #[test]
    fn test_wrong_password_rejected() {
        let hash = hash_password("correct horse battery").unwrap();
        assert!(matches!(
            verify_password("incorrect horse", &hash),
            Err(AccountError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_short_password_rejected() {
        assert!(matches!(
            validate_password("short"),
            Err(AccountError::WeakPassword(_))
        ));
        assert!(validate_password("long enough").is_ok());
    }

    #[test]
    fn test_superuser_options_force_flags() {
        let options = superuser_options(CreateUserOptions::default()).unwrap();
        assert_eq!(options.is_staff, Some(true));
        assert_eq!(options.is_superuser, Some(true));
        assert_eq!(options.is_active, Some(true));
    }

    #[test]
    fn test_superuser_options_override_inactive() {
        let options = superuser_options(CreateUserOptions {
            is_active: Some(false),
            ..CreateUserOptions::default()
        })
        .unwrap();
        assert_eq!(options.is_active, Some(true));
    }

    #[test]
    fn test_superuser_rejects_explicit_non_staff() {
        let err = superuser_options(CreateUserOptions {
            is_staff: Some(false),
            ..CreateUserOptions::default()
        })
        .unwrap_err();
        assert!(matches!(err, AccountError::Validation(_)));
        assert!(err.to_string().contains("is_staff"));
    }

    #[test]
    fn test_superuser_rejects_explicit_non_superuser() {
        let err = superuser_options(CreateUserOptions {
            is_superuser: Some(false),
            ..CreateUserOptions::default()
        })
        .unwrap_err();
        assert!(matches!(err, AccountError::Validation(_)));
        assert!(err.to_string().contains("is_superuser"));
    }

    #[test]
    fn test_superuser_options_keep_profile_seed() {
        let options = superuser_options(CreateUserOptions {
            full_name: Some("Root".to_owned()),
            phone: Some("+1 555 0100".to_owned()),
            ..CreateUserOptions::default()
        })
        .unwrap();
        assert_eq!(options.full_name.as_deref(), Some("Root"));
        assert_eq!(options.phone.as_deref(), Some("+1 555 0100"));
    }
}
