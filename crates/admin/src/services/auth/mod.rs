//! Authentication service.
//!
//! Email and password sign-in with Argon2id hashes. Login failures are
//! uniform: an unknown email and a wrong password produce the same error.

mod error;

pub use error::AuthError;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use sqlx::PgPool;

use curbside_core::{Email, Role};

use crate::db::UserRepository;
use crate::models::CurrentUser;

/// Authentication service for the admin console.
pub struct AuthService<'a> {
    users: UserRepository<'a>,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            users: UserRepository::new(pool),
        }
    }

    /// Verify an email/password pair and return the session identity.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` for an unknown email, a
    /// malformed email, or a wrong password.
    /// Returns `AuthError::Repository` if the database lookup fails.
    pub async fn verify_login(
        &self,
        email: &str,
        password: &str,
    ) -> Result<CurrentUser, AuthError> {
        let Ok(email) = Email::parse(email) else {
            return Err(AuthError::InvalidCredentials);
        };

        let credentials = self
            .users
            .get_credentials_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !verify_password(password, &credentials.password_hash) {
            return Err(AuthError::InvalidCredentials);
        }

        Ok(CurrentUser::from(&credentials.user))
    }
}

/// Hash a password with Argon2id and a fresh random salt.
///
/// # Errors
///
/// Returns `AuthError::Hashing` if hashing fails.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AuthError::Hashing(e.to_string()))?;

    Ok(hash.to_string())
}

/// Verify a password against a stored hash.
///
/// An unparseable hash verifies as false rather than erroring, so a
/// corrupt row behaves like a wrong password.
#[must_use]
pub fn verify_password(password: &str, hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(hash) else {
        return false;
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

/// The dashboard a role lands on after sign-in.
#[must_use]
pub const fn landing_path(role: Role) -> &'static str {
    match role {
        Role::SysAdmin => "/sysadmin",
        Role::Admin => "/admin",
        Role::Employee => "/employee",
        Role::Customer => "/",
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let password = "my-secure-password-123!";
        let hash = hash_password(password).unwrap();

        assert!(verify_password(password, &hash));
        assert!(!verify_password("wrong-password", &hash));
    }

    #[test]
    fn test_different_hashes() {
        let password = "same-password";
        let hash1 = hash_password(password).unwrap();
        let hash2 = hash_password(password).unwrap();

        // Same password, different salts
        assert_ne!(hash1, hash2);

        assert!(verify_password(password, &hash1));
        assert!(verify_password(password, &hash2));
    }

    #[test]
    fn test_hash_format() {
        let hash = hash_password("test").unwrap();
        assert!(hash.starts_with("$argon2id$"));
    }

    #[test]
    fn test_unparseable_hash_is_wrong_password() {
        assert!(!verify_password("anything", "not-a-phc-string"));
    }

    #[test]
    fn test_landing_paths() {
        assert_eq!(landing_path(Role::SysAdmin), "/sysadmin");
        assert_eq!(landing_path(Role::Admin), "/admin");
        assert_eq!(landing_path(Role::Employee), "/employee");
        assert_eq!(landing_path(Role::Customer), "/");
    }
}
