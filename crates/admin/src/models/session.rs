//! Session-related types for authentication.
//!
//! Types stored in the session for authentication state.

use serde::{Deserialize, Serialize};

use curbside_core::{Email, Role, StoreId, UserId};

use super::user::User;

/// Session-stored identity.
///
/// Minimal data stored in the session to identify the logged-in user.
/// At most one `CurrentUser` lives in a session at a time; login overwrites
/// it and logout removes it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    /// User's database ID.
    pub id: UserId,
    /// User's email address.
    pub email: Email,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Role determining console access.
    pub role: Role,
    /// Store association, when the role has one.
    pub store_id: Option<StoreId>,
}

impl CurrentUser {
    /// Membership test of the current role in the given set.
    #[must_use]
    pub fn has_role(&self, roles: &[Role]) -> bool {
        roles.contains(&self.role)
    }

    /// Full display name.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl From<&User> for CurrentUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            role: user.role,
            store_id: user.store_id,
        }
    }
}

/// Session keys for authentication data.
pub mod keys {
    /// Key for storing the current logged-in user.
    pub const CURRENT_USER: &str = "current_user";

    /// Key for one-shot flash notifications.
    pub const FLASH: &str = "flash";
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn current_user(role: Role) -> CurrentUser {
        CurrentUser {
            id: UserId::new(1),
            email: Email::parse("user@example.com").unwrap(),
            first_name: "Store".to_string(),
            last_name: "Admin".to_string(),
            role,
            store_id: Some(StoreId::new(1)),
        }
    }

    #[test]
    fn test_has_role_membership() {
        let user = current_user(Role::Admin);
        assert!(user.has_role(&[Role::Admin]));
        assert!(user.has_role(&[Role::SysAdmin, Role::Admin]));
        assert!(!user.has_role(&[Role::SysAdmin]));
        assert!(!user.has_role(&[]));
    }

    #[test]
    fn test_has_role_is_idempotent() {
        let user = current_user(Role::Employee);
        let first = user.has_role(&[Role::Employee]);
        let second = user.has_role(&[Role::Employee]);
        assert_eq!(first, second);
    }

    #[test]
    fn test_full_name() {
        assert_eq!(current_user(Role::Admin).full_name(), "Store Admin");
    }
}
