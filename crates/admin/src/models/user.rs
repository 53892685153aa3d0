//! User domain types.

use chrono::{DateTime, Utc};

use curbside_core::{Email, Role, StoreId, UserId};

/// A console user (domain type).
///
/// The argon2 password hash never leaves the db layer; it is not part of
/// this type.
#[derive(Debug, Clone)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// User's email address (login identifier).
    pub email: Email,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Role determining console access.
    pub role: Role,
    /// Store the user belongs to. Only admins and employees carry one.
    pub store_id: Option<StoreId>,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Full display name.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
