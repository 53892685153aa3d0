//! Employee domain type.

use chrono::{DateTime, Utc};

use curbside_core::{Email, EmployeeId, EmployeeStatus, StoreId};

/// A store employee record.
///
/// Distinct from [`super::User`]: this is the staff roster a store admin
/// manages, not a console login.
#[derive(Debug, Clone)]
pub struct Employee {
    /// Unique employee ID.
    pub id: EmployeeId,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Contact email.
    pub email: Email,
    /// Contact phone number.
    pub phone: String,
    /// Job title, e.g. "Cashier".
    pub position: String,
    /// Employment status.
    pub status: EmployeeStatus,
    /// Store this employee works at.
    pub store_id: StoreId,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
    /// When the record was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Employee {
    /// Full display name.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
