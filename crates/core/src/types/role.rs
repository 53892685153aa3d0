//! User roles for authorization.

use serde::{Deserialize, Serialize};

/// Error returned when parsing a [`Role`] from a string.
#[derive(thiserror::Error, Debug, Clone)]
#[error("invalid role: {0}")]
pub struct RoleParseError(pub String);

/// Role determining which console views a user may access.
///
/// Stored in `PostgreSQL` as the `user_role` enum type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "user_role", rename_all = "lowercase")
)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Platform operator: store layout, icons, and label management.
    SysAdmin,
    /// Store administrator: products, orders, and employees for one store.
    Admin,
    /// Store employee: pickup queue access.
    Employee,
    /// Shopper account; has no console access beyond the default landing.
    Customer,
}

impl Role {
    /// All roles, in privilege order.
    pub const ALL: [Self; 4] = [Self::SysAdmin, Self::Admin, Self::Employee, Self::Customer];

    /// Stable string form, matching the database enum labels.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SysAdmin => "sysadmin",
            Self::Admin => "admin",
            Self::Employee => "employee",
            Self::Customer => "customer",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = RoleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sysadmin" => Ok(Self::SysAdmin),
            "admin" => Ok(Self::Admin),
            "employee" => Ok(Self::Employee),
            "customer" => Ok(Self::Customer),
            _ => Err(RoleParseError(s.to_owned())),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_role_string_roundtrip() {
        for role in Role::ALL {
            let parsed: Role = role.as_str().parse().unwrap();
            assert_eq!(parsed, role);
        }
    }

    #[test]
    fn test_role_parse_invalid() {
        assert!("superuser".parse::<Role>().is_err());
        assert!("".parse::<Role>().is_err());
    }

    #[test]
    fn test_role_serde_lowercase() {
        let json = serde_json::to_string(&Role::SysAdmin).unwrap();
        assert_eq!(json, "\"sysadmin\"");
        let back: Role = serde_json::from_str("\"employee\"").unwrap();
        assert_eq!(back, Role::Employee);
    }
}
