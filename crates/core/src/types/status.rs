//! Status enums for orders and employees.

use serde::{Deserialize, Serialize};

/// Error returned when parsing a status from a string.
#[derive(thiserror::Error, Debug, Clone)]
#[error("invalid {kind} status: {value}")]
pub struct StatusParseError {
    /// Which status enum rejected the value.
    pub kind: &'static str,
    /// The rejected input.
    pub value: String,
}

/// Pickup order lifecycle status.
///
/// Stored in `PostgreSQL` as the `order_status` enum type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "order_status", rename_all = "lowercase")
)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Placed, not yet picked.
    #[default]
    Pending,
    /// Picked and staged for customer pickup.
    Ready,
    /// Handed over to the customer.
    Completed,
    /// Cancelled before pickup.
    Cancelled,
}

impl OrderStatus {
    /// All statuses, in lifecycle order.
    pub const ALL: [Self; 4] = [
        Self::Pending,
        Self::Ready,
        Self::Completed,
        Self::Cancelled,
    ];

    /// Stable string form, matching the database enum labels.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Ready => "ready",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Human-facing label for tables and badges.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Ready => "Ready for Pickup",
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = StatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "ready" => Ok(Self::Ready),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(StatusParseError {
                kind: "order",
                value: s.to_owned(),
            }),
        }
    }
}

/// Employee employment status.
///
/// Stored in `PostgreSQL` as the `employee_status` enum type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "employee_status", rename_all = "lowercase")
)]
#[serde(rename_all = "lowercase")]
pub enum EmployeeStatus {
    #[default]
    Active,
    Inactive,
}

impl EmployeeStatus {
    /// Stable string form, matching the database enum labels.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }
}

impl std::fmt::Display for EmployeeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for EmployeeStatus {
    type Err = StatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            _ => Err(StatusParseError {
                kind: "employee",
                value: s.to_owned(),
            }),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_order_status_roundtrip() {
        for status in OrderStatus::ALL {
            let parsed: OrderStatus = status.as_str().parse().unwrap();
            assert_eq!(parsed, status);
        }
    }

    #[test]
    fn test_order_status_parse_invalid() {
        assert!("shipped".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn test_employee_status_roundtrip() {
        assert_eq!(
            "active".parse::<EmployeeStatus>().unwrap(),
            EmployeeStatus::Active
        );
        assert_eq!(
            "inactive".parse::<EmployeeStatus>().unwrap(),
            EmployeeStatus::Inactive
        );
        assert!("fired".parse::<EmployeeStatus>().is_err());
    }
}
