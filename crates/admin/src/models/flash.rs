//! One-shot flash notifications.
//!
//! Login, logout, and every CRUD mutation leave a flash in the session;
//! the next rendered page consumes and displays it.

use serde::{Deserialize, Serialize};

/// Severity of a flash notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashLevel {
    Success,
    Error,
    Info,
}

impl FlashLevel {
    /// CSS class used by the base template.
    #[must_use]
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::Success => "flash-success",
            Self::Error => "flash-error",
            Self::Info => "flash-info",
        }
    }
}

/// A one-shot user-facing notification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Flash {
    /// Severity.
    pub level: FlashLevel,
    /// Message shown to the user.
    pub message: String,
}

impl Flash {
    /// Success notification.
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Success,
            message: message.into(),
        }
    }

    /// Error notification.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Error,
            message: message.into(),
        }
    }

    /// Informational notification.
    #[must_use]
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Info,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_set_level() {
        assert_eq!(Flash::success("ok").level, FlashLevel::Success);
        assert_eq!(Flash::error("no").level, FlashLevel::Error);
        assert_eq!(Flash::info("hi").level, FlashLevel::Info);
    }

    #[test]
    fn test_css_classes() {
        assert_eq!(FlashLevel::Success.css_class(), "flash-success");
        assert_eq!(FlashLevel::Error.css_class(), "flash-error");
        assert_eq!(FlashLevel::Info.css_class(), "flash-info");
    }
}
