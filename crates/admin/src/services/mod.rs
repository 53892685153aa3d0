//! Business logic services for the admin console.

pub mod auth;

pub use auth::{AuthError, AuthService};
