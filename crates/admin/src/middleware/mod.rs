//! HTTP middleware stack for the admin console.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layer (capture errors)
//! 2. `TraceLayer` (request tracing)
//! 3. Session layer (tower-sessions with `PostgreSQL` store)
//! 4. Route-level auth via extractors in [`auth`]

pub mod auth;
pub mod flash;
pub mod session;

pub use auth::{
    Access, RequireEmployee, RequireStoreAdmin, RequireSysAdmin, authorize, clear_current_user,
    set_current_user,
};
pub use flash::{push_flash, take_flash};
pub use session::{SESSION_COOKIE_NAME, create_session_layer};
