//! Console user management commands.
//!
//! # Usage
//!
//! ```bash
//! # Create a store admin
//! cb-cli users create -e dana@example.com -f Dana -l Reyes -r admin -s 1 -p "pass"
//!
//! # Create a sysadmin (no store)
//! cb-cli users create -e ops@example.com -f Sam -l Okafor -r sysadmin -p "pass"
//! ```
//!
//! # Environment Variables
//!
//! - `ADMIN_DATABASE_URL` - `PostgreSQL` connection string (falls back to
//!   `DATABASE_URL`)
//! - `CB_CLI_PASSWORD` - Password to use when `-p` is omitted

use secrecy::SecretString;
use thiserror::Error;

use curbside_admin::db::{self, RepositoryError, UserRepository};
use curbside_admin::services::auth;
use curbside_core::{Email, Role, StoreId};

/// Errors that can occur during user management operations.
#[derive(Debug, Error)]
pub enum UserError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// Invalid role.
    #[error("Invalid role: {0}. Valid roles: sysadmin, admin, employee")]
    InvalidRole(String),

    /// Invalid email.
    #[error("Invalid email: {0}")]
    InvalidEmail(String),

    /// Store required for this role.
    #[error("Role '{0}' requires a store ID (use --store)")]
    StoreRequired(&'static str),

    /// No password supplied.
    #[error("No password given: pass --password or set CB_CLI_PASSWORD")]
    MissingPassword,

    /// Password hashing error.
    #[error("Password hashing error: {0}")]
    Hashing(String),

    /// Database connection error.
    #[error("Database connection error: {0}")]
    Database(#[from] sqlx::Error),

    /// Repository error.
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Create a new console user.
///
/// # Arguments
///
/// * `email` - Email address
/// * `first_name` / `last_name` - Display name
/// * `role` - Role (`sysadmin`, `admin`, or `employee`)
/// * `store` - Store ID, required for `admin` and `employee` roles
/// * `password` - Plaintext password (falls back to `CB_CLI_PASSWORD`)
///
/// # Returns
///
/// The ID of the created user.
///
/// # Errors
///
/// Returns `UserError` if validation, hashing, or database operations fail.
pub async fn create_user(
    email: &str,
    first_name: &str,
    last_name: &str,
    role: &str,
    store: Option<i32>,
    password: Option<&str>,
) -> Result<i32, UserError> {
    dotenvy::dotenv().ok();

    let role: Role = role
        .parse()
        .map_err(|_| UserError::InvalidRole(role.to_owned()))?;

    let email = Email::parse(email).map_err(|e| UserError::InvalidEmail(e.to_string()))?;

    let store_id = store.map(StoreId::new);
    if matches!(role, Role::Admin | Role::Employee) && store_id.is_none() {
        return Err(UserError::StoreRequired(role.as_str()));
    }

    let password = match password {
        Some(p) => p.to_owned(),
        None => std::env::var("CB_CLI_PASSWORD")
            .map_err(|_| UserError::MissingPassword)?,
    };

    let database_url = std::env::var("ADMIN_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map(SecretString::from)
        .map_err(|_| UserError::MissingEnvVar("ADMIN_DATABASE_URL"))?;

    tracing::info!("Connecting to admin database...");
    let pool = db::create_pool(&database_url).await?;

    tracing::info!("Creating console user: {} ({})", email.as_str(), role);

    let password_hash =
        auth::hash_password(&password).map_err(|e| UserError::Hashing(e.to_string()))?;

    let repo = UserRepository::new(&pool);
    let user = repo
        .create(&email, first_name, last_name, role, store_id, &password_hash)
        .await?;

    tracing::info!(
        "User created successfully! ID: {}, Email: {}, Role: {}",
        user.id.as_i32(),
        user.email.as_str(),
        user.role
    );

    Ok(user.id.as_i32())
}
