//! Integration tests for Curbside.
//!
//! # Running Tests
//!
//! ```bash
//! # Start PostgreSQL, migrate and seed
//! cargo run -p curbside-cli -- migrate
//! cargo run -p curbside-cli -- seed
//!
//! # Start the console
//! cargo run -p curbside-admin
//!
//! # Run integration tests against it
//! cargo test -p curbside-integration-tests -- --ignored
//! ```
//!
//! Tests assume the seeded demo accounts (`sysadmin@example.com`,
//! `admin@example.com`, `employee@example.com`, password `curbside-demo`)
//! and target the server at `ADMIN_BASE_URL` (default
//! `http://localhost:3001`).

use reqwest::Client;
use reqwest::redirect::Policy;

/// Seeded demo password shared by all demo accounts.
pub const DEMO_PASSWORD: &str = "curbside-demo";

/// Base URL for the admin console (configurable via environment).
#[must_use]
pub fn admin_base_url() -> String {
    std::env::var("ADMIN_BASE_URL").unwrap_or_else(|_| "http://localhost:3001".to_string())
}

/// Cookie-holding client that follows redirects, for page-content checks.
///
/// # Panics
///
/// Panics if the client cannot be built.
#[must_use]
pub fn client() -> Client {
    Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to create HTTP client")
}

/// Cookie-holding client that does NOT follow redirects, for asserting on
/// the redirect responses themselves.
///
/// # Panics
///
/// Panics if the client cannot be built.
#[must_use]
pub fn manual_redirect_client() -> Client {
    Client::builder()
        .cookie_store(true)
        .redirect(Policy::none())
        .build()
        .expect("Failed to create HTTP client")
}

/// Log the client in via the login form.
///
/// # Panics
///
/// Panics if the request fails.
pub async fn login(client: &Client, email: &str, password: &str) {
    let base_url = admin_base_url();
    let resp = client
        .post(format!("{base_url}/login"))
        .form(&[("email", email), ("password", password)])
        .send()
        .await
        .expect("Failed to submit login form");

    assert!(
        resp.status().is_success() || resp.status().is_redirection(),
        "Login failed with status: {}",
        resp.status()
    );
}
