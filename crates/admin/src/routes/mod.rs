//! HTTP route handlers for the admin console.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                       - Health check
//! GET  /health/ready                 - Readiness check (database ping)
//!
//! # Auth
//! GET  /                             - Redirect to the role landing path
//! GET  /login                        - Login page
//! POST /login                        - Email/password sign-in
//! POST /logout                       - Sign out
//! GET  /unauthorized                 - Shown when a role check fails
//!
//! # Sysadmin
//! GET  /sysadmin                     - Sysadmin dashboard
//! GET  /sysadmin/layout              - Store layout sections
//! POST /sysadmin/layout              - Add a section
//! POST /sysadmin/layout/{id}/toggle  - Enable/disable a section
//! POST /sysadmin/layout/{id}/move    - Move a section up or down
//! POST /sysadmin/layout/{id}/delete  - Remove a section
//! GET  /sysadmin/icons               - Category icons
//! POST /sysadmin/icons/{id}          - Update an icon
//! GET  /sysadmin/labels              - App text labels
//! POST /sysadmin/labels/{id}         - Update a label value
//!
//! # Store admin
//! GET  /admin                        - Store dashboard
//! GET  /admin/products               - Product listing (?q= search)
//! POST /admin/products               - Create product
//! POST /admin/products/{id}          - Update product
//! POST /admin/products/{id}/delete   - Delete product
//! GET  /admin/orders                 - Order listing (?q= &status=)
//! GET  /admin/orders/{id}            - Order detail with line items
//! POST /admin/orders/{id}/status     - Transition order status
//! GET  /admin/employees              - Employee roster (?q= search)
//! POST /admin/employees              - Create employee
//! POST /admin/employees/{id}         - Update employee
//! POST /admin/employees/{id}/delete  - Delete employee
//!
//! # Employee
//! GET  /employee                     - Today's pickup queue
//! ```

use askama::Template;
use axum::{
    Router,
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::get,
};

use crate::filters;
use crate::state::AppState;

pub mod auth;
pub mod dashboard;
pub mod employees;
pub mod health;
pub mod icons;
pub mod labels;
pub mod layout;
pub mod orders;
pub mod products;

/// Build the full application router.
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(auth::router())
        .merge(dashboard::router())
        .merge(products::router())
        .merge(orders::router())
        .merge(employees::router())
        .merge(layout::router())
        .merge(icons::router())
        .merge(labels::router())
        .route("/health", get(health::health))
        .route("/health/ready", get(health::ready))
        .fallback(not_found)
}

/// Not-found page template.
#[derive(Template)]
#[template(path = "not_found.html")]
struct NotFoundTemplate;

/// Catch-all for unknown routes.
async fn not_found() -> impl IntoResponse {
    let body = NotFoundTemplate
        .render()
        .unwrap_or_else(|_| "Page not found".to_string());
    (StatusCode::NOT_FOUND, Html(body))
}
