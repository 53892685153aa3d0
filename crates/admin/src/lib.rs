//! Curbside Admin library.
//!
//! Role-gated admin console for the Curbside grocery pickup service:
//! email/password sign-in backed by `PostgreSQL` sessions, plus management
//! screens for products, pickup orders, employees, store layout, category
//! icons, and app text labels.
//!
//! Exposed as a library so route handlers, repositories, and the auth
//! service can be exercised from tests and reused by the CLI.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
