//! Integration tests for login, logout, and landing redirects.
//!
//! These tests require:
//! - A running `PostgreSQL` database with migrations applied
//! - Seeded demo data (cargo run -p curbside-cli -- seed)
//! - The console running (cargo run -p curbside-admin)
//!
//! Run with: cargo test -p curbside-integration-tests -- --ignored

use reqwest::StatusCode;

use curbside_integration_tests::{
    DEMO_PASSWORD, admin_base_url, client, login, manual_redirect_client,
};

#[tokio::test]
#[ignore = "Requires running admin server and seeded database"]
async fn test_login_page_renders() {
    let client = client();
    let base_url = admin_base_url();

    let resp = client
        .get(format!("{base_url}/login"))
        .send()
        .await
        .expect("Failed to get login page");

    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.expect("Failed to read response");
    assert!(body.contains("name=\"email\""));
    assert!(body.contains("name=\"password\""));
}

#[tokio::test]
#[ignore = "Requires running admin server and seeded database"]
async fn test_login_redirects_to_role_landing() {
    let base_url = admin_base_url();

    for (email, landing) in [
        ("sysadmin@example.com", "/sysadmin"),
        ("admin@example.com", "/admin"),
        ("employee@example.com", "/employee"),
    ] {
        let client = manual_redirect_client();
        let resp = client
            .post(format!("{base_url}/login"))
            .form(&[("email", email), ("password", DEMO_PASSWORD)])
            .send()
            .await
            .expect("Failed to submit login form");

        assert!(
            resp.status().is_redirection(),
            "Expected redirect for {email}, got: {}",
            resp.status()
        );
        let location = resp
            .headers()
            .get("location")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();
        assert_eq!(location, landing, "Wrong landing for {email}");
    }
}

#[tokio::test]
#[ignore = "Requires running admin server and seeded database"]
async fn test_login_invalid_credentials() {
    let client = client();
    let base_url = admin_base_url();

    let resp = client
        .post(format!("{base_url}/login"))
        .form(&[("email", "admin@example.com"), ("password", "wrong")])
        .send()
        .await
        .expect("Failed to submit login form");

    // Redirects back to the login page with a flash message
    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.expect("Failed to read response");
    assert!(body.contains("Invalid email or password"));
}

#[tokio::test]
#[ignore = "Requires running admin server and seeded database"]
async fn test_login_unknown_email_same_message() {
    let client = client();
    let base_url = admin_base_url();

    let resp = client
        .post(format!("{base_url}/login"))
        .form(&[("email", "nobody@example.com"), ("password", "wrong")])
        .send()
        .await
        .expect("Failed to submit login form");

    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.expect("Failed to read response");
    // Unknown email and wrong password are indistinguishable
    assert!(body.contains("Invalid email or password"));
}

#[tokio::test]
#[ignore = "Requires running admin server and seeded database"]
async fn test_logout_clears_session() {
    let client = client();
    let base_url = admin_base_url();

    login(&client, "admin@example.com", DEMO_PASSWORD).await;

    // Signed in: dashboard renders
    let resp = client
        .get(format!("{base_url}/admin"))
        .send()
        .await
        .expect("Failed to get dashboard");
    assert_eq!(resp.status(), StatusCode::OK);

    // Log out
    let resp = client
        .post(format!("{base_url}/logout"))
        .send()
        .await
        .expect("Failed to log out");
    assert!(resp.status().is_success() || resp.status().is_redirection());

    // Session is gone: dashboard now redirects to login
    let manual = manual_redirect_client();
    let resp = manual
        .get(format!("{base_url}/admin"))
        .send()
        .await
        .expect("Failed to get dashboard after logout");
    // Fresh client with no cookies also gets the redirect
    assert!(resp.status().is_redirection());
}

#[tokio::test]
#[ignore = "Requires running admin server and seeded database"]
async fn test_root_redirects_by_session() {
    let base_url = admin_base_url();

    // Anonymous: root goes to login
    let anon = manual_redirect_client();
    let resp = anon
        .get(format!("{base_url}/"))
        .send()
        .await
        .expect("Failed to get root");
    assert!(resp.status().is_redirection());
    let location = resp
        .headers()
        .get("location")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert_eq!(location, "/login");

    // Signed in: root goes to the role landing
    let signed_in = manual_redirect_client();
    let resp = signed_in
        .post(format!("{base_url}/login"))
        .form(&[("email", "employee@example.com"), ("password", DEMO_PASSWORD)])
        .send()
        .await
        .expect("Failed to log in");
    assert!(resp.status().is_redirection());

    let resp = signed_in
        .get(format!("{base_url}/"))
        .send()
        .await
        .expect("Failed to get root");
    assert!(resp.status().is_redirection());
    let location = resp
        .headers()
        .get("location")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert_eq!(location, "/employee");
}
