//! Integration tests for the sysadmin screens: store layout, category
//! icons, and text labels.
//!
//! These tests require:
//! - A running `PostgreSQL` database with migrations applied
//! - Seeded demo data (cargo run -p curbside-cli -- seed)
//! - The console running (cargo run -p curbside-admin)
//!
//! Run with: cargo test -p curbside-integration-tests -- --ignored

use reqwest::{Client, StatusCode};
use uuid::Uuid;

use curbside_integration_tests::{DEMO_PASSWORD, admin_base_url, client, login};

async fn sysadmin_client() -> Client {
    let client = client();
    login(&client, "sysadmin@example.com", DEMO_PASSWORD).await;
    client
}

// ============================================================================
// Store Layout
// ============================================================================

#[tokio::test]
#[ignore = "Requires running admin server and seeded database"]
async fn test_layout_list_in_position_order() {
    let client = sysadmin_client().await;
    let base_url = admin_base_url();

    let resp = client
        .get(format!("{base_url}/sysadmin/layout"))
        .send()
        .await
        .expect("Failed to get layout screen");
    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.expect("Failed to read response");

    // Seeded sections appear in insertion order
    let featured = body.find("Featured").expect("Featured section missing");
    let deals = body.find("Weekly Deals").expect("Weekly Deals section missing");
    let seasonal = body.find("Seasonal").expect("Seasonal section missing");
    assert!(featured < deals);
    assert!(deals < seasonal);
}

#[tokio::test]
#[ignore = "Requires running admin server and seeded database"]
async fn test_layout_add_move_toggle_delete() {
    let client = sysadmin_client().await;
    let base_url = admin_base_url();

    // Add a section with a unique name
    let name = format!("Test Section {}", Uuid::new_v4());
    let resp = client
        .post(format!("{base_url}/sysadmin/layout"))
        .form(&[("name", name.as_str())])
        .send()
        .await
        .expect("Failed to add section");
    assert!(resp.status().is_success() || resp.status().is_redirection());

    let body = client
        .get(format!("{base_url}/sysadmin/layout"))
        .send()
        .await
        .expect("Failed to get layout screen")
        .text()
        .await
        .expect("Failed to read response");
    assert!(body.contains(&name));

    // New sections land at the bottom, so the last toggle form is ours
    let id = extract_last_id(&body, "/sysadmin/layout/", "/toggle").expect("Section not found");

    // Move it up one slot
    let resp = client
        .post(format!("{base_url}/sysadmin/layout/{id}/move"))
        .form(&[("direction", "up")])
        .send()
        .await
        .expect("Failed to move section");
    assert!(resp.status().is_success() || resp.status().is_redirection());

    // Disable it
    let resp = client
        .post(format!("{base_url}/sysadmin/layout/{id}/toggle"))
        .send()
        .await
        .expect("Failed to toggle section");
    assert!(resp.status().is_success() || resp.status().is_redirection());

    // Delete it; remaining positions stay contiguous (checked by the
    // ordering test above on the seeded rows)
    let resp = client
        .post(format!("{base_url}/sysadmin/layout/{id}/delete"))
        .send()
        .await
        .expect("Failed to delete section");
    assert!(resp.status().is_success() || resp.status().is_redirection());

    let body = client
        .get(format!("{base_url}/sysadmin/layout"))
        .send()
        .await
        .expect("Failed to get layout screen")
        .text()
        .await
        .expect("Failed to read response");
    assert!(!body.contains(&name));
}

#[tokio::test]
#[ignore = "Requires running admin server and seeded database"]
async fn test_layout_empty_name_rejected() {
    let client = sysadmin_client().await;
    let base_url = admin_base_url();

    let resp = client
        .post(format!("{base_url}/sysadmin/layout"))
        .form(&[("name", "   ")])
        .send()
        .await
        .expect("Failed to submit layout form");

    // Back on the screen with an error flash
    assert!(resp.status().is_success() || resp.status().is_redirection());
}

// ============================================================================
// Category Icons
// ============================================================================

#[tokio::test]
#[ignore = "Requires running admin server and seeded database"]
async fn test_icon_list_and_update() {
    let client = sysadmin_client().await;
    let base_url = admin_base_url();

    let resp = client
        .get(format!("{base_url}/sysadmin/icons"))
        .send()
        .await
        .expect("Failed to get icons screen");
    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.expect("Failed to read response");
    assert!(body.contains("Produce"));
    assert!(body.contains("produce.svg"));

    let id = extract_first_id(&body, "/sysadmin/icons/").expect("Icon row not found");

    // Rename and point at a new image
    let resp = client
        .post(format!("{base_url}/sysadmin/icons/{id}"))
        .form(&[
            ("name", "Bakery"),
            ("image_url", "https://cdn.example.com/icons/bakery-v2.svg"),
        ])
        .send()
        .await
        .expect("Failed to update icon");
    assert!(resp.status().is_success() || resp.status().is_redirection());

    let body = client
        .get(format!("{base_url}/sysadmin/icons"))
        .send()
        .await
        .expect("Failed to get icons screen")
        .text()
        .await
        .expect("Failed to read response");
    assert!(body.contains("bakery-v2.svg"));
}

// ============================================================================
// Text Labels
// ============================================================================

#[tokio::test]
#[ignore = "Requires running admin server and seeded database"]
async fn test_label_list_shows_keys_and_descriptions() {
    let client = sysadmin_client().await;
    let base_url = admin_base_url();

    let resp = client
        .get(format!("{base_url}/sysadmin/labels"))
        .send()
        .await
        .expect("Failed to get labels screen");
    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.expect("Failed to read response");
    assert!(body.contains("home.hero.title"));
    assert!(body.contains("Storefront hero heading"));
}

#[tokio::test]
#[ignore = "Requires running admin server and seeded database"]
async fn test_label_value_update() {
    let client = sysadmin_client().await;
    let base_url = admin_base_url();

    let body = client
        .get(format!("{base_url}/sysadmin/labels"))
        .send()
        .await
        .expect("Failed to get labels screen")
        .text()
        .await
        .expect("Failed to read response");
    let id = extract_first_id(&body, "/sysadmin/labels/").expect("Label row not found");

    let value = format!("Updated copy {}", Uuid::new_v4());
    let resp = client
        .post(format!("{base_url}/sysadmin/labels/{id}"))
        .form(&[("value", value.as_str())])
        .send()
        .await
        .expect("Failed to update label");
    assert!(resp.status().is_success() || resp.status().is_redirection());

    let body = client
        .get(format!("{base_url}/sysadmin/labels"))
        .send()
        .await
        .expect("Failed to get labels screen")
        .text()
        .await
        .expect("Failed to read response");
    assert!(body.contains(&value));
}

/// First numeric ID following `prefix` in the rendered HTML.
fn extract_first_id(body: &str, prefix: &str) -> Option<i32> {
    let start = body.find(prefix)? + prefix.len();
    let rest = body.get(start..)?;
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    rest.get(..end)?.parse().ok()
}

/// Last numeric ID in an action URL shaped like `{prefix}{id}{suffix}`.
fn extract_last_id(body: &str, prefix: &str, suffix: &str) -> Option<i32> {
    let mut last = None;
    let mut search_from = 0;
    while let Some(pos) = body.get(search_from..)?.find(prefix) {
        let start = search_from + pos + prefix.len();
        let rest = body.get(start..)?;
        let end = rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len());
        if rest.get(end..)?.starts_with(suffix)
            && let Ok(id) = rest.get(..end)?.parse()
        {
            last = Some(id);
        }
        search_from = start;
    }
    last
}
