//! Shared test helper functions

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::common::{TestApp, services::TEST_PASSWORD};

static COUNTER: AtomicU64 = AtomicU64::new(0);

/// Generates a unique test email
///
/// # Returns
/// An address like `test_1234567890123456789_7@example.com`
pub fn generate_test_email() -> String {
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let sequence = COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("test_{timestamp}_{sequence}@example.com")
}

/// Registers a user with `email` and returns the access token
pub async fn register_as(app: &TestApp, email: &str) -> String {
    let response = app
        .client
        .post(app.url("/auth/register"))
        .json(&serde_json::json!({
            "name": "Test User",
            "email": email,
            "password": TEST_PASSWORD,
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 201);

    let body: serde_json::Value = response.json().await.unwrap();
    body["token"].as_str().unwrap().to_string()
}

/// Registers a user with a unique email and returns the access token
pub async fn register_and_login(app: &TestApp) -> String {
    register_as(app, &generate_test_email()).await
}
