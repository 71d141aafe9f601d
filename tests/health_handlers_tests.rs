mod common;

use common::TestApp;

#[tokio::test]
async fn test_health_endpoints_return_ok() {
    let app = TestApp::new().await;

    for path in ["/healthz", "/health/liveness", "/health/readiness"] {
        let response = app.client.get(app.url(path)).send().await.unwrap();

        assert_eq!(response.status(), 200, "{path} should be healthy");

        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body["status"], "ok");
    }
}
