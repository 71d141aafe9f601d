use std::net::SocketAddr;

use reqwest::{Client, redirect::Policy};
use tokio::net::TcpListener;
use userhub::build_router;

use crate::common::services::TestServices;

/// Options for [`TestApp::new_with_options`]
#[derive(Debug, Clone, Default)]
pub struct TestAppOptions {
    /// Administrator email; `None` leaves the admin gate open
    pub admin_email: Option<String>,
}

impl TestAppOptions {
    pub fn with_admin(email: &str) -> Self {
        Self {
            admin_email: Some(email.to_string()),
        }
    }
}

/// HTTP test application wrapper
///
/// Manages an Axum server running on a random port for HTTP testing.
/// Each test gets its own server and in-memory store, so tests can run
/// in parallel.
pub struct TestApp {
    /// Server base URL (e.g., "http://127.0.0.1:54321")
    pub address: String,
    /// HTTP client for making requests
    pub client: Client,
    /// Services sharing the server's store, for seeding and inspection
    pub services: TestServices,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::new_with_options(TestAppOptions::default()).await
    }

    /// # How it works:
    /// 1. Builds the full router over an in-memory repository
    /// 2. Binds to port 0 (OS assigns random available port)
    /// 3. Starts server in background task
    /// 4. Creates reqwest client configured for testing
    pub async fn new_with_options(options: TestAppOptions) -> Self {
        let services = TestServices::new();
        let app = build_router(services.state(options.admin_email.as_deref()));

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{port}");

        tokio::spawn(async move {
            axum::serve(
                listener,
                app.into_make_service_with_connect_info::<SocketAddr>(),
            )
            .await
            .unwrap();
        });

        let client = Client::builder()
            .redirect(Policy::none())
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            address,
            client,
            services,
        }
    }

    /// Get the full URL for an endpoint
    ///
    /// # Example
    /// ```rust
    /// let url = app.url("/healthz");
    /// // Returns: "http://127.0.0.1:54321/healthz"
    /// ```
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }
}
