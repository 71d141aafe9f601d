//! In-memory service wiring shared by service and handler tests.

use std::sync::Arc;

use chrono::Duration;
use userhub::{
    config::PasswordConfig,
    middleware::auth::AccessPolicy,
    repository::{InMemoryUserRepository, UserRepository},
    services::{AuthService, AuthSettings, PasswordHashing, UserService},
    state::AppState,
};

pub const TEST_JWT_SECRET: &str = "userhub-test-secret";
pub const TEST_PASSWORD: &str = "SecurePass123!";

/// Argon2id with the cheapest parameters the crate accepts.
pub fn fast_passwords() -> PasswordHashing {
    PasswordHashing::new(&PasswordConfig {
        memory_kib: 1024,
        iterations: 1,
        parallelism: 1,
    })
    .expect("Failed to build password hasher")
}

pub fn test_settings() -> AuthSettings {
    AuthSettings {
        jwt_secret: TEST_JWT_SECRET.to_string().into(),
        access_token_ttl: Duration::minutes(15),
    }
}

/// Services backed by a fresh in-memory repository
pub struct TestServices {
    pub repository: Arc<InMemoryUserRepository>,
    pub users: UserService,
    pub auth: AuthService,
}

impl TestServices {
    pub fn new() -> Self {
        let repository = Arc::new(InMemoryUserRepository::new());
        let shared: Arc<dyn UserRepository> = repository.clone();

        Self {
            users: UserService::new(shared.clone()),
            auth: AuthService::new(shared, fast_passwords(), test_settings()),
            repository,
        }
    }

    /// Application state over the same repository, for router tests.
    pub fn state(&self, admin_email: Option<&str>) -> AppState {
        AppState::new(
            self.repository.clone(),
            fast_passwords(),
            test_settings(),
            AccessPolicy::new(
                TEST_JWT_SECRET.to_string().into(),
                admin_email.map(str::to_string),
            ),
        )
    }
}
