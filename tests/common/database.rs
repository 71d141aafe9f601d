//! PostgreSQL fixtures for the `#[ignore]`d storage tests.
//!
//! Run with a reachable database configured through `USERHUB__DATABASE__*`:
//! `cargo test -- --ignored`

use std::sync::Once;

use sqlx::PgPool;
use userhub::{database, load_config};

static INIT: Once = Once::new();

/// Test database wrapper scoped to a per-test email prefix
pub struct TestDb {
    pub pool: PgPool,
    test_prefix: String,
}

impl TestDb {
    /// Connects, migrates and removes rows left behind by an earlier run of
    /// the same test.
    ///
    /// # Important
    /// Pass the test function name as `test_name` so parallel tests never
    /// share rows.
    pub async fn new(test_name: &str) -> Self {
        INIT.call_once(|| {
            dotenvy::dotenv().ok();
        });

        let config = load_config().expect("Failed to load config");
        let pool = database::connect(&config.database)
            .await
            .expect("Failed to connect to database");
        database::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");

        let test_db = Self {
            pool,
            test_prefix: format!("test_{test_name}"),
        };
        test_db.cleanup().await;
        test_db
    }

    pub fn test_prefix(&self) -> &str {
        &self.test_prefix
    }

    /// A unique email inside this test's namespace
    pub fn email(&self, local: &str) -> String {
        format!("{}_{}@example.com", self.test_prefix, local)
    }

    pub async fn get_connection(&self) -> sqlx::pool::PoolConnection<sqlx::Postgres> {
        self.pool
            .acquire()
            .await
            .expect("Failed to acquire connection")
    }

    pub async fn cleanup(&self) {
        sqlx::query("DELETE FROM users WHERE email LIKE $1")
            .bind(format!("{}_%", self.test_prefix.to_lowercase()))
            .execute(&self.pool)
            .await
            .expect("Failed to cleanup test data");
    }
}
