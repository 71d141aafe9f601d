use async_trait::async_trait;
use uuid::Uuid;

use crate::database::DbPool;
use crate::models::pagination::PageRequest;
use crate::models::users::{NewUser, User};
use crate::queries;

use super::{StoreResult, UserRepository};

/// [`UserRepository`] backed by PostgreSQL through a sqlx pool.
#[derive(Debug, Clone)]
pub struct PgUserRepository {
    pool: DbPool,
}

impl PgUserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(&self, new_user: NewUser) -> StoreResult<User> {
        let mut conn = self.pool.acquire().await?;
        queries::users::create_user(&mut conn, new_user).await
    }

    async fn find_all(&self) -> StoreResult<Vec<User>> {
        let mut conn = self.pool.acquire().await?;
        queries::users::list_users(&mut conn).await
    }

    async fn find_by_id(&self, id: Uuid) -> StoreResult<User> {
        let mut conn = self.pool.acquire().await?;
        queries::users::get_user_by_id(&mut conn, id).await
    }

    async fn find_by_email(&self, email: &str) -> StoreResult<User> {
        let mut conn = self.pool.acquire().await?;
        queries::users::get_user_by_email(&mut conn, email).await
    }

    async fn update(&self, user: &User) -> StoreResult<User> {
        let mut conn = self.pool.acquire().await?;
        queries::users::update_user(&mut conn, user).await
    }

    async fn delete(&self, id: Uuid) -> StoreResult<()> {
        let mut conn = self.pool.acquire().await?;
        queries::users::delete_user(&mut conn, id).await
    }

    async fn find_paged(&self, request: &PageRequest) -> StoreResult<(Vec<User>, i64)> {
        let mut conn = self.pool.acquire().await?;

        let total = queries::users::count_users(&mut conn, request).await?;
        if total == 0 {
            return Ok((Vec::new(), 0));
        }

        let users = queries::users::list_users_page(&mut conn, request).await?;
        Ok((users, total))
    }

    async fn update_password_hash(&self, id: Uuid, password_hash: &str) -> StoreResult<()> {
        let mut conn = self.pool.acquire().await?;
        queries::users::update_user_password(&mut conn, id, password_hash).await
    }

    async fn ping(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
