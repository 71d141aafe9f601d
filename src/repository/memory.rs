use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::StorageErrorKind;
use crate::models::pagination::{PageRequest, SortColumn, SortDirection};
use crate::models::users::{NewUser, User};

use super::{StoreError, StoreResult, UserRepository};

const UNIQUE_EMAIL_MESSAGE: &str =
    r#"duplicate key value violates unique constraint "users_email_key""#;

/// In-memory implementation of [`UserRepository`] (for development/testing).
///
/// Enforces the same unique-email constraint as the `users` table and
/// reports violations with the same storage error code.
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn matches_search(user: &User, search: &str) -> bool {
    if search.is_empty() {
        return true;
    }
    let needle = search.to_lowercase();
    user.name.to_lowercase().contains(&needle) || user.email.to_lowercase().contains(&needle)
}

/// Case-insensitive first, like the database collation, then bytewise.
fn cmp_ignore_case(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

fn compare_users(a: &User, b: &User, column: SortColumn) -> Ordering {
    let by_column = match column {
        SortColumn::CreatedAt => a.created_at.cmp(&b.created_at),
        SortColumn::Name => cmp_ignore_case(&a.name, &b.name),
        SortColumn::Email => cmp_ignore_case(&a.email, &b.email),
    };
    by_column.then_with(|| a.id.cmp(&b.id))
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, new_user: NewUser) -> StoreResult<User> {
        let mut users = self.users.write().await;

        if users.values().any(|u| u.email == new_user.email) {
            return Err(StoreError::database(
                StorageErrorKind::UniqueViolation,
                UNIQUE_EMAIL_MESSAGE,
            ));
        }

        let id = new_user.id.unwrap_or_else(Uuid::now_v7);
        if users.contains_key(&id) {
            return Err(StoreError::database(
                StorageErrorKind::UniqueViolation,
                r#"duplicate key value violates unique constraint "users_pkey""#,
            ));
        }

        let now = Utc::now();
        let user = User {
            id,
            name: new_user.name,
            email: new_user.email,
            password_hash: new_user.password_hash,
            created_at: now,
            updated_at: now,
        };
        users.insert(user.id, user.clone());

        Ok(user)
    }

    async fn find_all(&self) -> StoreResult<Vec<User>> {
        let users = self.users.read().await;
        let mut result: Vec<User> = users.values().cloned().collect();
        result.sort_by(|a, b| compare_users(b, a, SortColumn::CreatedAt));
        Ok(result)
    }

    async fn find_by_id(&self, id: Uuid) -> StoreResult<User> {
        let users = self.users.read().await;
        users.get(&id).cloned().ok_or(StoreError::NotFound)
    }

    async fn find_by_email(&self, email: &str) -> StoreResult<User> {
        let users = self.users.read().await;
        users
            .values()
            .find(|u| u.email == email)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn update(&self, user: &User) -> StoreResult<User> {
        let mut users = self.users.write().await;

        if users
            .values()
            .any(|u| u.id != user.id && u.email == user.email)
        {
            return Err(StoreError::database(
                StorageErrorKind::UniqueViolation,
                UNIQUE_EMAIL_MESSAGE,
            ));
        }

        let stored = users.get_mut(&user.id).ok_or(StoreError::NotFound)?;
        stored.name = user.name.clone();
        stored.email = user.email.clone();
        stored.updated_at = Utc::now();

        Ok(stored.clone())
    }

    async fn delete(&self, id: Uuid) -> StoreResult<()> {
        let mut users = self.users.write().await;
        users.remove(&id).map(|_| ()).ok_or(StoreError::NotFound)
    }

    async fn find_paged(&self, request: &PageRequest) -> StoreResult<(Vec<User>, i64)> {
        let users = self.users.read().await;

        let mut matching: Vec<&User> = users
            .values()
            .filter(|u| matches_search(u, &request.search))
            .collect();

        let total = matching.len() as i64;
        if total == 0 {
            return Ok((Vec::new(), 0));
        }

        matching.sort_by(|a, b| match request.sort_direction {
            SortDirection::Asc => compare_users(a, b, request.sort_column),
            SortDirection::Desc => compare_users(b, a, request.sort_column),
        });

        let offset = usize::try_from(request.offset()).unwrap_or(usize::MAX);
        let limit = usize::try_from(request.page_size).unwrap_or(0);
        let page = matching
            .into_iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect();

        Ok((page, total))
    }

    async fn update_password_hash(&self, id: Uuid, password_hash: &str) -> StoreResult<()> {
        let mut users = self.users.write().await;
        let stored = users.get_mut(&id).ok_or(StoreError::NotFound)?;
        stored.password_hash = Some(password_hash.to_string());
        stored.updated_at = Utc::now();
        Ok(())
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}
