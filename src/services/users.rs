use std::sync::Arc;

use uuid::Uuid;

use crate::{
    error::Result,
    models::{
        pagination::{ListQuery, PageResult},
        users::{NewUser, User, UserChanges},
    },
    repository::UserRepository,
    validation::{normalize_email, parse_user_id, validate_email, validate_name},
};

const USER_NOT_FOUND: &str = "user not found";

/// Validated user CRUD and paginated listing.
#[derive(Clone)]
pub struct UserService {
    repository: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }

    /// Creates a user without a password.
    pub async fn create(&self, name: &str, email: &str) -> Result<User> {
        let name = name.trim();
        let email = normalize_email(email);

        validate_name(name)?;
        validate_email(&email)?;

        let user = self
            .repository
            .create(NewUser {
                id: None,
                name: name.to_string(),
                email,
                password_hash: None,
            })
            .await
            .map_err(|e| e.into_app_error(USER_NOT_FOUND, "failed to save user"))?;

        tracing::info!(user_id = %user.id, "user created");
        Ok(user)
    }

    pub async fn list(&self, query: &ListQuery) -> Result<PageResult<User>> {
        let request = query.normalize();

        let (items, total) = self
            .repository
            .find_paged(&request)
            .await
            .map_err(|e| e.into_app_error(USER_NOT_FOUND, "failed to list users"))?;

        Ok(PageResult::new(items, &request, total))
    }

    pub async fn get(&self, id: &str) -> Result<User> {
        let id = parse_user_id(id)?;
        self.get_by_id(id).await
    }

    /// Profile of the authenticated caller.
    pub async fn me(&self, user_id: Uuid) -> Result<User> {
        self.get_by_id(user_id).await
    }

    /// Applies the fields present in `changes`. Absent or blank fields are
    /// kept as they are.
    pub async fn update(&self, id: &str, changes: UserChanges) -> Result<User> {
        let id = parse_user_id(id)?;
        let mut user = self.get_by_id(id).await?;

        let changes = changes.without_blanks();
        if changes.is_empty() {
            return Ok(user);
        }

        if let Some(name) = changes.name {
            let name = name.trim();
            validate_name(name)?;
            user.name = name.to_string();
        }

        if let Some(email) = changes.email {
            let email = normalize_email(&email);
            validate_email(&email)?;
            user.email = email;
        }

        let updated = self
            .repository
            .update(&user)
            .await
            .map_err(|e| e.into_app_error(USER_NOT_FOUND, "failed to save user"))?;

        tracing::info!(user_id = %updated.id, "user updated");
        Ok(updated)
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        let id = parse_user_id(id)?;

        self.repository
            .delete(id)
            .await
            .map_err(|e| e.into_app_error(USER_NOT_FOUND, "failed to delete user"))?;

        tracing::info!(user_id = %id, "user deleted");
        Ok(())
    }

    async fn get_by_id(&self, id: Uuid) -> Result<User> {
        self.repository
            .find_by_id(id)
            .await
            .map_err(|e| e.into_app_error(USER_NOT_FOUND, "failed to load user"))
    }
}
