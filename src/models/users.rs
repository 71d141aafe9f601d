use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum length of a display name, in characters.
pub const MAX_NAME_LENGTH: usize = 120;
/// Maximum length of an email address, in characters.
pub const MAX_EMAIL_LENGTH: usize = 180;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    /// Never serialized; only the store and the password hasher look at it.
    #[serde(skip_serializing, default)]
    pub password_hash: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Whether the account has been given a password yet.
    pub fn has_password(&self) -> bool {
        self.password_hash
            .as_deref()
            .is_some_and(|hash| !hash.is_empty())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    /// Assigned by the store when absent.
    pub id: Option<Uuid>,
    pub name: String,
    pub email: String,
    pub password_hash: Option<String>,
}

/// Profile changes for a partial update. `None` or a blank string leaves the
/// field as it is.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserChanges {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl UserChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none()
    }

    /// Drops fields that are empty after trimming.
    pub fn without_blanks(self) -> Self {
        Self {
            name: self.name.filter(|name| !name.trim().is_empty()),
            email: self.email.filter(|email| !email.trim().is_empty()),
        }
    }
}

/// Result of a successful registration or login.
#[derive(Debug, Clone, Serialize)]
pub struct AuthSession {
    pub user: User,
    pub token: String,
    pub token_type: &'static str,
    pub expires_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user(password_hash: Option<&str>) -> User {
        let now = Utc::now();
        User {
            id: Uuid::now_v7(),
            name: "Jane".to_string(),
            email: "jane@example.com".to_string(),
            password_hash: password_hash.map(str::to_string),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_password_hash_is_never_serialized() {
        let user = sample_user(Some("$argon2id$v=19$secret"));
        let json = serde_json::to_value(&user).unwrap();

        assert!(json.get("password_hash").is_none());
        assert_eq!(json["email"], "jane@example.com");
    }

    #[test]
    fn test_has_password() {
        assert!(sample_user(Some("$argon2id$hash")).has_password());
        assert!(!sample_user(Some("")).has_password());
        assert!(!sample_user(None).has_password());
    }

    #[test]
    fn test_user_changes_missing_fields_are_none() {
        let changes: UserChanges = serde_json::from_str(r#"{"name":"New Name"}"#).unwrap();
        assert_eq!(changes.name.as_deref(), Some("New Name"));
        assert!(changes.email.is_none());
        assert!(!changes.is_empty());
        assert!(UserChanges::default().is_empty());
    }

    #[test]
    fn test_user_changes_blank_fields_are_dropped() {
        let changes = UserChanges {
            name: Some("   ".to_string()),
            email: Some("new@example.com".to_string()),
        }
        .without_blanks();
        assert!(changes.name.is_none());
        assert_eq!(changes.email.as_deref(), Some("new@example.com"));

        let changes = UserChanges {
            name: Some(String::new()),
            email: Some(String::new()),
        };
        assert!(changes.without_blanks().is_empty());
    }
}
