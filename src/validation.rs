//! Input validation utilities for the service layer.
//!
//! Every check returns a `validation` error with a message suitable for
//! clients, except identifier parsing which fails with `bad_request`.

use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::users::{MAX_EMAIL_LENGTH, MAX_NAME_LENGTH};

/// Minimum length of a display name, in characters.
pub const MIN_NAME_LENGTH: usize = 2;
/// Minimum length of a password, in characters.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Trims and lowercases an email address. Emails are stored in this form.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Validates email format using structural checks
///
/// # Arguments
/// * `email` - The email address to validate
///
/// # Returns
/// * `Ok(())` if the email is valid
/// * `Err(Error)` with descriptive message if invalid
///
/// # Examples
/// ```
/// use userhub::validation::validate_email;
///
/// validate_email("user@example.com").unwrap();
/// assert!(validate_email("invalid-email").is_err());
/// ```
pub fn validate_email(email: &str) -> Result<()> {
    let email = email.trim();

    if email.is_empty() {
        return Err(Error::validation("email is required"));
    }

    if email.chars().count() > MAX_EMAIL_LENGTH {
        return Err(Error::validation(format!(
            "email must be at most {} characters",
            MAX_EMAIL_LENGTH
        )));
    }

    let Some((local_part, domain)) = email.split_once('@') else {
        return Err(Error::validation("invalid email format"));
    };

    if local_part.is_empty() || domain.is_empty() || domain.contains('@') {
        return Err(Error::validation("invalid email format"));
    }

    if local_part.len() > 64 {
        return Err(Error::validation("invalid email format: local part is too long"));
    }

    if !domain.contains('.') || domain.starts_with('.') || domain.ends_with('.') {
        return Err(Error::validation("invalid email format: domain must contain a dot"));
    }

    if email.contains("..") {
        return Err(Error::validation("invalid email format: consecutive dots"));
    }

    let invalid_chars = ['<', '>', '(', ')', '[', ']', '\\', ',', ';', ':', '"'];
    if email
        .chars()
        .any(|c| c.is_whitespace() || c.is_control() || invalid_chars.contains(&c))
    {
        return Err(Error::validation("invalid email format"));
    }

    Ok(())
}

/// Validates a display name: between 2 and 120 characters after trimming.
pub fn validate_name(name: &str) -> Result<()> {
    let length = name.trim().chars().count();

    if length < MIN_NAME_LENGTH {
        return Err(Error::validation(format!(
            "name must be at least {} characters",
            MIN_NAME_LENGTH
        )));
    }

    if length > MAX_NAME_LENGTH {
        return Err(Error::validation(format!(
            "name must be at most {} characters",
            MAX_NAME_LENGTH
        )));
    }

    Ok(())
}

/// Validates password length. Whitespace at the ends is ignored.
pub fn validate_password(password: &str) -> Result<()> {
    if password.trim().chars().count() < MIN_PASSWORD_LENGTH {
        return Err(Error::validation(format!(
            "password must be at least {} characters",
            MIN_PASSWORD_LENGTH
        )));
    }

    Ok(())
}

/// Parses a user identifier. Malformed ids are a `bad_request`.
pub fn parse_user_id(id: &str) -> Result<Uuid> {
    Uuid::parse_str(id.trim()).map_err(|e| Error::bad_request("invalid id").with_source(e))
}
