pub mod auth;

pub use auth::{AccessPolicy, AuthenticatedUser, require_admin, require_auth};
