pub mod auth;
pub mod jwt;
pub mod passwords;
pub mod users;

pub use auth::{AuthService, AuthSettings};
pub use passwords::PasswordHashing;
pub use users::UserService;
