use std::sync::Arc;

use crate::{
    config::Config,
    error::Result,
    middleware::auth::AccessPolicy,
    repository::UserRepository,
    services::{AuthService, AuthSettings, PasswordHashing, UserService},
};

/// Application state shared across all HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// User CRUD and listing
    pub users: UserService,
    /// Registration, login and admin password resets
    pub auth: AuthService,
    /// Token verification and the administrator gate
    pub access: AccessPolicy,
    /// Storage backend, used directly by readiness checks
    pub repository: Arc<dyn UserRepository>,
}

impl AppState {
    pub fn new(
        repository: Arc<dyn UserRepository>,
        passwords: PasswordHashing,
        settings: AuthSettings,
        access: AccessPolicy,
    ) -> Self {
        Self {
            users: UserService::new(repository.clone()),
            auth: AuthService::new(repository.clone(), passwords, settings),
            access,
            repository,
        }
    }

    /// Wires every service from `config` on top of `repository`.
    pub fn from_config(config: &Config, repository: Arc<dyn UserRepository>) -> Result<Self> {
        let passwords = PasswordHashing::new(&config.password)?;

        Ok(Self::new(
            repository,
            passwords,
            AuthSettings::from_config(config),
            AccessPolicy::from_config(config),
        ))
    }
}
