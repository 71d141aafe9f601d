use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use crate::config::PasswordConfig;
use crate::error::{Error, Result};

/// Salted argon2id password hashing with configurable cost.
#[derive(Clone)]
pub struct PasswordHashing {
    argon2: Argon2<'static>,
}

impl std::fmt::Debug for PasswordHashing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordHashing").finish_non_exhaustive()
    }
}

impl PasswordHashing {
    /// Builds a hasher from cost parameters. Parameters argon2 rejects (for
    /// example memory below 8 KiB per lane) are a configuration error.
    pub fn new(config: &PasswordConfig) -> Result<Self> {
        let params = Params::new(
            config.memory_kib,
            config.iterations,
            config.parallelism,
            None,
        )
        .map_err(|e| Error::internal(format!("invalid password hashing parameters: {}", e)))?;

        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }

    /// Hashes a password into a PHC string with a fresh random salt.
    pub fn hash(&self, password: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| {
                Error::internal("failed to hash password").with_source(e.to_string())
            })?;

        Ok(hash.to_string())
    }

    /// Verifies a password against a stored hash.
    ///
    /// A mismatch is `Ok(false)`. The parameters embedded in the hash are
    /// used, so hashes made with older cost settings still verify.
    pub fn verify(&self, password: &str, hash: &str) -> Result<bool> {
        let parsed_hash = PasswordHash::new(hash).map_err(|e| {
            Error::internal("stored password hash is malformed").with_source(e.to_string())
        })?;

        match self.argon2.verify_password(password.as_bytes(), &parsed_hash) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(Error::internal("password verification failed").with_source(e.to_string())),
        }
    }
}

impl Default for PasswordHashing {
    fn default() -> Self {
        Self {
            argon2: Argon2::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    fn fast_hasher() -> PasswordHashing {
        PasswordHashing::new(&PasswordConfig {
            memory_kib: 1024,
            iterations: 1,
            parallelism: 1,
        })
        .unwrap()
    }

    #[test]
    fn test_hash_is_argon2id_and_not_plaintext() {
        let hasher = fast_hasher();
        let hash = hasher.hash("secret123").unwrap();

        assert!(hash.starts_with("$argon2id$"));
        assert!(!hash.contains("secret123"));
    }

    #[test]
    fn test_same_password_different_hashes() {
        let hasher = fast_hasher();
        let first = hasher.hash("secret123").unwrap();
        let second = hasher.hash("secret123").unwrap();

        assert_ne!(first, second, "salts should differ");
        assert!(hasher.verify("secret123", &first).unwrap());
        assert!(hasher.verify("secret123", &second).unwrap());
    }

    #[test]
    fn test_verify_mismatch_is_false() {
        let hasher = fast_hasher();
        let hash = hasher.hash("secret123").unwrap();

        assert!(!hasher.verify("secret124", &hash).unwrap());
        assert!(!hasher.verify("", &hash).unwrap());
    }

    #[test]
    fn test_verify_uses_parameters_from_hash() {
        let hash = fast_hasher().hash("secret123").unwrap();
        assert!(PasswordHashing::default().verify("secret123", &hash).unwrap());
    }

    #[test]
    fn test_malformed_hash_is_internal() {
        let error = fast_hasher().verify("secret123", "not-a-phc-string").unwrap_err();
        assert_eq!(error.code(), ErrorCode::Internal);
    }

    #[test]
    fn test_invalid_parameters_rejected() {
        let result = PasswordHashing::new(&PasswordConfig {
            memory_kib: 1,
            iterations: 1,
            parallelism: 1,
        });
        assert!(result.is_err());
    }
}
