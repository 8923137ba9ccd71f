use std::env;

use jsonwebtoken::Algorithm;

use crate::error::AppError;

/// Secret and algorithm for backend-issued access tokens.
#[derive(Clone)]
pub struct SecurityConfig {
    pub jwt_secret: Vec<u8>,
    /// HS256 unless overridden
    pub algorithm: Algorithm,
}

impl SecurityConfig {
    pub fn new(jwt_secret: impl Into<Vec<u8>>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            algorithm: Algorithm::HS256,
        }
    }

    /// Reads `BACKEND_JWT_SECRET`, which must be set and non-blank.
    pub fn from_env() -> Result<Self, AppError> {
        let secret = env::var("BACKEND_JWT_SECRET")
            .map_err(|_| AppError::config("BACKEND_JWT_SECRET must be set"))?;
        if secret.trim().is_empty() {
            return Err(AppError::config("BACKEND_JWT_SECRET must not be empty"));
        }
        Ok(Self::new(secret.into_bytes()))
    }
}

// Keep the secret out of logs.
impl std::fmt::Debug for SecurityConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecurityConfig")
            .field("jwt_secret", &"<redacted>")
            .field("algorithm", &self.algorithm)
            .finish()
    }
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self::new(b"default_secret_for_tests_only".to_vec())
    }
}
