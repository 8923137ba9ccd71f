//! Caller identity resolution.

use async_trait::async_trait;

use crate::auth::jwt::verify_access_token;
use crate::errors::domain::DomainError;
use crate::state::security_config::SecurityConfig;

/// Resolves an opaque credential to the caller's player id.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// `Unauthenticated` for anything that is not a valid credential.
    async fn resolve(&self, token: &str) -> Result<i64, DomainError>;
}

/// Verifies backend-issued HS256 access tokens.
#[derive(Debug, Clone)]
pub struct JwtIdentityProvider {
    security: SecurityConfig,
}

impl JwtIdentityProvider {
    pub fn new(security: SecurityConfig) -> Self {
        Self { security }
    }
}

#[async_trait]
impl IdentityProvider for JwtIdentityProvider {
    async fn resolve(&self, token: &str) -> Result<i64, DomainError> {
        verify_access_token(token, &self.security)?.player_id()
    }
}
