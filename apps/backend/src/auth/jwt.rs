use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::errors::domain::DomainError;
use crate::state::security_config::SecurityConfig;
use crate::AppError;

/// Access tokens live for 15 minutes.
pub const ACCESS_TOKEN_TTL_SECS: i64 = 15 * 60;

/// Claims included in our backend-issued access tokens.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Player id, decimal
    pub sub: String,
    /// Issued-at (seconds since epoch)
    pub iat: i64,
    /// Expiry (seconds since epoch)
    pub exp: i64,
}

impl Claims {
    pub fn player_id(&self) -> Result<i64, DomainError> {
        self.sub
            .parse::<i64>()
            .ok()
            .filter(|id| *id > 0)
            .ok_or_else(|| DomainError::unauthenticated("Token subject is not a player id"))
    }
}

/// Mint a HS256 JWT access token for `player_id`.
pub fn mint_access_token(
    player_id: i64,
    now: SystemTime,
    security: &SecurityConfig,
) -> Result<String, AppError> {
    let iat = now
        .duration_since(UNIX_EPOCH)
        .map_err(|_| AppError::internal("Failed to get current time"))?
        .as_secs() as i64;

    let claims = Claims {
        sub: player_id.to_string(),
        iat,
        exp: iat + ACCESS_TOKEN_TTL_SECS,
    };

    encode(
        &Header::new(security.algorithm),
        &claims,
        &EncodingKey::from_secret(&security.jwt_secret),
    )
    .map_err(|e| AppError::internal(format!("Failed to encode JWT: {e}")))
}

/// Verify a token and return its claims. Every failure is `Unauthenticated`.
pub fn verify_access_token(token: &str, security: &SecurityConfig) -> Result<Claims, DomainError> {
    // Default Validation already checks exp; pin algorithm to configured algorithm.
    let validation = Validation::new(security.algorithm);

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(&security.jwt_secret),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| {
        let detail = match e.kind() {
            ErrorKind::ExpiredSignature => "Token expired",
            ErrorKind::InvalidSignature => "Invalid token signature",
            _ => "Invalid token",
        };
        DomainError::unauthenticated(detail)
    })
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, SystemTime, UNIX_EPOCH};

    use super::*;

    fn security() -> SecurityConfig {
        SecurityConfig::new("test_secret_key_for_testing_purposes_only".as_bytes())
    }

    #[test]
    fn minted_token_carries_player_id() {
        let now = SystemTime::now();
        let token = mint_access_token(42, now, &security()).unwrap();
        let claims = verify_access_token(&token, &security()).unwrap();

        assert_eq!(claims.player_id().unwrap(), 42);
        assert_eq!(
            claims.iat,
            now.duration_since(UNIX_EPOCH).unwrap().as_secs() as i64
        );
        assert_eq!(claims.exp, claims.iat + ACCESS_TOKEN_TTL_SECS);
    }

    #[test]
    fn expired_token_is_unauthenticated() {
        // 20 minutes ago so 15-minute token is expired
        let now = SystemTime::now() - Duration::from_secs(20 * 60);
        let token = mint_access_token(7, now, &security()).unwrap();

        match verify_access_token(&token, &security()) {
            Err(DomainError::Unauthenticated(detail)) => assert_eq!(detail, "Token expired"),
            other => panic!("expected unauthenticated, got {other:?}"),
        }
    }

    #[test]
    fn bad_signature_is_unauthenticated() {
        let token =
            mint_access_token(7, SystemTime::now(), &SecurityConfig::new("secret-A".as_bytes()))
                .unwrap();
        let result = verify_access_token(&token, &SecurityConfig::new("secret-B".as_bytes()));

        match result {
            Err(DomainError::Unauthenticated(detail)) => {
                assert_eq!(detail, "Invalid token signature")
            }
            other => panic!("expected unauthenticated, got {other:?}"),
        }
    }

    #[test]
    fn non_numeric_subject_is_rejected() {
        let claims = Claims {
            sub: "alice".into(),
            iat: 0,
            exp: 0,
        };
        assert!(matches!(
            claims.player_id(),
            Err(DomainError::Unauthenticated(_))
        ));
    }
}
