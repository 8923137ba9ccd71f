use std::future::{ready, Ready};

use actix_web::{dev::Payload, http::header, FromRequest, HttpRequest};

use crate::AppError;

/// Bearer token from the `Authorization` header. Not verified here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthToken {
    pub token: String,
}

impl AuthToken {
    fn parse(header_value: &str) -> Option<Self> {
        let mut parts = header_value.split_whitespace();
        let (scheme, token) = (parts.next()?, parts.next()?);
        if parts.next().is_some() || !scheme.eq_ignore_ascii_case("Bearer") {
            return None;
        }
        Some(Self {
            token: token.to_string(),
        })
    }
}

impl FromRequest for AuthToken {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let token = req
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(AuthToken::parse)
            .ok_or_else(AppError::unauthorized_missing_bearer);
        ready(token)
    }
}
