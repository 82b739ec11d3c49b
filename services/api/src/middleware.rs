//! Authentication middleware resolving the bearer token to a stored user

use anyhow::Result;
use axum::{
    extract::State,
    http::{HeaderMap, Request, header::AUTHORIZATION},
    middleware::Next,
    response::Response,
};
use common::{jwt::Claims, user::User};
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use tracing::{debug, error};

use crate::{error::ApiError, state::AppState};

/// JWT configuration
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// Public key for verifying tokens (PEM)
    pub public_key: String,
}

impl JwtConfig {
    /// Create a new JwtConfig from environment variables
    ///
    /// # Environment Variables
    /// - `JWT_PUBLIC_KEY`: Public key for verifying tokens (PEM format) or path to the key file
    pub fn from_env() -> Result<Self> {
        let public_key = common::jwt::load_pem("JWT_PUBLIC_KEY", env!("CARGO_MANIFEST_DIR"))?;
        Ok(JwtConfig { public_key })
    }
}

/// Verifies RS256 tokens and extracts their claims
#[derive(Clone)]
pub struct TokenDecoder {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenDecoder {
    pub fn new(config: &JwtConfig) -> Result<Self> {
        let decoding_key = DecodingKey::from_rsa_pem(config.public_key.as_bytes())?;
        let mut validation = Validation::new(Algorithm::RS256);
        validation.validate_exp = true;

        Ok(Self {
            decoding_key,
            validation,
        })
    }

    /// Validate `token` and return its claims
    pub fn decode(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
    }
}

/// The user resolved from the request's bearer token
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

/// Extract the credential from an `Authorization: Bearer <token>` header
///
/// An absent or blank header, a header with no second token, or a scheme
/// other than `Bearer` all count as unauthenticated.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, ApiError> {
    let header = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or(ApiError::Unauthenticated)?;

    let mut parts = header.split_whitespace();
    let scheme = parts.next().ok_or(ApiError::Unauthenticated)?;
    let token = parts.next().ok_or(ApiError::Unauthenticated)?;

    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(ApiError::Unauthenticated);
    }

    Ok(token)
}

/// Resolve the caller from `headers`
pub async fn resolve_user(state: &AppState, headers: &HeaderMap) -> Result<User, ApiError> {
    let token = bearer_token(headers)?;

    let claims = state.tokens.decode(token).map_err(|e| {
        debug!("Rejected bearer token: {}", e);
        ApiError::Unauthenticated
    })?;

    state
        .users
        .find_by_id(claims.id)
        .await
        .map_err(|e| {
            error!("Failed to resolve token subject {}: {}", claims.id, e);
            ApiError::Database(e)
        })?
        .ok_or(ApiError::NotFound("User not found"))
}

/// Authentication middleware
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request<axum::body::Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let user = resolve_user(&state, req.headers()).await?;

    // Insert the user into the request extensions
    req.extensions_mut().insert(CurrentUser(user));

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_bearer_token_extraction() {
        assert_eq!(bearer_token(&headers("Bearer abc.def.ghi")).unwrap(), "abc.def.ghi");
        assert_eq!(bearer_token(&headers("bearer   abc")).unwrap(), "abc");
    }

    #[test]
    fn test_missing_or_malformed_headers_are_unauthenticated() {
        for value in ["", "   ", "Bearer", "abc.def.ghi", "Basic dXNlcjpwYXNz"] {
            assert!(
                matches!(bearer_token(&headers(value)), Err(ApiError::Unauthenticated)),
                "header {value:?} should be rejected"
            );
        }
        assert!(matches!(
            bearer_token(&HeaderMap::new()),
            Err(ApiError::Unauthenticated)
        ));
    }

    #[test]
    fn test_decoder_rejects_garbage() {
        let config = JwtConfig {
            public_key: crate::test_support::PUBLIC_KEY.to_string(),
        };
        let decoder = TokenDecoder::new(&config).unwrap();
        assert!(decoder.decode("not-a-token").is_err());
    }
}
