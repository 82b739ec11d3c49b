//! JWT issuance
//!
//! Tokens are signed with RS256. The API service verifies them with the
//! public half of the same key pair.

use anyhow::Result;
use chrono::Utc;
use common::{jwt::Claims, user::User};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};

/// JWT configuration
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// Private key for signing tokens
    pub private_key: String,
    /// Public key for verifying tokens
    pub public_key: String,
    /// Token lifetime in seconds
    pub token_ttl: u64,
}

impl JwtConfig {
    /// Create a new JwtConfig from environment variables
    ///
    /// # Environment Variables
    /// - `JWT_PRIVATE_KEY`: Private key for signing tokens (PEM format) or path to private key file
    /// - `JWT_PUBLIC_KEY`: Public key for verifying tokens (PEM format) or path to public key file
    /// - `JWT_TOKEN_TTL`: Token lifetime in seconds (default: 3600)
    pub fn from_env() -> Result<Self> {
        let manifest_dir = env!("CARGO_MANIFEST_DIR");
        let private_key = common::jwt::load_pem("JWT_PRIVATE_KEY", manifest_dir)?;
        let public_key = common::jwt::load_pem("JWT_PUBLIC_KEY", manifest_dir)?;

        let token_ttl = std::env::var("JWT_TOKEN_TTL")
            .unwrap_or_else(|_| "3600".to_string())
            .parse()
            .unwrap_or(3600);

        Ok(JwtConfig {
            private_key,
            public_key,
            token_ttl,
        })
    }
}

/// JWT service
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    token_ttl: u64,
}

impl JwtService {
    /// Initialize a new JWT service
    pub fn new(config: JwtConfig) -> Result<Self> {
        let encoding_key = EncodingKey::from_rsa_pem(config.private_key.as_bytes())?;
        let decoding_key = DecodingKey::from_rsa_pem(config.public_key.as_bytes())?;
        let mut validation = Validation::new(Algorithm::RS256);
        validation.validate_exp = true;

        Ok(JwtService {
            encoding_key,
            decoding_key,
            validation,
            token_ttl: config.token_ttl,
        })
    }

    /// Generate a token for a user
    pub fn issue_token(&self, user: &User) -> Result<String> {
        let now = u64::try_from(Utc::now().timestamp())
            .map_err(|e| anyhow::anyhow!("Failed to get current time: {}", e))?;

        let claims = Claims::for_user(user, now, self.token_ttl);
        let token = encode(&Header::new(Algorithm::RS256), &claims, &self.encoding_key)?;
        Ok(token)
    }

    /// Validate a token and return the claims
    pub fn validate_token(&self, token: &str) -> Result<Claims> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)?;
        Ok(token_data.claims)
    }

    /// Lifetime of issued tokens in seconds
    pub fn token_ttl(&self) -> u64 {
        self.token_ttl
    }
}
