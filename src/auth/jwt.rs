//! JWT token handling

use crate::config::AuthConfig;
use crate::error::{Error, Result};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// JWT claims
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// User ID
    pub uid: i32,
    /// Username
    pub user: String,
    /// Role, free text
    pub role: String,
    /// Issued at
    pub iat: i64,
    /// Expiration time
    pub exp: i64,
}

impl Claims {
    /// Claims for a user, expiring `ttl_secs` from now
    pub fn new(user_id: i32, username: &str, role: &str, ttl_secs: i64) -> Self {
        let now = chrono::Utc::now().timestamp();
        Self {
            uid: user_id,
            user: username.to_string(),
            role: role.to_string(),
            iat: now,
            exp: now + ttl_secs,
        }
    }
}

/// Sign a session token for a user
pub fn sign_token(user_id: i32, username: &str, role: &str, auth: &AuthConfig) -> Result<String> {
    let claims = Claims::new(user_id, username, role, auth.token_ttl_secs());
    encode_claims(&claims, auth)
}

pub fn encode_claims(claims: &Claims, auth: &AuthConfig) -> Result<String> {
    encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(auth.jwt_secret.as_bytes()),
    )
    .map_err(|e| {
        tracing::error!("Failed to create token: {}", e);
        Error::GeneratingToken
    })
}

/// Validate and decode a JWT token
pub fn validate_token(token: &str, auth: &AuthConfig) -> Result<Claims> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(auth.jwt_secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => Error::TokenExpired,
        ErrorKind::InvalidAlgorithm => Error::UnexpectedSigningMethod,
        _ => {
            tracing::debug!("Rejected token: {}", e);
            Error::InvalidLoginToken
        }
    })
}
