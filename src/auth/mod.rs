use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub sub: i64,
    pub username: String,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    /// Claims valid for `SECURITY_JWT_EXPIRY_HOURS`
    pub fn new(user_id: i64, username: String) -> Result<Self, AuthError> {
        Self::with_expiry(user_id, username, config::config().security.jwt_expiry_hours)
    }

    pub fn with_expiry(user_id: i64, username: String, expiry_hours: u64) -> Result<Self, AuthError> {
        let now = Utc::now();
        let exp = i64::try_from(expiry_hours)
            .ok()
            .and_then(Duration::try_hours)
            .and_then(|ttl| now.checked_add_signed(ttl))
            .ok_or_else(|| {
                AuthError::TokenGeneration(format!("token expiry of {} hours is out of range", expiry_hours))
            })?;

        Ok(Self {
            sub: user_id,
            username,
            exp: exp.timestamp(),
            iat: now.timestamp(),
        })
    }

    /// Seconds between issue and expiry
    pub fn lifetime_secs(&self) -> i64 {
        self.exp - self.iat
    }
}

/// bcrypt only reads this many bytes of input
pub const MAX_PASSWORD_BYTES: usize = 72;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("JWT generation error: {0}")]
    TokenGeneration(String),

    #[error("Invalid JWT token: {0}")]
    InvalidToken(String),

    #[error("JWT secret not configured")]
    InvalidSecret,

    #[error("Password exceeds 72 bytes")]
    PasswordTooLong,

    #[error("Password hashing failed: {0}")]
    PasswordHash(#[from] bcrypt::BcryptError),
}

pub fn generate_jwt(claims: &Claims) -> Result<String, AuthError> {
    let secret = &config::config().security.jwt_secret;

    if secret.is_empty() {
        return Err(AuthError::InvalidSecret);
    }

    let encoding_key = EncodingKey::from_secret(secret.as_bytes());

    encode(&Header::default(), claims, &encoding_key)
        .map_err(|e| AuthError::TokenGeneration(e.to_string()))
}

pub fn validate_jwt(token: &str) -> Result<Claims, AuthError> {
    let secret = &config::config().security.jwt_secret;

    if secret.is_empty() {
        return Err(AuthError::InvalidSecret);
    }

    let decoding_key = DecodingKey::from_secret(secret.as_bytes());

    decode::<Claims>(token, &decoding_key, &Validation::default())
        .map(|data| data.claims)
        .map_err(|e| AuthError::InvalidToken(e.to_string()))
}

/// One-way hash for storage, work factor from `SECURITY_BCRYPT_COST`.
/// Passwords longer than [`MAX_PASSWORD_BYTES`] are refused rather than truncated.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    if password.len() > MAX_PASSWORD_BYTES {
        return Err(AuthError::PasswordTooLong);
    }
    Ok(bcrypt::hash(password, config::config().security.bcrypt_cost)?)
}

/// A malformed stored hash never verifies.
pub fn verify_password(password: &str, hash: &str) -> bool {
    if password.len() > MAX_PASSWORD_BYTES {
        return false;
    }

    match bcrypt::verify(password, hash) {
        Ok(matches) => matches,
        Err(e) => {
            tracing::warn!("Password verification failed: {}", e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_round_trip_preserves_claims() {
        let token = generate_jwt(&Claims::new(7, "bob".to_string()).unwrap()).unwrap();
        let claims = validate_jwt(&token).unwrap();
        assert_eq!(claims.sub, 7);
        assert_eq!(claims.username, "bob");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn tampered_token_is_rejected() {
        let token = generate_jwt(&Claims::new(1, "bob".to_string()).unwrap()).unwrap();
        let tampered = format!("{}x", token);
        assert!(matches!(validate_jwt(&tampered), Err(AuthError::InvalidToken(_))));
    }

    #[test]
    fn hashed_password_verifies_only_original() {
        let hash = hash_password("mypass").unwrap();
        assert_ne!(hash, "mypass");
        assert!(verify_password("mypass", &hash));
        assert!(!verify_password("notmypass", &hash));
    }

    #[test]
    fn garbage_hash_does_not_verify() {
        assert!(!verify_password("mypass", "not-a-bcrypt-hash"));
    }

    #[test]
    fn overlong_password_is_refused() {
        let long = "a".repeat(MAX_PASSWORD_BYTES + 1);
        assert!(matches!(hash_password(&long), Err(AuthError::PasswordTooLong)));
        assert!(hash_password(&"a".repeat(MAX_PASSWORD_BYTES)).is_ok());
    }

    #[test]
    fn out_of_range_expiry_is_an_error() {
        for hours in [u64::MAX, i64::MAX as u64, 1 << 40] {
            let result = Claims::with_expiry(1, "bob".to_string(), hours);
            assert!(matches!(result, Err(AuthError::TokenGeneration(_))), "hours = {}", hours);
        }
    }

    #[test]
    fn lifetime_matches_expiry() {
        let claims = Claims::with_expiry(1, "bob".to_string(), 2).unwrap();
        assert_eq!(claims.lifetime_secs(), 2 * 3600);
    }
}
