use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::UserId;

/// Access token lifetime when none is configured.
pub const DEFAULT_EXPIRATION_SECONDS: i64 = 300;

/// How long after the first sign-in a token chain may keep refreshing.
pub const DEFAULT_REFRESH_EXPIRATION_SECONDS: i64 = 7 * 24 * 60 * 60;

/// JWT Claims - data stored in the token
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String,      // Subject (user_id as string)
    pub user_id: UserId,  // User UUID
    pub username: String, // Username at issue time
    pub exp: i64,         // Expiration timestamp
    pub orig_iat: i64,    // Issued at of the first token in a refresh chain
    pub iat: i64,         // Issued at timestamp
    pub iss: String,      // Issuer
    pub jti: String,      // JWT ID (unique token identifier)
}

/// A freshly signed token together with the claims it carries.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub claims: Claims,
    /// Unix time after which the chain can no longer be refreshed.
    pub refresh_expires_in: i64,
}

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("Signature has expired")]
    Expired,

    #[error("Error decoding signature")]
    Invalid,

    #[error("Refresh has expired")]
    RefreshExpired,

    #[error("Failed to sign token: {0}")]
    Signing(#[source] jsonwebtoken::errors::Error),
}

/// JWT Service - creates, verifies and refreshes JWT tokens
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    issuer: String,
    expiration: Duration,
    refresh_expiration: Duration,
}

impl JwtService {
    /// Create new JWT service with secret and issuer, using default lifetimes
    pub fn new(secret: &str, issuer: String) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            issuer,
            expiration: Duration::seconds(DEFAULT_EXPIRATION_SECONDS),
            refresh_expiration: Duration::seconds(DEFAULT_REFRESH_EXPIRATION_SECONDS),
        }
    }

    pub fn with_lifetimes(mut self, expiration_seconds: i64, refresh_expiration_seconds: i64) -> Self {
        self.expiration = Duration::seconds(expiration_seconds);
        self.refresh_expiration = Duration::seconds(refresh_expiration_seconds);
        self
    }

    /// Create a new token for a user, starting a new refresh chain
    pub fn create_token(&self, user_id: UserId, username: &str) -> Result<IssuedToken, TokenError> {
        let now = Utc::now().timestamp();
        self.sign(user_id, username.to_string(), now, now)
    }

    /// Verify and decode a token
    ///
    /// Returns claims if the signature, issuer and expiry all check out.
    pub fn verify_token(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::default();
        validation.set_issuer(&[&self.issuer]);
        validation.leeway = 0;

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid,
            })
    }

    /// Exchange a still-valid token for a new one with a fresh expiry.
    ///
    /// The new token keeps `orig_iat`, so a chain dies once the refresh
    /// window measured from the first sign-in has passed.
    pub fn refresh_token(&self, token: &str) -> Result<IssuedToken, TokenError> {
        let claims = self.verify_token(token)?;
        let now = Utc::now().timestamp();

        if claims.orig_iat + self.refresh_expiration.num_seconds() < now {
            return Err(TokenError::RefreshExpired);
        }

        self.sign(claims.user_id, claims.username, claims.orig_iat, now)
    }

    fn sign(
        &self,
        user_id: UserId,
        username: String,
        orig_iat: i64,
        now: i64,
    ) -> Result<IssuedToken, TokenError> {
        let claims = Claims {
            sub: user_id.to_string(),
            user_id,
            username,
            exp: now + self.expiration.num_seconds(),
            orig_iat,
            iat: now,
            iss: self.issuer.clone(),
            jti: Uuid::new_v4().to_string(), // Unique token ID
        };

        let token =
            encode(&Header::default(), &claims, &self.encoding_key).map_err(TokenError::Signing)?;

        Ok(IssuedToken {
            token,
            refresh_expires_in: orig_iat + self.refresh_expiration.num_seconds(),
            claims,
        })
    }
}
