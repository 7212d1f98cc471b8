//! Auth actions - exchange credentials for tokens, check and refresh tokens

use tracing::{debug, info};

use crate::common::{ApiError, ApiResult};
use crate::domains::auth::jwt::{Claims, IssuedToken, TokenError};
use crate::kernel::ServerDeps;

pub const INVALID_CREDENTIALS: &str = "Please enter valid credentials";

impl From<TokenError> for ApiError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Signing(e) => ApiError::Internal(e.into()),
            other => ApiError::Validation(other.to_string()),
        }
    }
}

/// Verify a username/password pair and issue a token for an active user.
pub async fn token_auth(username: &str, password: &str, deps: &ServerDeps) -> ApiResult<IssuedToken> {
    let Some(user) = deps.repo().find_user_by_username(username).await? else {
        debug!(username, "Login for unknown username");
        return Err(ApiError::validation(INVALID_CREDENTIALS));
    };

    if !user.is_active || !deps.password_hasher.verify_password(password, &user.password_hash)? {
        debug!(user_id = %user.id, "Login rejected");
        return Err(ApiError::validation(INVALID_CREDENTIALS));
    }

    let issued = deps.jwt_service.create_token(user.id, &user.username)?;
    info!(user_id = %user.id, "Token issued");
    Ok(issued)
}

pub fn verify_token(token: &str, deps: &ServerDeps) -> ApiResult<Claims> {
    Ok(deps.jwt_service.verify_token(token)?)
}

pub fn refresh_token(token: &str, deps: &ServerDeps) -> ApiResult<IssuedToken> {
    let issued = deps.jwt_service.refresh_token(token)?;
    debug!(user_id = %issued.claims.user_id, "Token refreshed");
    Ok(issued)
}
