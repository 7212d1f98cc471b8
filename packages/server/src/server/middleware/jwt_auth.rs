use crate::common::UserId;
use crate::domains::auth::JwtService;
use axum::{middleware::Next, response::Response};
use std::sync::Arc;
use tracing::debug;

/// Authenticated user information from JWT
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub user_id: UserId,
    pub username: String,
}

/// Header schemes accepted in front of the token.
const TOKEN_PREFIXES: [&str; 2] = ["JWT ", "Bearer "];

/// JWT authentication middleware
///
/// Extracts JWT token from Authorization header, verifies it, and adds AuthUser to request extensions.
/// If no token or invalid token, request continues without AuthUser (anonymous caller).
pub async fn jwt_auth_middleware(
    jwt_service: Arc<JwtService>,
    mut request: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    let auth_user = extract_auth_user(&request, &jwt_service);

    if let Some(user) = auth_user {
        debug!(user_id = %user.user_id, username = %user.username, "Authenticated user");
        request.extensions_mut().insert(user);
    } else {
        debug!("No valid authentication token");
    }

    next.run(request).await
}

/// Extract and verify JWT token from request
fn extract_auth_user(
    request: &axum::http::Request<axum::body::Body>,
    jwt_service: &JwtService,
) -> Option<AuthUser> {
    let auth_header = request.headers().get("authorization")?;
    let auth_str = auth_header.to_str().ok()?;

    let token = TOKEN_PREFIXES
        .iter()
        .find_map(|prefix| auth_str.strip_prefix(prefix))?
        .trim();

    let claims = match jwt_service.verify_token(token) {
        Ok(claims) => claims,
        Err(e) => {
            debug!(error = %e, "Rejected authorization token");
            return None;
        }
    };

    Some(AuthUser {
        user_id: claims.user_id,
        username: claims.username,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> JwtService {
        JwtService::new("test_secret", "test_issuer".to_string())
    }

    fn request_with(header: Option<String>) -> axum::http::Request<axum::body::Body> {
        let mut builder = axum::http::Request::builder();
        if let Some(value) = header {
            builder = builder.header("authorization", value);
        }
        builder.body(axum::body::Body::empty()).unwrap()
    }

    #[test]
    fn test_extract_token_with_jwt_scheme() {
        let jwt_service = service();
        let user_id = UserId::new();
        let issued = jwt_service.create_token(user_id, "alice").unwrap();

        let request = request_with(Some(format!("JWT {}", issued.token)));

        let auth_user = extract_auth_user(&request, &jwt_service).unwrap();
        assert_eq!(auth_user.user_id, user_id);
        assert_eq!(auth_user.username, "alice");
    }

    #[test]
    fn test_extract_token_with_bearer() {
        let jwt_service = service();
        let user_id = UserId::new();
        let issued = jwt_service.create_token(user_id, "alice").unwrap();

        let request = request_with(Some(format!("Bearer {}", issued.token)));

        let auth_user = extract_auth_user(&request, &jwt_service);
        assert_eq!(auth_user.map(|u| u.user_id), Some(user_id));
    }

    #[test]
    fn test_raw_token_without_scheme_is_ignored() {
        let jwt_service = service();
        let issued = jwt_service.create_token(UserId::new(), "alice").unwrap();

        let request = request_with(Some(issued.token));

        assert!(extract_auth_user(&request, &jwt_service).is_none());
    }

    #[test]
    fn test_no_auth_header() {
        let jwt_service = service();
        assert!(extract_auth_user(&request_with(None), &jwt_service).is_none());
    }

    #[test]
    fn test_invalid_token() {
        let jwt_service = service();
        let request = request_with(Some("Bearer invalid_token".to_string()));
        assert!(extract_auth_user(&request, &jwt_service).is_none());
    }
}
