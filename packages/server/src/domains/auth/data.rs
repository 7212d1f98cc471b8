use crate::domains::auth::jwt::{Claims, IssuedToken};

/// Clamp a Unix timestamp into GraphQL's 32-bit `Int`.
fn as_graphql_int(seconds: i64) -> i32 {
    i32::try_from(seconds).unwrap_or(i32::MAX)
}

/// Token claims visible to clients
#[derive(Debug, Clone, juniper::GraphQLObject)]
#[graphql(name = "TokenPayload")]
pub struct TokenPayloadData {
    pub username: String,
    /// Unix time the token expires.
    pub exp: i32,
    /// Unix time the refresh chain started.
    pub orig_iat: i32,
}

impl From<&Claims> for TokenPayloadData {
    fn from(claims: &Claims) -> Self {
        Self {
            username: claims.username.clone(),
            exp: as_graphql_int(claims.exp),
            orig_iat: as_graphql_int(claims.orig_iat),
        }
    }
}

#[derive(Debug, Clone, juniper::GraphQLObject)]
pub struct TokenAuthPayload {
    pub token: String,
    pub payload: TokenPayloadData,
    /// Unix time after which the token can no longer be refreshed.
    pub refresh_expires_in: i32,
}

impl From<IssuedToken> for TokenAuthPayload {
    fn from(issued: IssuedToken) -> Self {
        Self {
            payload: TokenPayloadData::from(&issued.claims),
            refresh_expires_in: as_graphql_int(issued.refresh_expires_in),
            token: issued.token,
        }
    }
}

#[derive(Debug, Clone, juniper::GraphQLObject)]
pub struct VerifyTokenPayload {
    pub payload: TokenPayloadData,
}

#[derive(Debug, Clone, juniper::GraphQLObject)]
pub struct RefreshTokenPayload {
    pub token: String,
    pub payload: TokenPayloadData,
    pub refresh_expires_in: i32,
}

impl From<IssuedToken> for RefreshTokenPayload {
    fn from(issued: IssuedToken) -> Self {
        let TokenAuthPayload {
            token,
            payload,
            refresh_expires_in,
        } = issued.into();
        Self {
            token,
            payload,
            refresh_expires_in,
        }
    }
}
