//! Application setup and server configuration.

use std::sync::Arc;

use anyhow::{anyhow, Result};
use axum::{
    extract::{Extension, Request},
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method,
    },
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
    Router,
};
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::common::Caller;
use crate::kernel::ServerDeps;
use crate::server::graphql::{create_schema, GraphQLContext};
use crate::server::middleware::{jwt_auth_middleware, AuthUser};
use crate::server::routes::{graphql_batch_handler, graphql_handler, health_handler};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub server_deps: Arc<ServerDeps>,
}

/// Middleware to create GraphQLContext per-request
async fn create_graphql_context(
    Extension(state): Extension<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    // Populated by jwt_auth_middleware when the token checked out
    let caller = request
        .extensions()
        .get::<AuthUser>()
        .map(|user| Caller::user(user.user_id))
        .unwrap_or_default();

    let context = GraphQLContext::new(state.server_deps.clone(), caller);
    request.extensions_mut().insert(context);

    next.run(request).await
}

/// Routes and per-request middleware, without transport-level layers.
///
/// Served as-is by the integration tests; `build_app` wraps it for
/// production.
pub fn graphql_router(server_deps: Arc<ServerDeps>) -> Router {
    let schema = Arc::new(create_schema());
    let jwt_service = server_deps.jwt_service.clone();
    let app_state = AppState { server_deps };

    // GraphQL playground only in debug builds (development)
    #[cfg(debug_assertions)]
    let graphql_routes = post(graphql_handler).get(crate::server::routes::graphql_playground);
    #[cfg(not(debug_assertions))]
    let graphql_routes = post(graphql_handler);

    Router::new()
        .route("/graphql", graphql_routes)
        .route("/graphql/batch", post(graphql_batch_handler))
        .route("/health", get(health_handler))
        // Middleware layers (applied in reverse order - last added runs first)
        .layer(middleware::from_fn(create_graphql_context))
        .layer(middleware::from_fn(move |req, next| {
            jwt_auth_middleware(jwt_service.clone(), req, next)
        }))
        .layer(Extension(app_state))
        .with_state(schema)
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE]);

    if allowed_origins.is_empty() {
        return cors.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    cors.allow_origin(AllowOrigin::list(origins))
}

/// Build the Axum application router
///
/// Adds rate limiting, CORS and request tracing around `graphql_router`.
/// The rate limiter keys on the peer address, so serve the router with
/// `into_make_service_with_connect_info::<SocketAddr>()`.
pub fn build_app(server_deps: Arc<ServerDeps>, allowed_origins: &[String]) -> Result<Router> {
    // 10 requests per second per IP with bursts of 20
    let rate_limit_config = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(10)
            .burst_size(20)
            .use_headers()
            .finish()
            .ok_or_else(|| anyhow!("Invalid rate limiter configuration"))?,
    );

    let app = graphql_router(server_deps)
        .layer(GovernorLayer {
            config: rate_limit_config,
        })
        .layer(cors_layer(allowed_origins))
        .layer(TraceLayer::new_for_http());

    Ok(app)
}
