//! Application setup and server configuration.

use std::sync::Arc;

use axum::{
    extract::Extension,
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method,
    },
    middleware,
    routing::get,
    Router,
};
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::kernel::ServerDeps;
use crate::server::auth::JwtService;
use crate::server::middleware::jwt_auth_middleware;
use crate::server::routes::{api_routes, health_handler};

/// Shared application state
#[derive(Clone)]
pub struct AxumAppState {
    pub deps: Arc<ServerDeps>,
    pub jwt_service: Arc<JwtService>,
}

/// HTTP-level options that do not belong to the domain
#[derive(Debug, Clone, Default)]
pub struct HttpOptions {
    /// Empty means any origin
    pub allowed_origins: Vec<String>,
    /// Requests per second per client IP; `None` disables rate limiting
    pub rate_limit_per_second: Option<u64>,
}

/// Build the Axum application router
pub fn build_app(deps: Arc<ServerDeps>, jwt_service: Arc<JwtService>, options: &HttpOptions) -> Router {
    let app_state = AxumAppState {
        deps,
        jwt_service: jwt_service.clone(),
    };

    let mut router = api_routes()
        // Middleware layers (applied in reverse order - last added runs first)
        .layer(middleware::from_fn(move |req, next| {
            jwt_auth_middleware(jwt_service.clone(), req, next)
        }));

    if let Some(per_second) = options.rate_limit_per_second {
        match GovernorConfigBuilder::default()
            .per_second(per_second)
            .burst_size((per_second * 2) as u32)
            .use_headers() // Extract IP from X-Forwarded-For header
            .finish()
        {
            Some(config) => {
                router = router.layer(GovernorLayer {
                    config: Arc::new(config),
                });
            }
            None => warn!(per_second, "Invalid rate limit, rate limiting disabled"),
        }
    }

    router
        // Health check (no auth, no rate limit)
        .route("/health", get(health_handler))
        .layer(Extension(app_state))
        .layer(cors_layer(&options.allowed_origins))
        .layer(TraceLayer::new_for_http())
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins = if allowed_origins.is_empty() {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(
            allowed_origins
                .iter()
                .filter_map(|origin| HeaderValue::from_str(origin).ok()),
        )
    };

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE])
}
