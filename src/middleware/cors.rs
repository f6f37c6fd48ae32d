//! CORS policy for browser clients.
//!
//! Responsibility:
//! - One consistent CORS policy for the whole API, applied at the Router level.
//!
//! Policy:
//! - Development: permissive (any origin), WITHOUT credentials.
//! - Production: only the origins listed in CORS_ALLOWED_ORIGINS, WITHOUT
//!   credentials. An empty allowlist allows nothing, which is safer than
//!   falling back to allowing everything.

use axum::Router;
use axum::http::{HeaderName, HeaderValue, Method, header};
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::config::Config;

/// Apply the CORS policy to the given Router.
///
/// Never combine a wildcard origin with allowed credentials.
pub fn apply(router: Router, config: &Config) -> Router {
    let allow_origin = if config.app_env.is_production() {
        let allowed: Vec<HeaderValue> = config
            .cors_allowed_origins
            .iter()
            .filter_map(|origin| HeaderValue::from_str(origin).ok())
            .collect();

        AllowOrigin::predicate(move |origin: &HeaderValue, _| {
            allowed.iter().any(|value| value == origin)
        })
    } else {
        AllowOrigin::any()
    };

    let cors = CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::ACCEPT,
            HeaderName::from_static("x-request-id"),
        ])
        .max_age(std::time::Duration::from_secs(60 * 10));

    router.layer(cors)
}
