/*
 * Responsibility
 * - Config loading → collaborator construction → Router assembly
 * - Middleware application (auth gate, CORS, security headers, HTTP infra)
 * - axum::serve() with connect-info so the gate can record peer addresses
 */
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::Router;
use tracing_subscriber::EnvFilter;

use crate::{
    api,
    config::Config,
    middleware,
    services::{auth::JwtValidator, identity::InMemoryIdentityResolver},
    state::AppState,
};

pub async fn run() -> Result<()> {
    init_tracing();

    let config = Config::from_env()?;

    let auth = Arc::new(JwtValidator::new(
        &config.auth_jwt_secret,
        config.auth_token_leeway_seconds,
    ));
    let identities = Arc::new(InMemoryIdentityResolver::from_seed_entries(
        &config.auth_users,
    )?);
    let state = AppState::new(auth, identities, &config.auth_exempt_prefix);

    let app = build_router(state);
    let app = middleware::security_headers::apply(app);
    let app = middleware::cors::apply(app, &config);
    let app = middleware::http::apply(app, &config);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    tracing::info!(addr = %config.addr, "listening");
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;
    Ok(())
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

fn build_router(state: AppState) -> Router {
    let router = Router::new()
        .nest("/api/v1", api::v1::routes())
        .with_state(state.clone());

    // The gate sees every path and exempts the auth namespace itself.
    middleware::auth::gate::apply(router, state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{Request, StatusCode, header},
    };
    use jsonwebtoken::{EncodingKey, Header, get_current_timestamp};
    use serde_json::{Value, json};
    use tower::ServiceExt;
    use uuid::Uuid;

    use super::*;
    use crate::services::identity::Identity;

    const SECRET: &str = "app-test-secret-app-test-secret";

    fn test_router() -> Router {
        let identities = InMemoryIdentityResolver::new([Identity {
            id: Uuid::new_v4(),
            subject: "alice@example.com".to_string(),
            authorities: vec!["ADMIN".to_string(), "MANAGER".to_string()],
        }]);
        let state = AppState::new(
            Arc::new(JwtValidator::new(SECRET, 0)),
            Arc::new(identities),
            "/api/auth/",
        );

        build_router(state)
    }

    fn mint(sub: &str) -> String {
        jsonwebtoken::encode(
            &Header::default(),
            &json!({ "sub": sub, "exp": get_current_timestamp() + 3600 }),
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn health_is_reachable_anonymously() {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .uri("/api/v1/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn me_requires_authentication() {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .uri("/api/v1/me")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], json!("UNAUTHORIZED"));
    }

    #[tokio::test]
    async fn me_returns_principal_for_valid_token() {
        let token = mint("alice@example.com");
        let response = test_router()
            .oneshot(
                Request::builder()
                    .uri("/api/v1/me")
                    .header(header::AUTHORIZATION, format!("Bearer {token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["subject"], json!("alice@example.com"));
        assert_eq!(body["authorities"], json!(["ADMIN", "MANAGER"]));
    }

    #[tokio::test]
    async fn me_rejects_token_for_unknown_subject() {
        let token = mint("ghost@example.com");
        let response = test_router()
            .oneshot(
                Request::builder()
                    .uri("/api/v1/me")
                    .header(header::AUTHORIZATION, format!("Bearer {token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        // The gate lets the request through anonymously; the extractor rejects it.
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
