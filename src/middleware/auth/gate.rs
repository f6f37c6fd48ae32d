//! Bearer-token authentication gate.
//!
//! Runs once per request, ahead of every route:
//! - requests under the exempt prefix (the auth-endpoints namespace) pass
//!   straight through, with no authentication work at all
//! - otherwise a `Bearer` token, when present, is verified, resolved to an
//!   identity, and checked against it; on success an `AuthCtx` goes into the
//!   request extensions
//!
//! The gate only ever *establishes* authentication, it never rejects. A
//! request that stays anonymous continues down the pipeline and meets
//! authorization at the protected handlers (see the `AuthCtx` extractor).
//! Collaborator failures (an expired token, a subject the identity store
//! does not know) leave the request anonymous instead of aborting it.

use std::net::SocketAddr;

use axum::{
    Router,
    body::Body,
    extract::{ConnectInfo, State},
    http::{Request, header},
    middleware::{self, Next},
    response::Response,
};

use crate::api::v1::extractors::AuthCtx;
use crate::state::AppState;

/// Apply the gate to the whole Router; it exempts the auth namespace itself.
///
/// Example:
/// ```ignore
/// let app = Router::new().nest("/api/v1", api::v1::routes()).with_state(state.clone());
/// let app = middleware::auth::gate::apply(app, state);
/// ```
pub fn apply(router: Router, state: AppState) -> Router {
    // axum 0.8's from_fn cannot take a State extractor; from_fn_with_state passes it explicitly
    router.layer(middleware::from_fn_with_state(state, authenticate))
}

async fn authenticate(State(state): State<AppState>, mut req: Request<Body>, next: Next) -> Response {
    // Auth endpoints (login etc.) must stay reachable without a token.
    if req.uri().path().starts_with(state.auth_exempt_prefix.as_ref()) {
        return next.run(req).await;
    }

    let token = match bearer_token(&req) {
        Some(token) => token.to_owned(),
        None => return next.run(req).await,
    };

    // Read connection info before the await so we don't hold a `&Request<Body>`
    // (whose body is not `Sync`) across it, which would make this future `!Send`.
    let remote = remote_addr(&req);
    if let Some(ctx) = establish(&state, &token, remote).await {
        // At most one principal per request; only success writes the context.
        req.extensions_mut().insert(ctx);
    }

    next.run(req).await
}

/// Validate the token against its resolved identity.
///
/// `None` means "authentication not established": the request proceeds
/// anonymously and downstream authorization decides what that is worth.
async fn establish(state: &AppState, token: &str, remote: Option<SocketAddr>) -> Option<AuthCtx> {
    let subject = state.auth.extract_subject(token)?;
    if subject.trim().is_empty() {
        return None;
    }

    // A forged or stale token can carry a subject the identity store no
    // longer knows; that is not a server fault, the request just stays anonymous.
    let identity = match state.identities.load_by_subject(&subject).await {
        Ok(identity) => identity,
        Err(err) => {
            tracing::debug!(error = ?err, subject = %subject, "identity resolution failed");
            return None;
        }
    };

    if !state.auth.is_valid(token, &identity) {
        tracing::warn!(subject = %subject, "token rejected for resolved identity");
        return None;
    }

    tracing::info!(subject = %identity.subject, user_id = %identity.id, "valid token");
    Some(AuthCtx::new(identity.subject, identity.authorities, remote))
}

/// The token part of `Authorization: Bearer <token>`.
///
/// The scheme match is exact: `"Bearer "` with a single space, case-sensitive.
/// Anything else (`Basic ...`, lowercase `bearer`, a bare `Bearer`) is no token.
fn bearer_token(req: &Request<Body>) -> Option<&str> {
    req.headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
}

fn remote_addr(req: &Request<Body>) -> Option<SocketAddr> {
    req.extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr)
}
