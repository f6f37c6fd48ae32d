/*
 * Responsibility
 * - v1 URL structure
 * - /health is public; /me requires an authenticated context (extractor-enforced)
 */
use axum::{Router, routing::get};

use crate::state::AppState;

use crate::api::v1::handlers::{health::health, me::me};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/me", get(me))
}
