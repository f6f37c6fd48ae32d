/*
 * Responsibility
 * - Shared context attached to the Router (AppState)
 * - Clone-cheap: collaborators behind Arc
 */
use std::sync::Arc;

use crate::services::{auth::JwtValidator, identity::IdentityResolver};

#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<JwtValidator>,
    pub identities: Arc<dyn IdentityResolver>,
    pub auth_exempt_prefix: Arc<str>,
}

impl AppState {
    pub fn new(
        auth: Arc<JwtValidator>,
        identities: Arc<dyn IdentityResolver>,
        auth_exempt_prefix: &str,
    ) -> Self {
        Self {
            auth,
            identities,
            auth_exempt_prefix: Arc::from(auth_exempt_prefix),
        }
    }
}
