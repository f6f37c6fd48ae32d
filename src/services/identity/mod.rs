/*!
 * Identity resolution (the user-details side of authentication)
 *
 * Responsibility:
 * - `Identity`: the resolved principal the gate reads (subject + authorities)
 * - `IdentityResolver`: lookup seam, keyed by subject identifier
 *
 * Public API:
 * - Identity
 * - IdentityError
 * - IdentityResolver
 * - InMemoryIdentityResolver
 */

mod memory;

pub use memory::{InMemoryIdentityResolver, SeedError};

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

/// Resolved principal. Produced by a resolver; the authentication gate only
/// reads it and never holds credential material alongside it.
#[derive(Debug, Clone)]
pub struct Identity {
    pub id: Uuid,
    /// Subject identifier a token's `sub` claim must match (an email address).
    pub subject: String,
    /// Granted authorities, in grant order.
    pub authorities: Vec<String>,
}

#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("unknown subject")]
    NotFound,
}

/// Lookup seam for resolved identities.
///
/// The backing store is a collaborator, not part of this service: deployments
/// plug in whatever directory they have. The in-memory implementation covers
/// development and tests.
#[async_trait]
pub trait IdentityResolver: Send + Sync {
    async fn load_by_subject(&self, subject: &str) -> Result<Identity, IdentityError>;
}
