/*
 * Responsibility
 * - The security context a request carries once authentication succeeds
 * - The gate inserts it into request extensions; handlers read it via the extractor
 *
 * Notes
 * - Token verification and identity resolution live in middleware/services;
 *   this is the contract type only
 * - Holds the principal and request metadata, never credential material
 */

use std::net::SocketAddr;

/// Authenticated principal attached to a single request.
///
/// A request carries at most one of these. Its absence is the normal state
/// for unauthenticated traffic, not an error.
#[derive(Debug, Clone)]
pub struct AuthCtx {
    pub subject: String,
    pub authorities: Vec<String>,
    /// Originating peer address, when the listener provides one.
    pub remote_addr: Option<SocketAddr>,
}

impl AuthCtx {
    pub fn new(
        subject: impl Into<String>,
        authorities: Vec<String>,
        remote_addr: Option<SocketAddr>,
    ) -> Self {
        Self {
            subject: subject.into(),
            authorities,
            remote_addr,
        }
    }
}
