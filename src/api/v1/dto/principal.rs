/*
 * Responsibility
 * - Response DTO for the authenticated-principal endpoint
 */
use std::net::SocketAddr;

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct PrincipalResponse {
    pub subject: String,
    pub authorities: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote_addr: Option<SocketAddr>,
}
