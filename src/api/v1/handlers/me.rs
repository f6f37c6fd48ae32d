/*
 * Responsibility
 * - GET /me: echo the authenticated principal
 * - Downstream consumer of the security context; the 401 for anonymous
 *   requests comes from the extractor, not from the gate
 */
use axum::Json;

use crate::api::v1::dto::principal::PrincipalResponse;
use crate::api::v1::extractors::AuthCtxExtractor;

pub async fn me(AuthCtxExtractor(ctx): AuthCtxExtractor) -> Json<PrincipalResponse> {
    Json(PrincipalResponse {
        subject: ctx.subject,
        authorities: ctx.authorities,
        remote_addr: ctx.remote_addr,
    })
}
