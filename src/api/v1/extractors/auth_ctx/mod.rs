/*!
 * Authenticated-request context
 *
 * Responsibility:
 * - Provide the per-request security context (AuthCtx) to handlers
 * - Keep HTTP / axum wiring in core and the contract type in types
 *
 * Public API:
 * - AuthCtx
 * - AuthCtxExtractor
 */

mod core;
mod types;

pub use core::AuthCtxExtractor;
pub use types::AuthCtx;
