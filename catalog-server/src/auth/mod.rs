//! Identity boundary
//!
//! Authentication happens upstream (gateway/session service); requests
//! arrive with the resolved identity in trusted headers. This module only
//! consumes that identity and makes it available to handlers.

use axum::{extract::Request, middleware::Next, response::Response};
use http::HeaderMap;

use crate::utils::AppError;

/// Header carrying the resolved user id (set by the upstream boundary)
pub const USER_ID_HEADER: &str = "x-user-id";
/// Header carrying the resolved display name (optional)
pub const USER_NAME_HEADER: &str = "x-user-name";

/// Identity of the requester, as resolved by the upstream auth boundary
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: i64,
    pub name: String,
}

/// Identity middleware.
///
/// Injects [`CurrentUser`] into request extensions when identity headers are
/// present. Reads stay public; writes under `/api/` without an identity are
/// rejected with 401.
pub async fn require_identity(mut req: Request, next: Next) -> Result<Response, AppError> {
    // Allow CORS preflight through untouched
    if req.method() == http::Method::OPTIONS {
        return Ok(next.run(req).await);
    }
    // Non-API routes just 404 normally
    if !req.uri().path().starts_with("/api/") {
        return Ok(next.run(req).await);
    }

    let is_read = req.method() == http::Method::GET || req.method() == http::Method::HEAD;
    match current_user_from_headers(req.headers()) {
        Some(user) => {
            req.extensions_mut().insert(user);
            Ok(next.run(req).await)
        }
        None if is_read => Ok(next.run(req).await),
        None => {
            tracing::warn!(uri = %req.uri(), "Write request without identity");
            Err(AppError::Unauthorized)
        }
    }
}

fn current_user_from_headers(headers: &HeaderMap) -> Option<CurrentUser> {
    let id = headers
        .get(USER_ID_HEADER)?
        .to_str()
        .ok()?
        .trim()
        .parse()
        .ok()?;
    let name = headers
        .get(USER_NAME_HEADER)
        .and_then(|h| h.to_str().ok())
        .unwrap_or_default()
        .to_string();
    Some(CurrentUser { id, name })
}
