//! Session guards.
//!
//! Clients present the console session id as a bearer credential. The guard
//! resolves it against the [`SessionStore`], checks the role a route group
//! requires and hands the [`SessionContext`] to handlers through request
//! extensions.

use std::sync::Arc;

use axum::{
    extract::Request,
    http::header,
    middleware::Next,
    response::{IntoResponse, Response},
};
use uuid::Uuid;

use crate::errors::AppError;
use crate::session::{Role, SessionContext, SessionStore};

/// Guard layer function: requires a live session and, when `required` is set,
/// that session's role.
pub async fn require_session(
    sessions: Arc<SessionStore>,
    required: Option<Role>,
    mut request: Request,
    next: Next,
) -> Response {
    // Read the header up front; the request must not stay borrowed across the lookup.
    let session_id = bearer_session_id(&request);
    let session = match authorize(&sessions, required, session_id).await {
        Ok(session) => session,
        Err(e) => {
            tracing::debug!(path = %request.uri().path(), error = %e, "Guard rejected request");
            return e.into_response();
        }
    };

    request.extensions_mut().insert(session);
    next.run(request).await
}

async fn authorize(
    sessions: &SessionStore,
    required: Option<Role>,
    session_id: Option<Uuid>,
) -> Result<SessionContext, AppError> {
    let id = session_id
        .ok_or_else(|| AppError::Unauthorized("Missing or invalid session".to_string()))?;

    let session = sessions
        .get(&id)
        .await
        .ok_or_else(|| AppError::Unauthorized("Session expired or signed out".to_string()))?;

    match required {
        Some(role) if session.role != role => Err(AppError::Forbidden(format!(
            "{} role required",
            role
        ))),
        _ => Ok(session),
    }
}

fn bearer_session_id(request: &Request) -> Option<Uuid> {
    request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .and_then(|s| Uuid::parse_str(s.trim()).ok())
}
