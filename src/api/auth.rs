//! Sign-in API endpoints.

use axum::{extract::State, Extension, Json};

use super::{success, ApiResult};
use crate::errors::AppError;
use crate::session::{role_from_token, SessionContext, SessionSummary};
use crate::upstream::LoginRequest;
use crate::AppState;

/// POST /api/auth/login - Sign in against the organization API.
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> ApiResult<SessionSummary> {
    if request.email.trim().is_empty() || request.password.is_empty() {
        return Err(AppError::Validation(
            "Email and password are required".to_string(),
        ));
    }

    let token = state.api.login(&request).await?;
    let role = role_from_token(&token)?;

    let session = SessionContext::new(token, role, request.email);
    let summary = session.summary();
    state.sessions.insert(session).await;

    let active_sessions = state.sessions.len().await;
    tracing::info!(%role, active_sessions, "Signed in");
    success(summary)
}

/// POST /api/auth/logout - End the current session and drop its views.
pub async fn logout(
    State(state): State<AppState>,
    Extension(session): Extension<SessionContext>,
) -> ApiResult<()> {
    state.sessions.invalidate(&session.id).await;
    tracing::info!(role = %session.role, "Signed out");
    success(())
}

/// GET /api/auth/session - Describe the current session.
pub async fn current_session(
    Extension(session): Extension<SessionContext>,
) -> ApiResult<SessionSummary> {
    success(session.summary())
}
