//! Self-service API endpoints for signed-in employees.

use axum::{
    extract::{Path, State},
    Extension,
};

use super::{success, upstream, ApiResult};
use crate::models::{Employee, Team};
use crate::session::SessionContext;
use crate::AppState;

/// GET /api/employee/profile - The caller's own employee record.
pub async fn get_profile(
    State(state): State<AppState>,
    Extension(session): Extension<SessionContext>,
) -> ApiResult<Employee> {
    success(upstream(&state, &session).get_profile().await?)
}

/// GET /api/employee/teams - Teams the caller belongs to.
pub async fn my_teams(
    State(state): State<AppState>,
    Extension(session): Extension<SessionContext>,
) -> ApiResult<Vec<Team>> {
    success(upstream(&state, &session).employee_teams().await?)
}

/// POST /api/employee/teams/:id/join - Join a team.
pub async fn join_team(
    State(state): State<AppState>,
    Extension(session): Extension<SessionContext>,
    Path(id): Path<i64>,
) -> ApiResult<()> {
    upstream(&state, &session).join_team(id).await?;
    tracing::info!(team_id = id, "Joined team");
    success(())
}

/// DELETE /api/employee/teams/:id/leave - Leave a team.
pub async fn leave_team(
    State(state): State<AppState>,
    Extension(session): Extension<SessionContext>,
    Path(id): Path<i64>,
) -> ApiResult<()> {
    upstream(&state, &session).leave_team(id).await?;
    tracing::info!(team_id = id, "Left team");
    success(())
}
