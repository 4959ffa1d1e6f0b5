//! Team API endpoints (admin).

use axum::{
    extract::{Path, State},
    Extension, Json,
};

use super::{require_name, success, upstream, ApiResult};
use crate::models::{GroupRequest, Member, MembersRequest, Team};
use crate::session::SessionContext;
use crate::AppState;

/// GET /api/admin/teams - List all teams.
pub async fn list_teams(
    State(state): State<AppState>,
    Extension(session): Extension<SessionContext>,
) -> ApiResult<Vec<Team>> {
    success(upstream(&state, &session).list_teams().await?)
}

/// POST /api/admin/teams - Create a team.
pub async fn create_team(
    State(state): State<AppState>,
    Extension(session): Extension<SessionContext>,
    Json(request): Json<GroupRequest>,
) -> ApiResult<()> {
    require_name(&request.name, "Team")?;
    upstream(&state, &session).create_team(&request).await?;
    success(())
}

/// PUT /api/admin/teams/:id - Update a team.
pub async fn update_team(
    State(state): State<AppState>,
    Extension(session): Extension<SessionContext>,
    Path(id): Path<i64>,
    Json(request): Json<GroupRequest>,
) -> ApiResult<()> {
    require_name(&request.name, "Team")?;
    upstream(&state, &session).update_team(id, &request).await?;
    success(())
}

/// DELETE /api/admin/teams/:id - Delete a team.
pub async fn delete_team(
    State(state): State<AppState>,
    Extension(session): Extension<SessionContext>,
    Path(id): Path<i64>,
) -> ApiResult<()> {
    upstream(&state, &session).delete_team(id).await?;
    success(())
}

/// GET /api/admin/teams/:id/members - List the members of a team.
pub async fn team_members(
    State(state): State<AppState>,
    Extension(session): Extension<SessionContext>,
    Path(id): Path<i64>,
) -> ApiResult<Vec<Member>> {
    success(upstream(&state, &session).team_members(id).await?)
}

/// PUT /api/admin/teams/:id/members - Replace the members of a team.
pub async fn set_team_members(
    State(state): State<AppState>,
    Extension(session): Extension<SessionContext>,
    Path(id): Path<i64>,
    Json(request): Json<MembersRequest>,
) -> ApiResult<()> {
    upstream(&state, &session)
        .set_team_members(id, &request.employee_ids)
        .await?;
    tracing::info!(team_id = id, members = request.employee_ids.len(), "Team members replaced");
    success(())
}
