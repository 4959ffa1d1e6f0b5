//! Position API endpoints.

use axum::{
    extract::{Path, State},
    Extension, Json,
};

use super::{require_name, success, upstream, ApiResult};
use crate::models::{Position, PositionRequest};
use crate::session::SessionContext;
use crate::upstream::PositionDirectory;
use crate::AppState;

/// GET /api/admin/positions - List all positions.
pub async fn list_positions(
    State(state): State<AppState>,
    Extension(session): Extension<SessionContext>,
) -> ApiResult<Vec<Position>> {
    success(upstream(&state, &session).fetch_positions().await?)
}

/// POST /api/admin/positions - Create a position.
pub async fn create_position(
    State(state): State<AppState>,
    Extension(session): Extension<SessionContext>,
    Json(request): Json<PositionRequest>,
) -> ApiResult<()> {
    require_name(&request.name, "Position")?;
    upstream(&state, &session).create_position(&request).await?;
    success(())
}

/// PUT /api/admin/positions/:id - Update a position.
pub async fn update_position(
    State(state): State<AppState>,
    Extension(session): Extension<SessionContext>,
    Path(id): Path<i64>,
    Json(request): Json<PositionRequest>,
) -> ApiResult<()> {
    require_name(&request.name, "Position")?;
    upstream(&state, &session).update_position(id, &request).await?;
    success(())
}

/// DELETE /api/admin/positions/:id - Delete a position.
pub async fn delete_position(
    State(state): State<AppState>,
    Extension(session): Extension<SessionContext>,
    Path(id): Path<i64>,
) -> ApiResult<()> {
    upstream(&state, &session).delete_position(id).await?;
    success(())
}
