//! Skill endpoints: the admin catalog and each employee's own skills.

use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use serde::Deserialize;

use super::{require_name, success, upstream, ApiResult};
use crate::errors::AppError;
use crate::models::{OwnSkill, Skill, SkillAssignment, SkillRequest};
use crate::session::SessionContext;
use crate::upstream::SkillCatalog;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct OwnSkillsQuery {
    /// Only the skills the caller has assigned to themselves
    #[serde(default)]
    pub assigned: bool,
}

/// GET /api/admin/skills - List the skill catalog.
pub async fn list_skills(
    State(state): State<AppState>,
    Extension(session): Extension<SessionContext>,
) -> ApiResult<Vec<Skill>> {
    success(upstream(&state, &session).fetch_skills().await?)
}

/// POST /api/admin/skills - Add a skill to the catalog.
pub async fn create_skill(
    State(state): State<AppState>,
    Extension(session): Extension<SessionContext>,
    Json(request): Json<SkillRequest>,
) -> ApiResult<()> {
    validate_skill(&request)?;
    upstream(&state, &session).create_skill(&request).await?;
    success(())
}

/// PUT /api/admin/skills/:id - Update a catalog skill.
pub async fn update_skill(
    State(state): State<AppState>,
    Extension(session): Extension<SessionContext>,
    Path(id): Path<i64>,
    Json(request): Json<SkillRequest>,
) -> ApiResult<()> {
    validate_skill(&request)?;
    upstream(&state, &session).update_skill(id, &request).await?;
    success(())
}

/// DELETE /api/admin/skills/:id - Remove a skill from the catalog.
pub async fn delete_skill(
    State(state): State<AppState>,
    Extension(session): Extension<SessionContext>,
    Path(id): Path<i64>,
) -> ApiResult<()> {
    upstream(&state, &session).delete_skill(id).await?;
    tracing::info!(skill_id = id, "Skill deleted");
    success(())
}

/// GET /api/employee/skills - The catalog flagged with the caller's own skills.
pub async fn my_skills(
    State(state): State<AppState>,
    Extension(session): Extension<SessionContext>,
    Query(query): Query<OwnSkillsQuery>,
) -> ApiResult<Vec<OwnSkill>> {
    let mut skills = upstream(&state, &session).own_skills().await?;
    if query.assigned {
        skills.retain(|skill| skill.is_assigned);
    }
    success(skills)
}

/// POST /api/employee/skills - Add one of the caller's skills.
pub async fn add_my_skill(
    State(state): State<AppState>,
    Extension(session): Extension<SessionContext>,
    Json(mut assignment): Json<SkillAssignment>,
) -> ApiResult<()> {
    validate_assignment(&mut assignment)?;
    upstream(&state, &session).assign_skill(&assignment).await?;
    tracing::info!(skill_id = assignment.id, "Skill assigned");
    success(())
}

/// PUT /api/employee/skills/:id - Update the caller's details for a skill.
pub async fn update_my_skill(
    State(state): State<AppState>,
    Extension(session): Extension<SessionContext>,
    Path(id): Path<i64>,
    Json(mut assignment): Json<SkillAssignment>,
) -> ApiResult<()> {
    assignment.id = id;
    validate_assignment(&mut assignment)?;
    upstream(&state, &session)
        .update_assigned_skill(&assignment)
        .await?;
    success(())
}

/// DELETE /api/employee/skills/:id - Drop a skill from the caller's profile.
pub async fn remove_my_skill(
    State(state): State<AppState>,
    Extension(session): Extension<SessionContext>,
    Path(id): Path<i64>,
) -> ApiResult<()> {
    upstream(&state, &session).unassign_skill(id).await?;
    tracing::info!(skill_id = id, "Skill unassigned");
    success(())
}

fn validate_skill(request: &SkillRequest) -> Result<(), AppError> {
    require_name(&request.name, "Skill")?;
    if request.category_id <= 0 {
        return Err(AppError::Validation("Category is required".to_string()));
    }
    Ok(())
}

fn validate_assignment(assignment: &mut SkillAssignment) -> Result<(), AppError> {
    if assignment.id <= 0 {
        return Err(AppError::Validation("Skill is required".to_string()));
    }
    if assignment
        .years_of_experience
        .is_some_and(|years| !years.is_finite() || years < 0.0)
    {
        return Err(AppError::Validation(
            "Years of experience cannot be negative".to_string(),
        ));
    }
    assignment.clamp_rating();
    Ok(())
}
