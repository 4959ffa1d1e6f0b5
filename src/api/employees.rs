//! Employee directory API endpoints (admin).

use axum::{
    extract::{Path, State},
    Extension, Json,
};

use super::{success, upstream, ApiResult};
use crate::errors::AppError;
use crate::models::{CreateEmployeeRequest, Employee};
use crate::session::SessionContext;
use crate::upstream::EmployeeDirectory;
use crate::AppState;

/// GET /api/admin/employees - List all employees.
pub async fn list_employees(
    State(state): State<AppState>,
    Extension(session): Extension<SessionContext>,
) -> ApiResult<Vec<Employee>> {
    success(upstream(&state, &session).fetch_employees().await?)
}

/// GET /api/admin/employees/:id - Get one employee with skills and memberships.
pub async fn get_employee(
    State(state): State<AppState>,
    Extension(session): Extension<SessionContext>,
    Path(id): Path<i64>,
) -> ApiResult<Employee> {
    success(upstream(&state, &session).get_employee(id).await?)
}

/// POST /api/admin/employees - Create an employee account.
pub async fn create_employee(
    State(state): State<AppState>,
    Extension(session): Extension<SessionContext>,
    Json(request): Json<CreateEmployeeRequest>,
) -> ApiResult<()> {
    // Validate required fields
    if request.first_name.trim().is_empty() {
        return Err(AppError::Validation("First name is required".to_string()));
    }
    if request.last_name.trim().is_empty() {
        return Err(AppError::Validation("Last name is required".to_string()));
    }

    upstream(&state, &session).create_employee(&request).await?;
    tracing::info!(
        first_name = %request.first_name,
        last_name = %request.last_name,
        "Employee created"
    );
    success(())
}
