//! Product API endpoints (admin).

use axum::{
    extract::{Path, State},
    Extension, Json,
};

use super::{require_name, success, upstream, ApiResult};
use crate::models::{GroupRequest, Member, MembersRequest, Product};
use crate::session::SessionContext;
use crate::AppState;

/// GET /api/admin/products - List all products.
pub async fn list_products(
    State(state): State<AppState>,
    Extension(session): Extension<SessionContext>,
) -> ApiResult<Vec<Product>> {
    success(upstream(&state, &session).list_products().await?)
}

/// POST /api/admin/products - Create a product.
pub async fn create_product(
    State(state): State<AppState>,
    Extension(session): Extension<SessionContext>,
    Json(request): Json<GroupRequest>,
) -> ApiResult<()> {
    require_name(&request.name, "Product")?;
    upstream(&state, &session).create_product(&request).await?;
    success(())
}

/// PUT /api/admin/products/:id - Update a product.
pub async fn update_product(
    State(state): State<AppState>,
    Extension(session): Extension<SessionContext>,
    Path(id): Path<i64>,
    Json(request): Json<GroupRequest>,
) -> ApiResult<()> {
    require_name(&request.name, "Product")?;
    upstream(&state, &session).update_product(id, &request).await?;
    success(())
}

/// DELETE /api/admin/products/:id - Delete a product.
pub async fn delete_product(
    State(state): State<AppState>,
    Extension(session): Extension<SessionContext>,
    Path(id): Path<i64>,
) -> ApiResult<()> {
    upstream(&state, &session).delete_product(id).await?;
    success(())
}

/// GET /api/admin/products/:id/members - List the employees assigned to a product.
pub async fn product_members(
    State(state): State<AppState>,
    Extension(session): Extension<SessionContext>,
    Path(id): Path<i64>,
) -> ApiResult<Vec<Member>> {
    success(upstream(&state, &session).product_members(id).await?)
}

/// PUT /api/admin/products/:id/members - Replace the employees assigned to a product.
pub async fn set_product_members(
    State(state): State<AppState>,
    Extension(session): Extension<SessionContext>,
    Path(id): Path<i64>,
    Json(request): Json<MembersRequest>,
) -> ApiResult<()> {
    upstream(&state, &session)
        .set_product_members(id, &request.employee_ids)
        .await?;
    success(())
}
