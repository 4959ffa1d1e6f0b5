//! Filter view API endpoints.
//!
//! A view is mounted per session and screen. Mounting loads the catalog from
//! the organization API; every later operation works on the mounted snapshot.

use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use serde::Deserialize;

use super::{success, upstream, ApiResult};
use crate::errors::AppError;
use crate::filter::{
    load_catalog, EmployeeFilterView, FacetChange, Screen, ViewSnapshot, DEFAULT_PAGE_SIZE,
};
use crate::session::SessionContext;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct MountQuery {
    /// Deep link: show only the employee with this exact full name
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageQuery {
    pub page: Option<usize>,
    pub page_size: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct ExactNameRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct SuggestQuery {
    #[serde(default)]
    pub q: String,
}

/// POST /api/admin/views/:screen - Load the catalog and mount a fresh view.
pub async fn mount_view(
    State(state): State<AppState>,
    Extension(session): Extension<SessionContext>,
    Path(screen): Path<Screen>,
    Query(query): Query<MountQuery>,
) -> ApiResult<ViewSnapshot> {
    let name = query.name.filter(|n| !n.trim().is_empty());
    if name.is_some() {
        require_name_lookup(screen)?;
    }

    let catalog = load_catalog(&upstream(&state, &session)).await;
    let mut view = EmployeeFilterView::new(screen, catalog);
    if let Some(name) = name {
        view.filter_by_exact_name(&name);
    }
    let snapshot = view.snapshot(1, DEFAULT_PAGE_SIZE);

    if !state.sessions.mount_view(session.id, view).await {
        tracing::info!(screen = screen.name(), "Discarded view loaded after sign-out");
        return Err(AppError::Unauthorized(
            "Session ended while the view was loading".to_string(),
        ));
    }

    tracing::debug!(
        screen = screen.name(),
        employees = snapshot.employees.total,
        "View mounted"
    );
    success(snapshot)
}

/// GET /api/admin/views/:screen - Current state, one page of results.
pub async fn get_view(
    State(state): State<AppState>,
    Extension(session): Extension<SessionContext>,
    Path(screen): Path<Screen>,
    Query(query): Query<PageQuery>,
) -> ApiResult<ViewSnapshot> {
    let page = query.page.unwrap_or(1);
    let page_size = query.page_size.unwrap_or(DEFAULT_PAGE_SIZE);

    let snapshot = state
        .sessions
        .with_view(session.id, screen, |view| view.snapshot(page, page_size))
        .await
        .ok_or_else(|| not_mounted(screen))?;
    success(snapshot)
}

/// PATCH /api/admin/views/:screen - Apply one facet change.
pub async fn update_view(
    State(state): State<AppState>,
    Extension(session): Extension<SessionContext>,
    Path(screen): Path<Screen>,
    Json(change): Json<FacetChange>,
) -> ApiResult<ViewSnapshot> {
    let snapshot = state
        .sessions
        .with_view(session.id, screen, |view| {
            view.apply(change)?;
            tracing::debug!(
                screen = screen.name(),
                unconstrained = view.criteria().is_unconstrained(),
                matches = view.filtered().len(),
                "Facet changed"
            );
            Ok::<_, AppError>(view.snapshot(1, DEFAULT_PAGE_SIZE))
        })
        .await
        .ok_or_else(|| not_mounted(screen))??;
    success(snapshot)
}

/// POST /api/admin/views/:screen/clear - Unset every facet.
pub async fn clear_view(
    State(state): State<AppState>,
    Extension(session): Extension<SessionContext>,
    Path(screen): Path<Screen>,
) -> ApiResult<ViewSnapshot> {
    let snapshot = state
        .sessions
        .with_view(session.id, screen, |view| {
            view.clear_filters();
            view.snapshot(1, DEFAULT_PAGE_SIZE)
        })
        .await
        .ok_or_else(|| not_mounted(screen))?;
    success(snapshot)
}

/// POST /api/admin/views/:screen/exact-name - Show one employee by full name.
pub async fn exact_name(
    State(state): State<AppState>,
    Extension(session): Extension<SessionContext>,
    Path(screen): Path<Screen>,
    Json(request): Json<ExactNameRequest>,
) -> ApiResult<ViewSnapshot> {
    require_name_lookup(screen)?;
    if request.name.trim().is_empty() {
        return Err(AppError::Validation("Name is required".to_string()));
    }

    let snapshot = state
        .sessions
        .with_view(session.id, screen, |view| {
            view.filter_by_exact_name(&request.name);
            view.snapshot(1, DEFAULT_PAGE_SIZE)
        })
        .await
        .ok_or_else(|| not_mounted(screen))?;
    success(snapshot)
}

/// GET /api/admin/views/:screen/suggestions - Name autocomplete.
pub async fn suggestions(
    State(state): State<AppState>,
    Extension(session): Extension<SessionContext>,
    Path(screen): Path<Screen>,
    Query(query): Query<SuggestQuery>,
) -> ApiResult<Vec<String>> {
    require_name_lookup(screen)?;

    let names = state
        .sessions
        .with_view(session.id, screen, |view| view.suggest_names(&query.q))
        .await
        .ok_or_else(|| not_mounted(screen))?;
    success(names)
}

/// DELETE /api/admin/views/:screen - Unmount a view.
pub async fn unmount_view(
    State(state): State<AppState>,
    Extension(session): Extension<SessionContext>,
    Path(screen): Path<Screen>,
) -> ApiResult<()> {
    if !state.sessions.unmount_view(session.id, screen).await {
        return Err(not_mounted(screen));
    }
    success(())
}

fn require_name_lookup(screen: Screen) -> Result<(), AppError> {
    if screen.supports_name_lookup() {
        Ok(())
    } else {
        Err(AppError::BadRequest(format!(
            "The {} screen has no name lookup",
            screen.name()
        )))
    }
}

fn not_mounted(screen: Screen) -> AppError {
    AppError::NotFound(format!("No {} view is mounted", screen.name()))
}
