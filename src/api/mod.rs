//! REST API module.
//!
//! Contains the console's routes and handlers. Every guarded handler forwards
//! to the organization API with the bearer token of its own session.

mod auth;
mod employee;
mod employees;
mod positions;
mod products;
mod skills;
mod teams;
mod views;

pub use auth::*;
pub use employee::*;
pub use employees::*;
pub use positions::*;
pub use products::*;
pub use skills::*;
pub use teams::*;
pub use views::*;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::errors::AppError;
use crate::session::SessionContext;
use crate::upstream::ApiClient;
use crate::AppState;

/// Success response envelope.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// Response type that can be either success or error.
pub type ApiResult<T> = Result<ApiResponse<T>, AppError>;

/// Create a successful API response.
pub fn success<T: Serialize>(data: T) -> ApiResult<T> {
    Ok(ApiResponse::new(data))
}

/// Upstream client acting on behalf of `session`.
fn upstream(state: &AppState, session: &SessionContext) -> ApiClient {
    state.api.with_token(&session.token)
}

/// Reject blank names before they reach the organization API.
fn require_name(name: &str, what: &str) -> Result<(), AppError> {
    if name.trim().is_empty() {
        return Err(AppError::Validation(format!("{} name is required", what)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_envelope() {
        let body = serde_json::to_value(ApiResponse::new(vec!["Ann Lee"])).unwrap();
        assert_eq!(body["success"], true);
        assert_eq!(body["data"][0], "Ann Lee");
    }

    #[test]
    fn test_require_name() {
        assert!(require_name("Platform", "Team").is_ok());
        assert_eq!(
            require_name("   ", "Team"),
            Err(AppError::Validation("Team name is required".into()))
        );
    }
}
