//! HTTP client for the organization API.

use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::{EmployeeDirectory, PositionDirectory, SkillCatalog};
use crate::errors::AppError;
use crate::models::{
    Category, CreateEmployeeRequest, Employee, GroupRequest, Member, OwnSkill, Position,
    PositionRequest, Product, Skill, SkillAssignment, SkillRequest, Stack, Team,
};

const LOGIN_FAILED: &str = "Login failed. Please try again.";

/// Credentials forwarded to the organization API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    result: LoginResult,
}

#[derive(Debug, Deserialize)]
struct LoginResult {
    token: String,
}

/// Client for the organization API, optionally carrying a bearer token.
///
/// Cloning is cheap: the underlying connection pool is shared.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
        }
    }

    /// A client sending `token` as the bearer credential.
    pub fn with_token(&self, token: &str) -> Self {
        Self {
            http: self.http.clone(),
            base_url: self.base_url.clone(),
            token: Some(token.to_string()),
        }
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.http.request(method, format!("{}{}", self.base_url, path));
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, AppError> {
        let response = self.request(Method::GET, path).send().await?;
        let response = check_status(response, None).await?;
        Ok(response.json().await?)
    }

    async fn send<B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<(), AppError> {
        let mut builder = self.request(method, path);
        if let Some(body) = body {
            builder = builder.json(body);
        }
        let response = builder.send().await?;
        check_status(response, None).await?;
        Ok(())
    }

    async fn delete(&self, path: &str) -> Result<(), AppError> {
        self.send::<()>(Method::DELETE, path, None).await
    }

    // ==================== ACCOUNT ====================

    /// Exchange credentials for a bearer token.
    pub async fn login(&self, credentials: &LoginRequest) -> Result<String, AppError> {
        let response = self
            .request(Method::POST, "/api/account/login")
            .json(credentials)
            .send()
            .await?;
        let response = check_status(response, Some(LOGIN_FAILED)).await?;
        let body: LoginResponse = response.json().await?;
        Ok(body.result.token)
    }

    // ==================== EMPLOYEES ====================

    pub async fn get_employee(&self, id: i64) -> Result<Employee, AppError> {
        self.get_json(&format!("/api/admin/employees/{id}")).await
    }

    /// The employee record of the token's owner.
    pub async fn get_profile(&self) -> Result<Employee, AppError> {
        self.get_json("/api/admin/employees/profile").await
    }

    pub async fn create_employee(&self, request: &CreateEmployeeRequest) -> Result<(), AppError> {
        self.send(Method::POST, "/api/account/employee", Some(request)).await
    }

    // ==================== POSITIONS ====================

    pub async fn create_position(&self, request: &PositionRequest) -> Result<(), AppError> {
        self.send(Method::POST, "/api/Positions/add", Some(request)).await
    }

    pub async fn update_position(&self, id: i64, request: &PositionRequest) -> Result<(), AppError> {
        self.send(Method::PUT, &format!("/api/Positions/update/{id}"), Some(request)).await
    }

    pub async fn delete_position(&self, id: i64) -> Result<(), AppError> {
        self.delete(&format!("/api/Positions/delete/{id}")).await
    }

    // ==================== SKILLS ====================

    pub async fn create_skill(&self, request: &SkillRequest) -> Result<(), AppError> {
        self.send(Method::POST, "/api/employee/Skills/add", Some(request)).await
    }

    pub async fn update_skill(&self, id: i64, request: &SkillRequest) -> Result<(), AppError> {
        self.send(
            Method::PUT,
            &format!("/api/employee/Skills/update/{id}"),
            Some(request),
        )
        .await
    }

    pub async fn delete_skill(&self, id: i64) -> Result<(), AppError> {
        self.delete(&format!("/api/employee/Skills/delete/{id}")).await
    }

    /// The catalog as seen by the token's owner, flagged with their own skills.
    pub async fn own_skills(&self) -> Result<Vec<OwnSkill>, AppError> {
        self.get_json("/api/employee/Skills/all").await
    }

    pub async fn assign_skill(&self, assignment: &SkillAssignment) -> Result<(), AppError> {
        self.send(Method::POST, "/api/employee/Skills/assign", Some(assignment)).await
    }

    pub async fn update_assigned_skill(&self, assignment: &SkillAssignment) -> Result<(), AppError> {
        self.send(Method::PUT, "/api/employee/Skills/assign/update", Some(assignment)).await
    }

    pub async fn unassign_skill(&self, skill_id: i64) -> Result<(), AppError> {
        self.delete(&format!("/api/employee/Skills/unassign/{skill_id}")).await
    }

    // ==================== TEAMS ====================

    pub async fn list_teams(&self) -> Result<Vec<Team>, AppError> {
        self.get_json("/api/Employee/Teams/all").await
    }

    pub async fn create_team(&self, request: &GroupRequest) -> Result<(), AppError> {
        self.send(Method::POST, "/api/Employee/Teams/add", Some(request)).await
    }

    pub async fn update_team(&self, id: i64, request: &GroupRequest) -> Result<(), AppError> {
        self.send(
            Method::PUT,
            &format!("/api/Employee/Teams/update/{id}"),
            Some(request),
        )
        .await
    }

    pub async fn delete_team(&self, id: i64) -> Result<(), AppError> {
        self.delete(&format!("/api/Employee/Teams/delete/{id}")).await
    }

    pub async fn team_members(&self, team_id: i64) -> Result<Vec<Member>, AppError> {
        self.get_json(&format!("/api/Employee/Teams/teams/{team_id}/members")).await
    }

    /// Replace the member list of a team.
    pub async fn set_team_members(&self, team_id: i64, employee_ids: &[i64]) -> Result<(), AppError> {
        let body = json!({ "teamId": team_id, "employeeIds": employee_ids });
        self.send(Method::PUT, "/api/Employee/Teams", Some(&body)).await
    }

    /// Teams the token's owner belongs to.
    pub async fn employee_teams(&self) -> Result<Vec<Team>, AppError> {
        self.get_json("/api/Employee/Teams/employee-teams").await
    }

    pub async fn join_team(&self, team_id: i64) -> Result<(), AppError> {
        let body = json!({ "teamId": team_id });
        self.send(Method::POST, "/api/Employee/Teams/join", Some(&body)).await
    }

    pub async fn leave_team(&self, team_id: i64) -> Result<(), AppError> {
        self.delete(&format!("/api/Employee/Teams/leave/{team_id}")).await
    }

    // ==================== PRODUCTS ====================

    pub async fn list_products(&self) -> Result<Vec<Product>, AppError> {
        self.get_json("/api/Product/all").await
    }

    pub async fn create_product(&self, request: &GroupRequest) -> Result<(), AppError> {
        self.send(Method::POST, "/api/Product/add", Some(request)).await
    }

    pub async fn update_product(&self, id: i64, request: &GroupRequest) -> Result<(), AppError> {
        self.send(Method::PUT, &format!("/api/Product/update/{id}"), Some(request)).await
    }

    pub async fn delete_product(&self, id: i64) -> Result<(), AppError> {
        self.delete(&format!("/api/Product/delete/{id}")).await
    }

    pub async fn product_members(&self, product_id: i64) -> Result<Vec<Member>, AppError> {
        self.get_json(&format!("/api/Product/products/{product_id}/members")).await
    }

    /// Replace the member list of a product.
    pub async fn set_product_members(
        &self,
        product_id: i64,
        employee_ids: &[i64],
    ) -> Result<(), AppError> {
        let body = json!({ "productId": product_id, "employeeIds": employee_ids });
        self.send(Method::PUT, "/api/Product/assign", Some(&body)).await
    }
}

impl EmployeeDirectory for ApiClient {
    async fn fetch_employees(&self) -> Result<Vec<Employee>, AppError> {
        self.get_json("/api/admin/employees").await
    }
}

impl SkillCatalog for ApiClient {
    async fn fetch_stacks(&self) -> Result<Vec<Stack>, AppError> {
        self.get_json("/api/employee/Skills/stacks").await
    }

    async fn fetch_categories(&self) -> Result<Vec<Category>, AppError> {
        // Path spelling is the organization API's own.
        self.get_json("/api/employee/Skills/catgeory").await
    }

    async fn fetch_skills(&self) -> Result<Vec<Skill>, AppError> {
        self.get_json("/api/employee/Skills").await
    }
}

impl PositionDirectory for ApiClient {
    async fn fetch_positions(&self) -> Result<Vec<Position>, AppError> {
        self.get_json("/api/Positions/all").await
    }
}

/// Map a non-success upstream status to an [`AppError`].
async fn check_status(response: Response, fallback: Option<&str>) -> Result<Response, AppError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = extract_message(&body);
    tracing::warn!(%status, "Organization API rejected request");

    Err(status_error(status, message, fallback))
}

fn status_error(status: StatusCode, message: Option<String>, fallback: Option<&str>) -> AppError {
    let describe = |default: &str| {
        message
            .clone()
            .or_else(|| fallback.map(str::to_string))
            .unwrap_or_else(|| default.to_string())
    };

    match status {
        StatusCode::BAD_REQUEST => {
            AppError::Validation(describe("Request rejected by the organization API"))
        }
        StatusCode::UNAUTHORIZED => AppError::Unauthorized(describe("Not signed in")),
        StatusCode::FORBIDDEN => AppError::Forbidden(describe("Access denied")),
        StatusCode::NOT_FOUND => AppError::NotFound(describe("Resource not found")),
        _ => AppError::Upstream(format!("Organization API returned {}", status)),
    }
}

/// Pull a human-readable message out of an error body: the first validation
/// message, then `title`, then `message`, then the raw text.
fn extract_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }

    let Ok(value) = serde_json::from_str::<Value>(trimmed) else {
        return Some(trimmed.to_string());
    };

    let first_validation = value
        .get("errors")
        .and_then(Value::as_object)
        .and_then(|errors| errors.values().next())
        .and_then(Value::as_array)
        .and_then(|messages| messages.first())
        .and_then(Value::as_str);

    first_validation
        .or_else(|| value.get("title").and_then(Value::as_str))
        .or_else(|| value.get("message").and_then(Value::as_str))
        .or_else(|| value.as_str())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_validation_message() {
        let body = r#"{"title":"One or more validation errors occurred.","errors":{"Email":["The Email field is required."]}}"#;
        assert_eq!(
            extract_message(body).as_deref(),
            Some("The Email field is required.")
        );
    }

    #[test]
    fn test_extract_title_then_text() {
        assert_eq!(
            extract_message(r#"{"title":"Unauthorized"}"#).as_deref(),
            Some("Unauthorized")
        );
        assert_eq!(
            extract_message(r#""Invalid credentials""#).as_deref(),
            Some("Invalid credentials")
        );
        assert_eq!(
            extract_message("Invalid credentials").as_deref(),
            Some("Invalid credentials")
        );
        assert_eq!(extract_message("  "), None);
        assert_eq!(extract_message(r#"{"status":401}"#), None);
    }

    #[test]
    fn test_status_error_mapping() {
        assert_eq!(
            status_error(StatusCode::UNAUTHORIZED, None, Some(LOGIN_FAILED)),
            AppError::Unauthorized(LOGIN_FAILED.to_string())
        );
        assert_eq!(
            status_error(StatusCode::NOT_FOUND, None, None),
            AppError::NotFound("Resource not found".to_string())
        );
        assert_eq!(
            status_error(StatusCode::BAD_REQUEST, Some("Name taken".into()), None),
            AppError::Validation("Name taken".to_string())
        );
        assert_eq!(
            status_error(StatusCode::INTERNAL_SERVER_ERROR, Some("boom".into()), None),
            AppError::Upstream("Organization API returned 500 Internal Server Error".to_string())
        );
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = ApiClient::new("http://localhost:5000/");
        assert_eq!(client.base_url, "http://localhost:5000");
        assert!(client.token.is_none());
        assert_eq!(client.with_token("abc").token.as_deref(), Some("abc"));
    }
}
