//! Employee model matching the organization API's employee response.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{
    lenient_date, lenient_number, lenient_rating, lenient_text, null_as_default, optional_date,
};

/// A skill held by an employee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeSkill {
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub skill_name: String,
    #[serde(default, deserialize_with = "lenient_date")]
    pub last_used: Option<NaiveDate>,
    #[serde(
        default,
        deserialize_with = "lenient_rating",
        skip_serializing_if = "Option::is_none"
    )]
    pub self_rating: Option<i32>,
    #[serde(
        default,
        deserialize_with = "lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub years_of_experience: Option<f64>,
    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub notes: Option<String>,
}

/// A catalog skill as seen by the signed-in employee, with their own details
/// when `is_assigned` is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnSkill {
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub stack: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_assigned: bool,
    #[serde(default, deserialize_with = "lenient_date")]
    pub last_used: Option<NaiveDate>,
    #[serde(
        default,
        deserialize_with = "lenient_rating",
        skip_serializing_if = "Option::is_none"
    )]
    pub self_rating: Option<i32>,
    #[serde(
        default,
        deserialize_with = "lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub years_of_experience: Option<f64>,
    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub notes: Option<String>,
}

/// Lowest and highest self rating an employee may give.
pub const SELF_RATING_RANGE: (i32, i32) = (1, 5);

/// Request body for adding or updating one of the employee's own skills.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillAssignment {
    /// Catalog skill id
    #[serde(default)]
    pub id: i64,
    #[serde(default, deserialize_with = "optional_date")]
    pub last_used: Option<NaiveDate>,
    #[serde(default)]
    pub self_rating: Option<i32>,
    #[serde(default)]
    pub years_of_experience: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl SkillAssignment {
    /// Clamp the rating into range, treating a missing rating as the lowest.
    pub fn clamp_rating(&mut self) {
        let (low, high) = SELF_RATING_RANGE;
        self.self_rating = Some(self.self_rating.unwrap_or(low).clamp(low, high));
    }
}

/// Membership of an employee in a team.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMembership {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_id: Option<i64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub team_name: String,
}

/// Membership of an employee in a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductMembership {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_id: Option<i64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub product_name: String,
}

/// An employee with nested skills, teams and products.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub first_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub last_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_number: Option<i64>,
    /// Position label, compared verbatim by the position facet
    #[serde(default, deserialize_with = "null_as_default")]
    pub position: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub employee_skills: Vec<EmployeeSkill>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub team_employees: Vec<TeamMembership>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub employee_products: Vec<ProductMembership>,
}

impl Employee {
    /// `"first last"` as shown in the console.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Request body for creating a new employee account.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEmployeeRequest {
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub user_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_number: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position_id: Option<i64>,
}
