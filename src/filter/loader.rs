//! Catalog loading for filter views.

use std::collections::HashSet;

use crate::errors::AppError;
use crate::models::{Category, Employee, Position, Skill, Stack};
use crate::upstream::{EmployeeDirectory, PositionDirectory, SkillCatalog};

/// Everything a filter view needs, captured once per mount.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub employees: Vec<Employee>,
    pub stacks: Vec<Stack>,
    pub categories: Vec<Category>,
    pub skills: Vec<Skill>,
    pub positions: Vec<Position>,
    pub team_names: Vec<String>,
    pub product_names: Vec<String>,
}

impl Catalog {
    /// Assemble a catalog, deriving the team and product name lists from the
    /// employees' memberships.
    pub fn new(
        employees: Vec<Employee>,
        stacks: Vec<Stack>,
        categories: Vec<Category>,
        skills: Vec<Skill>,
        positions: Vec<Position>,
    ) -> Self {
        let team_names = distinct(
            employees
                .iter()
                .flat_map(|e| e.team_employees.iter().map(|t| t.team_name.as_str())),
        );
        let product_names = distinct(
            employees
                .iter()
                .flat_map(|e| e.employee_products.iter().map(|p| p.product_name.as_str())),
        );

        Self {
            employees,
            stacks,
            categories,
            skills,
            positions,
            team_names,
            product_names,
        }
    }
}

/// Unique non-empty names in first-seen order.
fn distinct<'a>(names: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    names
        .filter(|name| !name.is_empty() && seen.insert(*name))
        .map(str::to_string)
        .collect()
}

/// Fetch the five collections concurrently.
///
/// A failed fetch is logged and leaves only its own collection empty.
pub async fn load_catalog<C>(client: &C) -> Catalog
where
    C: EmployeeDirectory + SkillCatalog + PositionDirectory + Sync,
{
    let (employees, stacks, categories, skills, positions) = tokio::join!(
        client.fetch_employees(),
        client.fetch_stacks(),
        client.fetch_categories(),
        client.fetch_skills(),
        client.fetch_positions(),
    );

    let catalog = Catalog::new(
        settle("employees", employees),
        settle("stacks", stacks),
        settle("categories", categories),
        settle("skills", skills),
        settle("positions", positions),
    );

    tracing::debug!(
        employees = catalog.employees.len(),
        stacks = catalog.stacks.len(),
        categories = catalog.categories.len(),
        skills = catalog.skills.len(),
        positions = catalog.positions.len(),
        "Catalog loaded"
    );

    catalog
}

fn settle<T>(collection: &'static str, result: Result<Vec<T>, AppError>) -> Vec<T> {
    result.unwrap_or_else(|e| {
        tracing::error!(collection, error = %e, "Failed to load catalog collection");
        Vec::new()
    })
}
