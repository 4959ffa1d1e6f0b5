//! Organization API access.
//!
//! The organization API owns every record; the console only reads collections
//! and forwards mutations. The collaborator traits below are what the filter
//! core depends on, so tests can substitute an in-memory directory.

mod client;

pub use client::*;

use std::future::Future;

use crate::errors::AppError;
use crate::models::{Category, Employee, Position, Skill, Stack};

/// Source of the full employee collection.
pub trait EmployeeDirectory {
    fn fetch_employees(&self) -> impl Future<Output = Result<Vec<Employee>, AppError>> + Send;
}

/// Source of the stack → category → skill catalog.
pub trait SkillCatalog {
    fn fetch_stacks(&self) -> impl Future<Output = Result<Vec<Stack>, AppError>> + Send;

    fn fetch_categories(&self) -> impl Future<Output = Result<Vec<Category>, AppError>> + Send;

    fn fetch_skills(&self) -> impl Future<Output = Result<Vec<Skill>, AppError>> + Send;
}

/// Source of the position list.
pub trait PositionDirectory {
    fn fetch_positions(&self) -> impl Future<Output = Result<Vec<Position>, AppError>> + Send;
}
