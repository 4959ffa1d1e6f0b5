//! Faceted employee filter view.
//!
//! Holds one mount's catalog snapshot together with the criteria, the cascade
//! lists and the current result. Every mutation recomputes the result from the
//! full employee collection.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::cascade::CascadeResolver;
use super::criteria::{FacetChange, FacetSet, FilterCriteria};
use super::loader::Catalog;
use super::predicate::{self, PredicateEvaluator};
use crate::errors::AppError;
use crate::models::{Category, Employee, Position, Skill, Stack};

pub const DEFAULT_PAGE_SIZE: usize = 20;
pub const MAX_PAGE_SIZE: usize = 100;

/// Console screens backed by a filter view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Screen {
    /// Employee directory
    Employees,
    /// Employee skills matrix, with name autocomplete and name deep links
    EmployeesSkills,
}

impl Screen {
    pub fn name(self) -> &'static str {
        match self {
            Screen::Employees => "employees",
            Screen::EmployeesSkills => "employees-skills",
        }
    }

    pub fn facets(self) -> FacetSet {
        FacetSet::all()
    }

    pub fn supports_name_lookup(self) -> bool {
        matches!(self, Screen::EmployeesSkills)
    }
}

/// One page of a longer list.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub page: usize,
    pub page_size: usize,
}

impl<T: Clone> Page<T> {
    /// Slice `all` into the 1-based `page`; the size is clamped to `1..=MAX_PAGE_SIZE`.
    pub fn of(all: &[T], page: usize, page_size: usize) -> Self {
        let page = page.max(1);
        let page_size = page_size.clamp(1, MAX_PAGE_SIZE);
        let start = (page - 1).saturating_mul(page_size);

        Self {
            items: all.iter().skip(start).take(page_size).cloned().collect(),
            total: all.len(),
            page,
            page_size,
        }
    }
}

/// Serializable state of a view as the console renders it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewSnapshot {
    pub screen: Screen,
    pub facets: FacetSet,
    pub criteria: FilterCriteria,
    pub stacks: Vec<Stack>,
    pub categories: Vec<Category>,
    pub skills: Vec<Skill>,
    pub positions: Vec<Position>,
    pub team_names: Vec<String>,
    pub product_names: Vec<String>,
    pub employees: Page<Employee>,
}

/// View-local filter state for one screen.
#[derive(Debug, Clone)]
pub struct EmployeeFilterView {
    screen: Screen,
    catalog: Catalog,
    evaluator: PredicateEvaluator,
    cascade: CascadeResolver,
    criteria: FilterCriteria,
    filtered: Vec<Employee>,
}

impl EmployeeFilterView {
    pub fn new(screen: Screen, catalog: Catalog) -> Self {
        let cascade = CascadeResolver::new(catalog.categories.clone(), catalog.skills.clone());
        let mut view = Self {
            screen,
            evaluator: PredicateEvaluator::new(screen.facets()),
            cascade,
            criteria: FilterCriteria::default(),
            filtered: Vec::new(),
            catalog,
        };
        view.refresh();
        view
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn filtered(&self) -> &[Employee] {
        &self.filtered
    }

    pub fn visible_categories(&self) -> &[Category] {
        self.cascade.visible_categories()
    }

    pub fn visible_skills(&self) -> &[Skill] {
        self.cascade.visible_skills()
    }

    pub fn select_stack(&mut self, stack_id: Option<i64>) {
        self.cascade.select_stack(&mut self.criteria, stack_id);
        self.refresh();
    }

    pub fn select_category(&mut self, category_id: Option<i64>) -> Result<(), AppError> {
        self.cascade.select_category(&mut self.criteria, category_id)?;
        self.refresh();
        Ok(())
    }

    pub fn select_skill(&mut self, skill_id: Option<i64>) -> Result<(), AppError> {
        self.cascade.select_skill(&mut self.criteria, skill_id)?;
        self.refresh();
        Ok(())
    }

    pub fn set_position(&mut self, position: Option<String>) {
        self.criteria.position = non_empty(position);
        self.refresh();
    }

    pub fn set_team(&mut self, team: Option<String>) {
        self.criteria.team = non_empty(team);
        self.refresh();
    }

    pub fn set_product(&mut self, product: Option<String>) {
        self.criteria.product = non_empty(product);
        self.refresh();
    }

    pub fn set_last_used_date(&mut self, date: Option<NaiveDate>) {
        self.criteria.last_used_date = date;
        self.refresh();
    }

    pub fn set_search_term(&mut self, term: Option<String>) {
        self.criteria.name_search_term = term.unwrap_or_default();
        self.refresh();
    }

    /// Dispatch one interaction.
    pub fn apply(&mut self, change: FacetChange) -> Result<(), AppError> {
        match change {
            FacetChange::Stack(id) => self.select_stack(id),
            FacetChange::Category(id) => self.select_category(id)?,
            FacetChange::Skill(id) => self.select_skill(id)?,
            FacetChange::Position(value) => self.set_position(value),
            FacetChange::Team(value) => self.set_team(value),
            FacetChange::Product(value) => self.set_product(value),
            FacetChange::LastUsedDate(date) => self.set_last_used_date(date),
            FacetChange::Search(term) => self.set_search_term(term),
        }
        Ok(())
    }

    /// Unset every facet and show the whole collection again.
    pub fn clear_filters(&mut self) {
        self.criteria = FilterCriteria::default();
        self.cascade.reset();
        self.filtered = self.catalog.employees.clone();
    }

    /// Show only employees named exactly `name` (case-insensitive). The name
    /// also becomes the search term, so later facet changes narrow from it.
    pub fn filter_by_exact_name(&mut self, name: &str) {
        self.criteria.name_search_term = name.to_string();
        self.filtered = predicate::filter_by_exact_name(&self.catalog.employees, name);
    }

    pub fn suggest_names(&self, term: &str) -> Vec<String> {
        predicate::suggest_names(&self.catalog.employees, term)
    }

    pub fn snapshot(&self, page: usize, page_size: usize) -> ViewSnapshot {
        ViewSnapshot {
            screen: self.screen,
            facets: self.screen.facets(),
            criteria: self.criteria.clone(),
            stacks: self.catalog.stacks.clone(),
            categories: self.visible_categories().to_vec(),
            skills: self.visible_skills().to_vec(),
            positions: self.catalog.positions.clone(),
            team_names: self.catalog.team_names.clone(),
            product_names: self.catalog.product_names.clone(),
            employees: Page::of(&self.filtered, page, page_size),
        }
    }

    fn refresh(&mut self) {
        self.filtered = self.evaluator.evaluate(&self.criteria, &self.catalog.employees);
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
