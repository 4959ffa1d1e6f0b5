//! Conjunctive facet predicates over the employee collection.

use chrono::NaiveDate;

use super::criteria::{Facet, FacetSet, FilterCriteria};
use crate::models::Employee;

/// Evaluates [`FilterCriteria`] against employees for a fixed set of facets.
#[derive(Debug, Clone, Copy)]
pub struct PredicateEvaluator {
    facets: FacetSet,
}

impl PredicateEvaluator {
    pub fn new(facets: FacetSet) -> Self {
        Self { facets }
    }

    /// The employees satisfying every enabled, active facet, in their original order.
    pub fn evaluate(&self, criteria: &FilterCriteria, employees: &[Employee]) -> Vec<Employee> {
        let term = criteria.name_search_term.to_lowercase();
        employees
            .iter()
            .filter(|employee| self.matches_with_term(criteria, &term, employee))
            .cloned()
            .collect()
    }

    fn matches_with_term(&self, criteria: &FilterCriteria, term: &str, employee: &Employee) -> bool {
        let enabled = |facet| self.facets.contains(facet);

        (!enabled(Facet::Skill) || skill_matches(employee, criteria.skill_id))
            && (!enabled(Facet::Position)
                || position_matches(employee, criteria.position.as_deref()))
            && (!enabled(Facet::LastUsed) || last_used_matches(employee, criteria.last_used_date))
            && (!enabled(Facet::Text) || text_matches(employee, term))
            && (!enabled(Facet::Team) || team_matches(employee, criteria.team.as_deref()))
            && (!enabled(Facet::Product) || product_matches(employee, criteria.product.as_deref()))
    }
}

fn skill_matches(employee: &Employee, skill_id: Option<i64>) -> bool {
    skill_id.map_or(true, |id| {
        employee.employee_skills.iter().any(|skill| skill.id == id)
    })
}

fn position_matches(employee: &Employee, position: Option<&str>) -> bool {
    position.map_or(true, |position| employee.position == position)
}

fn last_used_matches(employee: &Employee, threshold: Option<NaiveDate>) -> bool {
    threshold.map_or(true, |threshold| {
        employee
            .employee_skills
            .iter()
            .any(|skill| skill.last_used.is_some_and(|used| used >= threshold))
    })
}

/// `term` must already be lowercase.
fn text_matches(employee: &Employee, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }

    let first = employee.first_name.to_lowercase();
    let last = employee.last_name.to_lowercase();

    first.contains(term)
        || last.contains(term)
        || employee.email.to_lowercase().contains(term)
        || format!("{first} {last}").contains(term)
}

fn team_matches(employee: &Employee, team: Option<&str>) -> bool {
    team.map_or(true, |team| {
        employee.team_employees.iter().any(|t| t.team_name == team)
    })
}

fn product_matches(employee: &Employee, product: Option<&str>) -> bool {
    product.map_or(true, |product| {
        employee
            .employee_products
            .iter()
            .any(|p| p.product_name == product)
    })
}

/// Employees whose `"first last"` equals `name`, ignoring case.
pub fn filter_by_exact_name(employees: &[Employee], name: &str) -> Vec<Employee> {
    let target = name.to_lowercase();
    employees
        .iter()
        .filter(|employee| employee.full_name().to_lowercase() == target)
        .cloned()
        .collect()
}

/// Full names containing `term`, ignoring case, in collection order.
pub fn suggest_names(employees: &[Employee], term: &str) -> Vec<String> {
    let term = term.to_lowercase();
    employees
        .iter()
        .map(Employee::full_name)
        .filter(|name| name.to_lowercase().contains(&term))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::slice;

    use crate::filter::test_support::{ann_and_bo, employee};

    fn evaluator() -> PredicateEvaluator {
        PredicateEvaluator::new(FacetSet::all())
    }

    fn names(employees: &[Employee]) -> Vec<String> {
        employees.iter().map(Employee::full_name).collect()
    }

    fn date(raw: &str) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
    }

    #[test]
    fn test_unconstrained_returns_everything_in_order() {
        let employees = ann_and_bo();
        let result = evaluator().evaluate(&FilterCriteria::default(), &employees);
        assert_eq!(result, employees);
    }

    #[test]
    fn test_position_filter() {
        let criteria = FilterCriteria {
            position: Some("Dev".into()),
            ..Default::default()
        };
        let result = evaluator().evaluate(&criteria, &ann_and_bo());
        assert_eq!(names(&result), vec!["Ann Lee"]);
    }

    #[test]
    fn test_position_is_exact() {
        let criteria = FilterCriteria {
            position: Some("dev".into()),
            ..Default::default()
        };
        assert!(evaluator().evaluate(&criteria, &ann_and_bo()).is_empty());
    }

    #[test]
    fn test_skill_and_last_used_threshold() {
        let mut criteria = FilterCriteria {
            skill_id: Some(1),
            last_used_date: date("2022-06-01"),
            ..Default::default()
        };
        let result = evaluator().evaluate(&criteria, &ann_and_bo());
        assert_eq!(names(&result), vec!["Ann Lee"]);

        criteria.last_used_date = date("2024-01-01");
        assert!(evaluator().evaluate(&criteria, &ann_and_bo()).is_empty());
    }

    #[test]
    fn test_last_used_bound_is_inclusive() {
        let criteria = FilterCriteria {
            last_used_date: date("2023-01-01"),
            ..Default::default()
        };
        let result = evaluator().evaluate(&criteria, &ann_and_bo());
        assert_eq!(names(&result), vec!["Ann Lee"]);
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let criteria = FilterCriteria {
            name_search_term: "bo".into(),
            ..Default::default()
        };
        let result = evaluator().evaluate(&criteria, &ann_and_bo());
        assert_eq!(names(&result), vec!["Bo Kim"]);

        let criteria = FilterCriteria {
            name_search_term: "N L".into(),
            ..Default::default()
        };
        let result = evaluator().evaluate(&criteria, &ann_and_bo());
        assert_eq!(names(&result), vec!["Ann Lee"]);
    }

    #[test]
    fn test_search_matches_email() {
        let criteria = FilterCriteria {
            name_search_term: "EXAMPLE.ORG".into(),
            ..Default::default()
        };
        let result = evaluator().evaluate(&criteria, &ann_and_bo());
        assert_eq!(names(&result), vec!["Bo Kim"]);
    }

    #[test]
    fn test_team_and_product_filters() {
        let employees = ann_and_bo();

        let criteria = FilterCriteria {
            team: Some("Platform".into()),
            ..Default::default()
        };
        assert_eq!(names(&evaluator().evaluate(&criteria, &employees)), vec!["Ann Lee"]);

        let criteria = FilterCriteria {
            product: Some("Payroll".into()),
            ..Default::default()
        };
        assert_eq!(names(&evaluator().evaluate(&criteria, &employees)), vec!["Bo Kim"]);
    }

    #[test]
    fn test_any_failing_facet_excludes() {
        // Ann passes position and team but fails the product facet
        let criteria = FilterCriteria {
            position: Some("Dev".into()),
            team: Some("Platform".into()),
            product: Some("Payroll".into()),
            ..Default::default()
        };
        let employees = ann_and_bo();
        assert!(evaluator().evaluate(&criteria, &employees).is_empty());
    }

    #[test]
    fn test_disabled_facet_is_ignored() {
        let criteria = FilterCriteria {
            team: Some("Nonexistent".into()),
            ..Default::default()
        };
        let without_team = PredicateEvaluator::new(
            FacetSet::empty()
                .with(Facet::Skill)
                .with(Facet::Position)
                .with(Facet::Text),
        );
        assert_eq!(without_team.evaluate(&criteria, &ann_and_bo()).len(), 2);
        assert!(evaluator().evaluate(&criteria, &ann_and_bo()).is_empty());
    }

    #[test]
    fn test_employee_without_skills_never_matches_skill_facets() {
        let bare = employee(3, "Cy", "Ray", "QA");
        let criteria = FilterCriteria {
            skill_id: Some(1),
            ..Default::default()
        };
        assert!(evaluator().evaluate(&criteria, slice::from_ref(&bare)).is_empty());

        let criteria = FilterCriteria {
            last_used_date: date("2000-01-01"),
            ..Default::default()
        };
        assert!(evaluator().evaluate(&criteria, slice::from_ref(&bare)).is_empty());
    }

    #[test]
    fn test_exact_name_ignores_substrings() {
        let mut employees = ann_and_bo();
        employees.push(employee(3, "Annabel", "Leeds", "Dev"));
        employees.push(employee(4, "Joann", "Lee", "Dev"));

        let result = filter_by_exact_name(&employees, "ann lee");
        assert_eq!(names(&result), vec!["Ann Lee"]);
        assert!(filter_by_exact_name(&employees, "ann").is_empty());
    }

    #[test]
    fn test_suggest_names() {
        let mut employees = ann_and_bo();
        employees.push(employee(4, "Joann", "Lee", "Dev"));

        assert_eq!(suggest_names(&employees, "ANN"), vec!["Ann Lee", "Joann Lee"]);
        assert_eq!(suggest_names(&employees, "").len(), 3);
    }
}
