//! Shared fixtures for the filter tests.

use chrono::NaiveDate;

use crate::models::{
    Category, Employee, EmployeeSkill, ProductMembership, Skill, TeamMembership,
};

pub fn employee(id: i64, first: &str, last: &str, position: &str) -> Employee {
    Employee {
        id,
        first_name: first.to_string(),
        last_name: last.to_string(),
        email: format!("{}.{}@example.com", first, last).to_lowercase(),
        employee_number: None,
        position: position.to_string(),
        employee_skills: Vec::new(),
        team_employees: Vec::new(),
        employee_products: Vec::new(),
    }
}

pub fn skill(id: i64, name: &str, last_used: Option<&str>) -> EmployeeSkill {
    EmployeeSkill {
        id,
        skill_name: name.to_string(),
        last_used: last_used.and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok()),
        self_rating: None,
        years_of_experience: None,
        notes: None,
    }
}

/// Ann Lee (Dev, Rust last used 2023-01-01, Platform, Billing) and
/// Bo Kim (QA, no skills, QA Guild, Payroll).
pub fn ann_and_bo() -> Vec<Employee> {
    let mut ann = employee(1, "Ann", "Lee", "Dev");
    ann.employee_skills = vec![skill(1, "Rust", Some("2023-01-01"))];
    ann.team_employees = vec![TeamMembership {
        team_id: Some(1),
        team_name: "Platform".into(),
    }];
    ann.employee_products = vec![ProductMembership {
        product_id: Some(1),
        product_name: "Billing".into(),
    }];

    let mut bo = employee(2, "Bo", "Kim", "QA");
    bo.email = "bo.kim@example.org".into();
    bo.team_employees = vec![TeamMembership {
        team_id: Some(2),
        team_name: "QA Guild".into(),
    }];
    bo.employee_products = vec![ProductMembership {
        product_id: Some(2),
        product_name: "Payroll".into(),
    }];

    vec![ann, bo]
}

/// Stack 1 holds categories 10 and 11, stack 2 holds category 20.
pub fn categories() -> Vec<Category> {
    [(10, "Languages", 1), (11, "Databases", 1), (20, "Tooling", 2)]
        .into_iter()
        .map(|(id, name, stack_id)| Category {
            id,
            name: name.to_string(),
            description: None,
            stack_id,
            is_active: Some(true),
        })
        .collect()
}

/// Skills 1-2 in category 10, 3 in 11, 4 in 20, and 5 without a category.
pub fn skills() -> Vec<Skill> {
    [
        (1, "Rust", Some(10)),
        (2, "Go", Some(10)),
        (3, "PostgreSQL", Some(11)),
        (4, "Docker", Some(20)),
        (5, "Whiteboarding", None),
    ]
    .into_iter()
    .map(|(id, name, category_id)| Skill {
        id,
        name: name.to_string(),
        description: None,
        category_id,
    })
    .collect()
}
