//! Stack → category → skill dropdown cascade.
//!
//! Selecting an ancestor always clears its descendants, so a skill selection
//! can never outlive the category it came from.

use super::criteria::FilterCriteria;
use crate::errors::AppError;
use crate::models::{Category, Skill};

/// Keeps the visible category and skill lists consistent with the selections
/// held in a [`FilterCriteria`].
#[derive(Debug, Clone, Default)]
pub struct CascadeResolver {
    all_categories: Vec<Category>,
    all_skills: Vec<Skill>,
    visible_categories: Vec<Category>,
    visible_skills: Vec<Skill>,
}

impl CascadeResolver {
    pub fn new(categories: Vec<Category>, skills: Vec<Skill>) -> Self {
        Self {
            visible_categories: categories.clone(),
            all_categories: categories,
            all_skills: skills,
            visible_skills: Vec::new(),
        }
    }

    pub fn visible_categories(&self) -> &[Category] {
        &self.visible_categories
    }

    pub fn visible_skills(&self) -> &[Skill] {
        &self.visible_skills
    }

    /// Select a stack (`None` or `0` for none). With no stack every category is
    /// offered; the category and skill selections are always cleared.
    pub fn select_stack(&mut self, criteria: &mut FilterCriteria, stack_id: Option<i64>) {
        let stack_id = selected(stack_id);
        criteria.stack_id = stack_id;

        self.visible_categories = match stack_id {
            Some(id) => self
                .all_categories
                .iter()
                .filter(|category| category.stack_id == id)
                .cloned()
                .collect(),
            None => self.all_categories.clone(),
        };

        criteria.category_id = None;
        criteria.skill_id = None;
        self.visible_skills.clear();
    }

    /// Select a category (`None` or `0` for none). With no category no skill is
    /// offered; the skill selection is always cleared.
    pub fn select_category(
        &mut self,
        criteria: &mut FilterCriteria,
        category_id: Option<i64>,
    ) -> Result<(), AppError> {
        let category_id = selected(category_id);

        if let Some(id) = category_id {
            if !self.visible_categories.iter().any(|c| c.id == id) {
                return Err(AppError::Validation(format!(
                    "Category {} is not available for the selected stack",
                    id
                )));
            }
        }

        criteria.category_id = category_id;
        self.visible_skills = match category_id {
            Some(id) => self
                .all_skills
                .iter()
                .filter(|skill| skill.category_id == Some(id))
                .cloned()
                .collect(),
            None => Vec::new(),
        };
        criteria.skill_id = None;

        Ok(())
    }

    /// Select a skill (`None` or `0` for none) from the visible skill list.
    pub fn select_skill(
        &mut self,
        criteria: &mut FilterCriteria,
        skill_id: Option<i64>,
    ) -> Result<(), AppError> {
        let skill_id = selected(skill_id);

        if let Some(id) = skill_id {
            if !self.visible_skills.iter().any(|s| s.id == id) {
                return Err(AppError::Validation(format!(
                    "Skill {} is not available for the selected category",
                    id
                )));
            }
        }

        criteria.skill_id = skill_id;
        Ok(())
    }

    /// Back to the top-level defaults: every category, no skills.
    pub fn reset(&mut self) {
        self.visible_categories = self.all_categories.clone();
        self.visible_skills.clear();
    }
}

/// `0` is the "nothing selected" sentinel of the dropdowns.
fn selected(id: Option<i64>) -> Option<i64> {
    id.filter(|id| *id != 0)
}
