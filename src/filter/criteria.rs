//! Filter criteria and the facet vocabulary.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize, Serializer};

use crate::models::optional_date;

/// One independently adjustable filter dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Facet {
    Skill,
    Position,
    LastUsed,
    Text,
    Team,
    Product,
}

impl Facet {
    pub const ALL: [Facet; 6] = [
        Facet::Skill,
        Facet::Position,
        Facet::LastUsed,
        Facet::Text,
        Facet::Team,
        Facet::Product,
    ];

    fn bit(self) -> u8 {
        1 << self as u8
    }
}

/// The facets a screen evaluates. Disabled facets always match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FacetSet(u8);

impl FacetSet {
    pub const fn empty() -> Self {
        FacetSet(0)
    }

    pub fn all() -> Self {
        Facet::ALL.iter().fold(Self::empty(), |set, f| set.with(*f))
    }

    pub fn with(self, facet: Facet) -> Self {
        FacetSet(self.0 | facet.bit())
    }

    pub fn contains(self, facet: Facet) -> bool {
        self.0 & facet.bit() != 0
    }

    pub fn iter(self) -> impl Iterator<Item = Facet> {
        Facet::ALL.into_iter().filter(move |f| self.contains(*f))
    }
}

impl Serialize for FacetSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

/// Current selections of a filter view. `None` (or an empty search term)
/// means the facet imposes no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterCriteria {
    pub stack_id: Option<i64>,
    pub category_id: Option<i64>,
    pub skill_id: Option<i64>,
    pub position: Option<String>,
    pub team: Option<String>,
    pub product: Option<String>,
    pub last_used_date: Option<NaiveDate>,
    pub name_search_term: String,
}

impl FilterCriteria {
    /// True when no facet constrains the result.
    pub fn is_unconstrained(&self) -> bool {
        *self == FilterCriteria::default()
    }
}

/// A single user interaction on a filter view.
///
/// Wire form: `{"facet": "position", "value": "Dev"}`; a `null` value, an
/// empty string or the id `0` unsets the facet.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "facet", content = "value", rename_all = "camelCase")]
pub enum FacetChange {
    Stack(Option<i64>),
    Category(Option<i64>),
    Skill(Option<i64>),
    Position(Option<String>),
    Team(Option<String>),
    Product(Option<String>),
    LastUsedDate(#[serde(deserialize_with = "optional_date")] Option<NaiveDate>),
    Search(Option<String>),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_facet_set_membership() {
        let all = FacetSet::all();
        assert!(Facet::ALL.iter().all(|f| all.contains(*f)));

        let narrowed = FacetSet::empty().with(Facet::Skill).with(Facet::Text);
        assert!(!narrowed.contains(Facet::Team));
        assert!(narrowed.contains(Facet::Skill));
        assert_eq!(narrowed.iter().count(), 2);
        assert_eq!(FacetSet::empty().iter().count(), 0);
    }

    #[test]
    fn test_facet_set_serializes_as_list() {
        let set = FacetSet::empty().with(Facet::LastUsed).with(Facet::Text);
        assert_eq!(serde_json::to_value(set).unwrap(), json!(["lastUsed", "text"]));
    }

    #[test]
    fn test_facet_change_wire_format() {
        let change: FacetChange =
            serde_json::from_value(json!({ "facet": "position", "value": "Dev" })).unwrap();
        assert_eq!(change, FacetChange::Position(Some("Dev".into())));

        let change: FacetChange =
            serde_json::from_value(json!({ "facet": "stack", "value": null })).unwrap();
        assert_eq!(change, FacetChange::Stack(None));

        let change: FacetChange =
            serde_json::from_value(json!({ "facet": "lastUsedDate", "value": "2022-06-01" }))
                .unwrap();
        assert_eq!(
            change,
            FacetChange::LastUsedDate(NaiveDate::from_ymd_opt(2022, 6, 1))
        );

        let change: FacetChange =
            serde_json::from_value(json!({ "facet": "lastUsedDate", "value": "" })).unwrap();
        assert_eq!(change, FacetChange::LastUsedDate(None));
    }

    #[test]
    fn test_facet_change_rejects_bad_date() {
        let result: Result<FacetChange, _> =
            serde_json::from_value(json!({ "facet": "lastUsedDate", "value": "soon" }));
        assert!(result.is_err());
    }

    #[test]
    fn test_default_criteria_unconstrained() {
        let mut criteria = FilterCriteria::default();
        assert!(criteria.is_unconstrained());
        criteria.name_search_term = "bo".into();
        assert!(!criteria.is_unconstrained());
    }
}
