//! Faceted employee filtering.
//!
//! A filter view narrows the employee collection by a conjunction of facets:
//! the stack → category → skill cascade, position, last-used date, free-text
//! search, team and product.

mod cascade;
mod criteria;
mod loader;
mod predicate;
mod view;

#[cfg(test)]
pub(crate) mod test_support;

pub use criteria::FacetChange;
pub use loader::load_catalog;
pub use view::{EmployeeFilterView, Screen, ViewSnapshot, DEFAULT_PAGE_SIZE};
