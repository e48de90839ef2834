//! Filter state and the filtered view of the catalog.
//!
//! Three constraints combine: selected generations (any of), selected element
//! types (all of) and the search query. [`apply`] is a pure function of the
//! catalog and the current [`FilterState`].

pub mod query;

use std::collections::BTreeSet;

use crate::catalog::{CatalogItem, ELEMENT_TYPES, Generation};
use crate::error::{DexError, Result};

pub use query::{ID_MARKER, SearchQuery};

/// Current selection of the three filter controls
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    types: BTreeSet<String>,
    generations: BTreeSet<Generation>,
    query: String,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn types(&self) -> &BTreeSet<String> {
        &self.types
    }

    pub fn generations(&self) -> &BTreeSet<Generation> {
        &self.generations
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn search(&self) -> SearchQuery {
        SearchQuery::parse(&self.query)
    }

    /// Flip an element type in or out of the selection.
    ///
    /// Returns whether the type is selected afterwards.
    pub fn toggle_type(&mut self, name: &str) -> Result<bool> {
        let name = name.trim().to_lowercase();
        if !ELEMENT_TYPES.contains(&name.as_str()) {
            return Err(DexError::InvalidCommand(format!(
                "unknown type '{name}' (expected one of: {})",
                ELEMENT_TYPES.join(", ")
            )));
        }

        if self.types.remove(&name) {
            Ok(false)
        } else {
            self.types.insert(name);
            Ok(true)
        }
    }

    /// Flip a generation in or out of the selection.
    ///
    /// Returns whether the generation is selected afterwards.
    pub fn toggle_generation(&mut self, generation: Generation) -> bool {
        if self.generations.remove(&generation) {
            false
        } else {
            self.generations.insert(generation);
            true
        }
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Drop every selection and the query
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_unconstrained(&self) -> bool {
        self.types.is_empty() && self.generations.is_empty() && self.search().is_unconstrained()
    }

    fn matches_generation(&self, item: &CatalogItem) -> bool {
        self.generations.is_empty() || self.generations.iter().any(|g| g.contains(item.id))
    }

    fn matches_types(&self, item: &CatalogItem) -> bool {
        self.types.iter().all(|t| item.has_type(t))
    }
}

/// The catalog items satisfying every constraint of `filter`, in catalog order.
pub fn apply<'a>(items: &'a [CatalogItem], filter: &FilterState) -> Vec<&'a CatalogItem> {
    let search = filter.search();
    items
        .iter()
        .filter(|item| filter.matches_generation(item))
        .filter(|item| filter.matches_types(item))
        .filter(|item| search.matches(item))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::fake::item;

    fn catalog() -> Vec<CatalogItem> {
        vec![
            item(1, "bulbasaur", &["grass", "poison"]),
            item(4, "charmander", &["fire"]),
            item(25, "pikachu", &["electric"]),
            item(152, "chikorita", &["grass"]),
            item(172, "pichu", &["electric"]),
            item(315, "roselia", &["grass", "poison"]),
        ]
    }

    fn ids(items: &[&CatalogItem]) -> Vec<u32> {
        items.iter().map(|i| i.id).collect()
    }

    #[test]
    fn test_unconstrained_filter_keeps_everything() {
        let items = catalog();
        let filter = FilterState::new();
        assert!(filter.is_unconstrained());
        assert_eq!(apply(&items, &filter).len(), items.len());
    }

    #[test]
    fn test_types_combine_with_and() {
        let items = catalog();
        let mut filter = FilterState::new();
        filter.toggle_type("grass").unwrap();
        assert_eq!(ids(&apply(&items, &filter)), vec![1, 152, 315]);

        filter.toggle_type("poison").unwrap();
        assert_eq!(ids(&apply(&items, &filter)), vec![1, 315]);
    }

    #[test]
    fn test_generations_combine_with_or() {
        let items = catalog();
        let mut filter = FilterState::new();
        filter.toggle_generation(Generation::I);
        assert_eq!(ids(&apply(&items, &filter)), vec![1, 4, 25]);

        filter.toggle_generation(Generation::III);
        assert_eq!(ids(&apply(&items, &filter)), vec![1, 4, 25, 315]);
    }

    #[test]
    fn test_all_constraints_compose() {
        let items = catalog();
        let mut filter = FilterState::new();
        filter.toggle_generation(Generation::II);
        filter.toggle_type("electric").unwrap();
        filter.set_query("PI");
        assert_eq!(ids(&apply(&items, &filter)), vec![172]);
    }

    #[test]
    fn test_result_does_not_depend_on_toggle_order() {
        let items = catalog();

        let mut a = FilterState::new();
        a.toggle_type("poison").unwrap();
        a.toggle_generation(Generation::III);
        a.set_query("ros");

        let mut b = FilterState::new();
        b.set_query("ros");
        b.toggle_generation(Generation::III);
        b.toggle_type("poison").unwrap();

        assert_eq!(a, b);
        assert_eq!(ids(&apply(&items, &a)), ids(&apply(&items, &b)));
    }

    #[test]
    fn test_stage_order_does_not_change_result() {
        let items = catalog();
        let mut filter = FilterState::new();
        filter.toggle_generation(Generation::I);
        filter.toggle_generation(Generation::III);
        filter.toggle_type("grass").unwrap();
        filter.set_query("a");
        let search = filter.search();

        let generation = |item: &&CatalogItem| filter.matches_generation(item);
        let types = |item: &&CatalogItem| filter.matches_types(item);
        let query = |item: &&CatalogItem| search.matches(item);
        let stages: [&dyn Fn(&&CatalogItem) -> bool; 3] = [&generation, &types, &query];

        let expected = ids(&apply(&items, &filter));
        assert_eq!(expected, vec![1, 315]);

        let orders = [[0, 1, 2], [0, 2, 1], [1, 0, 2], [1, 2, 0], [2, 0, 1], [2, 1, 0]];
        for order in orders {
            let mut kept: Vec<&CatalogItem> = items.iter().collect();
            for stage in order {
                kept.retain(|item| stages[stage](item));
            }
            assert_eq!(ids(&kept), expected, "stage order {order:?}");
        }
    }

    #[test]
    fn test_id_queries() {
        let items = catalog();
        let mut filter = FilterState::new();

        filter.set_query("#");
        assert_eq!(apply(&items, &filter).len(), items.len());

        filter.set_query("#25");
        assert_eq!(ids(&apply(&items, &filter)), vec![25]);

        filter.set_query("#xyz");
        assert!(apply(&items, &filter).is_empty());
    }

    #[test]
    fn test_toggle_twice_deselects() {
        let mut filter = FilterState::new();
        assert!(filter.toggle_type("Fire").unwrap());
        assert!(filter.types().contains("fire"));
        assert!(!filter.toggle_type("fire").unwrap());
        assert!(filter.is_unconstrained());

        assert!(filter.toggle_generation(Generation::IV));
        assert!(!filter.toggle_generation(Generation::IV));
        assert!(filter.generations().is_empty());
    }

    #[test]
    fn test_unknown_type_is_rejected() {
        let mut filter = FilterState::new();
        let err = filter.toggle_type("shadow").unwrap_err();
        assert!(matches!(err, DexError::InvalidCommand(_)));
        assert!(filter.types().is_empty());
    }

    #[test]
    fn test_clear_resets_all_controls() {
        let mut filter = FilterState::new();
        filter.toggle_type("water").unwrap();
        filter.toggle_generation(Generation::V);
        filter.set_query("pika");
        filter.clear();
        assert_eq!(filter, FilterState::new());
    }
}
