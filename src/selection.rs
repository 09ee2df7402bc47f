//! Preference selection state
//!
//! Tracks which categories and which leaf subcategories a user has picked in
//! the preferences wizard, keeping the two levels in sync:
//!
//! - selecting a subcategory selects its owning category,
//! - deselecting the last selected subcategory of a category deselects it,
//! - deselecting a category deselects all of its subcategories,
//! - selecting a category leaves its subcategories untouched.
//!
//! # Invariants
//!
//! - Every selected subcategory's owner is a selected category.
//! - Category membership is recomputed on each toggle, never cached.
//! - Ids that do not resolve against the catalog are ignored.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::debug;

use crate::catalog::Catalog;

/// Selected categories and subcategories.
///
/// Sets are ordered so review and submission output are deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferenceSelection {
    categories: BTreeSet<String>,
    subcategories: BTreeSet<String>,
}

impl PreferenceSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle a category (`subcategory == None`) or one of its subcategories.
    ///
    /// Unknown categories, unknown subcategories, and subcategories not owned
    /// by `category` leave the state unchanged.
    pub fn toggle(&mut self, catalog: &Catalog, category: &str, subcategory: Option<&str>) {
        let Some(owner) = catalog.get(category) else {
            debug!("Ignoring toggle of unknown category '{}'", category);
            return;
        };

        match subcategory {
            None => {
                if self.categories.remove(category) {
                    for sub in &owner.subcategories {
                        self.subcategories.remove(sub);
                    }
                } else {
                    self.categories.insert(category.to_string());
                }
            }
            Some(sub) => {
                if !owner.owns(sub) {
                    debug!(
                        "Ignoring toggle of '{}': not a subcategory of '{}'",
                        sub, category
                    );
                    return;
                }

                if self.subcategories.remove(sub) {
                    let any_remaining = owner
                        .subcategories
                        .iter()
                        .any(|s| self.subcategories.contains(s));
                    if !any_remaining {
                        self.categories.remove(category);
                    }
                } else {
                    self.subcategories.insert(sub.to_string());
                    self.categories.insert(category.to_string());
                }
            }
        }
    }

    /// Non-mutating form of [`toggle`](Self::toggle).
    pub fn toggled(&self, catalog: &Catalog, category: &str, subcategory: Option<&str>) -> Self {
        let mut next = self.clone();
        next.toggle(catalog, category, subcategory);
        next
    }

    pub fn is_category_selected(&self, category: &str) -> bool {
        self.categories.contains(category)
    }

    pub fn is_subcategory_selected(&self, subcategory: &str) -> bool {
        self.subcategories.contains(subcategory)
    }

    /// Selected category ids in sorted order.
    pub fn selected_categories(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(String::as_str)
    }

    /// Selected subcategory ids in sorted order.
    pub fn selected_subcategories(&self) -> impl Iterator<Item = &str> {
        self.subcategories.iter().map(String::as_str)
    }

    /// Display names of selected categories, in catalog order.
    pub fn selected_category_names(&self, catalog: &Catalog) -> Vec<String> {
        catalog
            .categories()
            .iter()
            .filter(|c| self.categories.contains(&c.id))
            .map(|c| c.name.clone())
            .collect()
    }

    pub fn category_count(&self) -> usize {
        self.categories.len()
    }

    pub fn subcategory_count(&self) -> usize {
        self.subcategories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty() && self.subcategories.is_empty()
    }

    pub fn clear(&mut self) {
        self.categories.clear();
        self.subcategories.clear();
    }

    /// Rebuild the selection through [`toggle`](Self::toggle), dropping ids
    /// the catalog does not know. Used on selections read from disk.
    pub fn sanitized(&self, catalog: &Catalog) -> Self {
        let mut clean = Self::new();
        for category in &self.categories {
            clean.toggle(catalog, category, None);
        }
        for sub in &self.subcategories {
            if let Some(owner) = catalog.owner_of(sub) {
                clean.toggle(catalog, &owner.id, Some(sub));
            }
        }
        if clean != *self {
            debug!("Dropped selections not backed by the catalog");
        }
        clean
    }

    /// Check the closure invariant against a catalog.
    pub fn is_consistent(&self, catalog: &Catalog) -> bool {
        self.categories.iter().all(|c| catalog.contains(c))
            && self.subcategories.iter().all(|sub| {
                catalog
                    .owner_of(sub)
                    .is_some_and(|owner| self.categories.contains(&owner.id))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids<'a>(it: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
        it.collect()
    }

    #[test]
    fn test_category_toggle_round_trip() {
        let catalog = Catalog::default();
        let mut selection = PreferenceSelection::new();

        selection.toggle(&catalog, "electronics", None);
        assert!(selection.is_category_selected("electronics"));
        assert_eq!(selection.subcategory_count(), 0);

        selection.toggle(&catalog, "electronics", None);
        assert!(selection.is_empty());
    }

    #[test]
    fn test_category_deselect_drops_children() {
        let catalog = Catalog::default();
        let mut selection = PreferenceSelection::new();

        selection.toggle(&catalog, "electronics", None);
        selection.toggle(&catalog, "electronics", Some("Gaming"));
        selection.toggle(&catalog, "electronics", Some("Audio"));
        selection.toggle(&catalog, "electronics", None);

        assert!(selection.is_empty());
    }

    #[test]
    fn test_subcategory_selects_parent() {
        let catalog = Catalog::default();
        let selection = PreferenceSelection::new().toggled(&catalog, "fashion", Some("Shoes"));

        assert_eq!(ids(selection.selected_categories()), vec!["fashion"]);
        assert_eq!(ids(selection.selected_subcategories()), vec!["Shoes"]);
    }

    #[test]
    fn test_last_subcategory_deselects_parent() {
        let catalog = Catalog::default();
        let mut selection = PreferenceSelection::new();

        selection.toggle(&catalog, "electronics", Some("Laptops"));
        selection.toggle(&catalog, "electronics", Some("TVs"));
        selection.toggle(&catalog, "electronics", Some("Laptops"));
        assert!(selection.is_category_selected("electronics"));

        selection.toggle(&catalog, "electronics", Some("TVs"));
        assert!(!selection.is_category_selected("electronics"));
    }

    #[test]
    fn test_invalid_references_are_ignored() {
        let catalog = Catalog::default();
        let mut selection = PreferenceSelection::new();
        selection.toggle(&catalog, "fashion", Some("Men"));
        let before = selection.clone();

        selection.toggle(&catalog, "groceries", None);
        selection.toggle(&catalog, "groceries", Some("Men"));
        // Laptops exists, but belongs to electronics
        selection.toggle(&catalog, "fashion", Some("Laptops"));
        selection.toggle(&catalog, "fashion", Some("Hats"));

        assert_eq!(selection, before);
    }

    #[test]
    fn test_selected_category_names_follow_catalog_order() {
        let catalog = Catalog::default();
        let mut selection = PreferenceSelection::new();
        selection.toggle(&catalog, "pets", None);
        selection.toggle(&catalog, "electronics", None);

        assert_eq!(
            selection.selected_category_names(&catalog),
            vec!["Electronics".to_string(), "Pet Supplies".to_string()]
        );
        assert!(selection.is_consistent(&catalog));
    }

    #[test]
    fn test_sanitized_restores_closure() {
        let catalog = Catalog::default();
        // Unknown category plus an orphaned subcategory, as a hand-edited file might hold
        let raw: PreferenceSelection =
            serde_json::from_str(r#"{"categories":["garden"],"subcategories":["Laptops"]}"#)
                .unwrap();
        assert!(!raw.is_consistent(&catalog));

        let clean = raw.sanitized(&catalog);
        assert!(clean.is_consistent(&catalog));
        assert_eq!(ids(clean.selected_categories()), vec!["electronics"]);
        assert_eq!(ids(clean.selected_subcategories()), vec!["Laptops"]);

        // Already consistent selections pass through unchanged
        assert_eq!(clean.sanitized(&catalog), clean);
    }
}
