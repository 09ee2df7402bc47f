//! Tests for PreferenceSelection
//!
//! These tests verify the two-level closure rules against the built-in catalog:
//! - Cascade-down on category deselection
//! - Cascade-up when the last subcategory is removed
//! - Implicit parent selection
//! - Cross-category isolation
//! - Unknown ids are no-ops

use dealfinder::catalog::{Catalog, Category};
use dealfinder::selection::PreferenceSelection;

fn categories(selection: &PreferenceSelection) -> Vec<&str> {
    selection.selected_categories().collect()
}

fn subcategories(selection: &PreferenceSelection) -> Vec<&str> {
    selection.selected_subcategories().collect()
}

// =============================================================================
// Category Toggle Tests
// =============================================================================

#[test]
fn test_category_toggle_twice_returns_to_empty() {
    let catalog = Catalog::default();
    let mut selection = PreferenceSelection::new();

    selection.toggle(&catalog, "electronics", None);
    assert_eq!(categories(&selection), vec!["electronics"]);
    assert!(subcategories(&selection).is_empty());

    selection.toggle(&catalog, "electronics", Some("Laptops"));
    selection.toggle(&catalog, "electronics", None);
    assert!(selection.is_empty(), "subcategories selected in between are dropped");
}

#[test]
fn test_selecting_category_does_not_select_children() {
    let catalog = Catalog::default();
    let mut selection = PreferenceSelection::new();
    selection.toggle(&catalog, "pets", None);
    assert_eq!(selection.subcategory_count(), 0);
}

// =============================================================================
// Subcategory Toggle Tests
// =============================================================================

#[test]
fn test_implicit_parent() {
    let catalog = Catalog::default();
    let mut selection = PreferenceSelection::new();
    selection.toggle(&catalog, "fashion", Some("Shoes"));
    assert_eq!(categories(&selection), vec!["fashion"]);
    assert_eq!(subcategories(&selection), vec!["Shoes"]);
}

#[test]
fn test_cascade_up_removal() {
    let catalog = Catalog::default();
    let mut selection = PreferenceSelection::new();

    selection.toggle(&catalog, "electronics", Some("Laptops"));
    selection.toggle(&catalog, "electronics", Some("TVs"));
    assert!(selection.is_category_selected("electronics"));

    selection.toggle(&catalog, "electronics", Some("Laptops"));
    assert!(selection.is_category_selected("electronics"), "TVs still selected");

    selection.toggle(&catalog, "electronics", Some("TVs"));
    assert!(!selection.is_category_selected("electronics"));
    assert!(selection.is_empty());
}

#[test]
fn test_directly_selected_category_is_dropped_with_last_subcategory() {
    let catalog = Catalog::default();
    let mut selection = PreferenceSelection::new();

    selection.toggle(&catalog, "books", None);
    selection.toggle(&catalog, "books", Some("Fiction"));
    selection.toggle(&catalog, "books", Some("Fiction"));
    assert!(!selection.is_category_selected("books"));
}

#[test]
fn test_cross_category_isolation() {
    let catalog = Catalog::default();
    let mut selection = PreferenceSelection::new();

    selection.toggle(&catalog, "electronics", Some("Audio"));
    selection.toggle(&catalog, "home", Some("Kitchen"));
    selection.toggle(&catalog, "home", None);

    assert_eq!(categories(&selection), vec!["electronics"]);
    assert_eq!(subcategories(&selection), vec!["Audio"]);
}

// =============================================================================
// Invalid Reference Tests
// =============================================================================

#[test]
fn test_unknown_ids_are_noops() {
    let catalog = Catalog::default();
    let mut selection = PreferenceSelection::new();
    selection.toggle(&catalog, "fashion", Some("Men"));
    let before = selection.clone();

    selection.toggle(&catalog, "garden", None);
    selection.toggle(&catalog, "garden", Some("Men"));
    selection.toggle(&catalog, "fashion", Some("Laptops"));
    selection.toggle(&catalog, "fashion", Some("Unicorns"));

    assert_eq!(selection, before);
}

#[test]
fn test_toggled_leaves_original_untouched() {
    let catalog = Catalog::default();
    let selection = PreferenceSelection::new();
    let next = selection.toggled(&catalog, "toys", Some("Board Games"));
    assert!(selection.is_empty());
    assert!(next.is_category_selected("toys"));
}

// =============================================================================
// Catalog Tests
// =============================================================================

#[test]
fn test_default_catalog_is_consistent() {
    let catalog = Catalog::default();
    assert_eq!(catalog.len(), 9);
    for category in catalog.categories() {
        for sub in &category.subcategories {
            assert_eq!(catalog.owner_of(sub).map(|c| c.id.as_str()), Some(category.id.as_str()));
        }
    }
}

#[test]
fn test_catalog_rejects_shared_subcategory() {
    let result = Catalog::new(vec![
        Category::new("auto", "Automotive", &["Accessories"]),
        Category::new("fashion", "Fashion", &["Accessories"]),
    ]);
    assert!(result.is_err());
}

#[test]
fn test_catalog_rejects_duplicate_ids() {
    let result = Catalog::new(vec![
        Category::new("pets", "Pets", &["Dog"]),
        Category::new("pets", "More Pets", &["Cat"]),
    ]);
    assert!(result.is_err());
}

#[test]
fn test_catalog_from_json() {
    let catalog = Catalog::from_json(
        r#"[{"id": "garden", "name": "Garden", "subCategoryIds": ["Plants", "Tools"]}]"#,
    )
    .unwrap();
    let mut selection = PreferenceSelection::new();
    selection.toggle(&catalog, "garden", Some("Plants"));
    assert!(selection.is_consistent(&catalog));
    assert_eq!(selection.selected_category_names(&catalog), vec!["Garden"]);
}
