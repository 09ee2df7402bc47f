//! Deal category catalog
//!
//! The catalog is fixed for the lifetime of a session and supplied from static
//! configuration. Construction validates the ownership rules the preference
//! selection relies on: unique category ids, and every subcategory owned by
//! exactly one category.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::{DealFinderError, Result};

/// A top-level deal classification (e.g. "Electronics").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    /// Leaf subcategory ids, in display order.
    #[serde(rename = "subCategoryIds", alias = "sub_category_ids")]
    pub subcategories: Vec<String>,
}

impl Category {
    pub fn new(id: &str, name: &str, subcategories: &[&str]) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            subcategories: subcategories.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Whether this category owns the given subcategory id.
    pub fn owns(&self, subcategory: &str) -> bool {
        self.subcategories.iter().any(|s| s == subcategory)
    }
}

/// Validated, ordered set of categories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    categories: Vec<Category>,
    /// Subcategory id -> index of the owning category.
    owners: HashMap<String, usize>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate ids and shared subcategories.
    pub fn new(categories: Vec<Category>) -> Result<Self> {
        let mut owners = HashMap::new();

        for (index, category) in categories.iter().enumerate() {
            if category.id.trim().is_empty() {
                return Err(DealFinderError::catalog("category id must not be empty"));
            }
            if categories[..index].iter().any(|c| c.id == category.id) {
                return Err(DealFinderError::catalog(format!(
                    "duplicate category id '{}'",
                    category.id
                )));
            }
            for sub in &category.subcategories {
                if let Some(&other) = owners.get(sub) {
                    let other: &Category = &categories[other];
                    return Err(DealFinderError::catalog(format!(
                        "subcategory '{}' is owned by both '{}' and '{}'",
                        sub, other.id, category.id
                    )));
                }
                owners.insert(sub.clone(), index);
            }
        }

        Ok(Self { categories, owners })
    }

    /// Load a catalog from a JSON array of `{id, name, subCategoryIds}` records.
    pub fn from_json(json: &str) -> Result<Self> {
        let categories: Vec<Category> = serde_json::from_str(json)?;
        Self::new(categories)
    }

    /// Categories in display order.
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Category that owns a subcategory, if any.
    pub fn owner_of(&self, subcategory: &str) -> Option<&Category> {
        self.owners
            .get(subcategory)
            .map(|&index| &self.categories[index])
    }

    /// Display name for a category id, falling back to the id itself.
    pub fn display_name<'a>(&'a self, id: &'a str) -> &'a str {
        self.get(id).map(|c| c.name.as_str()).unwrap_or(id)
    }
}

impl Default for Catalog {
    /// The built-in DealFinder catalog.
    ///
    /// Automotive's accessories and electronics carry a "Car" prefix so no
    /// subcategory name is shared between two categories.
    fn default() -> Self {
        let categories = vec![
            Category::new(
                "electronics",
                "Electronics",
                &["Laptops", "Smartphones", "TVs", "Gaming", "Audio"],
            ),
            Category::new(
                "fashion",
                "Fashion",
                &["Men", "Women", "Kids", "Shoes", "Accessories"],
            ),
            Category::new(
                "home",
                "Home & Living",
                &["Furniture", "Appliances", "Kitchen", "Decor"],
            ),
            Category::new(
                "beauty",
                "Beauty",
                &["Skincare", "Makeup", "Haircare", "Fragrance"],
            ),
            Category::new(
                "sports",
                "Sports & Outdoors",
                &["Exercise", "Outdoor", "Sports Equipment"],
            ),
            Category::new(
                "toys",
                "Toys & Games",
                &["Board Games", "Video Games", "Educational", "Action Figures"],
            ),
            Category::new(
                "books",
                "Books & Media",
                &["Fiction", "Non-Fiction", "Digital", "Audiobooks"],
            ),
            Category::new(
                "auto",
                "Automotive",
                &["Parts", "Car Accessories", "Tools", "Car Electronics"],
            ),
            Category::new("pets", "Pet Supplies", &["Dog", "Cat", "Fish", "Small Pets"]),
        ];

        let mut owners = HashMap::new();
        for (index, category) in categories.iter().enumerate() {
            for sub in &category.subcategories {
                owners.insert(sub.clone(), index);
            }
        }
        Self { categories, owners }
    }
}
