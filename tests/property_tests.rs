//! Property-Based Tests for DealFinder
//!
//! Uses proptest for testing invariants and edge cases
//!
//! These tests verify:
//! - The selection closure invariant under arbitrary toggle sequences
//! - Agreement with a straightforward reference model
//! - Enum string round-trips
//! - Price range and notification slider bounds

use std::collections::BTreeSet;

use proptest::prelude::*;

use dealfinder::catalog::Catalog;
use dealfinder::preferences::{PriceRange, PRICE_MAX};
use dealfinder::selection::PreferenceSelection;
use dealfinder::types::{Currency, NotificationLevel, QualityTier};

// =============================================================================
// Selection Property Tests
// =============================================================================

/// A toggle, including references that do not resolve.
#[derive(Debug, Clone)]
struct Toggle {
    category: String,
    subcategory: Option<String>,
}

fn toggle_strategy() -> impl Strategy<Value = Toggle> {
    let catalog = Catalog::default();
    let ids: Vec<String> = catalog
        .categories()
        .iter()
        .map(|c| c.id.clone())
        .chain(["garden".to_string()])
        .collect();
    let subs: Vec<String> = catalog
        .categories()
        .iter()
        .flat_map(|c| c.subcategories.clone())
        .chain(["Unicorns".to_string()])
        .collect();

    (
        prop::sample::select(ids),
        prop::option::of(prop::sample::select(subs)),
    )
        .prop_map(|(category, subcategory)| Toggle {
            category,
            subcategory,
        })
}

/// Reference model: direct category toggles plus subcategory set.
#[derive(Default)]
struct Model {
    categories: BTreeSet<String>,
    subcategories: BTreeSet<String>,
}

impl Model {
    fn apply(&mut self, catalog: &Catalog, toggle: &Toggle) {
        let Some(owner) = catalog.get(&toggle.category) else {
            return;
        };
        match &toggle.subcategory {
            None => {
                if self.categories.contains(&owner.id) {
                    self.categories.remove(&owner.id);
                    for sub in &owner.subcategories {
                        self.subcategories.remove(sub);
                    }
                } else {
                    self.categories.insert(owner.id.clone());
                }
            }
            Some(sub) if owner.subcategories.contains(sub) => {
                if self.subcategories.contains(sub) {
                    self.subcategories.remove(sub);
                    if !owner.subcategories.iter().any(|s| self.subcategories.contains(s)) {
                        self.categories.remove(&owner.id);
                    }
                } else {
                    self.subcategories.insert(sub.clone());
                    self.categories.insert(owner.id.clone());
                }
            }
            Some(_) => {}
        }
    }
}

proptest! {
    /// Every selected subcategory's owner stays selected
    #[test]
    fn selection_stays_consistent(toggles in prop::collection::vec(toggle_strategy(), 0..60)) {
        let catalog = Catalog::default();
        let mut selection = PreferenceSelection::new();
        for t in &toggles {
            selection.toggle(&catalog, &t.category, t.subcategory.as_deref());
            prop_assert!(selection.is_consistent(&catalog));
        }
    }

    /// The selection matches the reference model after any sequence
    #[test]
    fn selection_matches_model(toggles in prop::collection::vec(toggle_strategy(), 0..60)) {
        let catalog = Catalog::default();
        let mut selection = PreferenceSelection::new();
        let mut model = Model::default();
        for t in &toggles {
            selection.toggle(&catalog, &t.category, t.subcategory.as_deref());
            model.apply(&catalog, t);
        }
        let categories: BTreeSet<String> = selection.selected_categories().map(str::to_string).collect();
        let subcategories: BTreeSet<String> = selection.selected_subcategories().map(str::to_string).collect();
        prop_assert_eq!(categories, model.categories);
        prop_assert_eq!(subcategories, model.subcategories);
    }

    /// Toggling the same category twice undoes a pure category toggle
    #[test]
    fn category_toggle_is_involution(index in 0usize..9) {
        let catalog = Catalog::default();
        let id = catalog.categories()[index].id.clone();
        let selection = PreferenceSelection::new()
            .toggled(&catalog, &id, None)
            .toggled(&catalog, &id, None);
        prop_assert!(selection.is_empty());
    }
}

// =============================================================================
// Enum Property Tests
// =============================================================================

fn currency_strategy() -> impl Strategy<Value = Currency> {
    prop_oneof![Just(Currency::Usd), Just(Currency::Eur)]
}

proptest! {
    /// Currency: to_string → parse round-trip is identity
    #[test]
    fn currency_roundtrip(currency in currency_strategy()) {
        let parsed: Currency = currency.to_string().parse().expect("Should parse");
        prop_assert_eq!(currency, parsed);
    }

    /// Notification classification is monotonic in the slider value
    #[test]
    fn notification_level_monotonic(a in 0u8..=100, b in 0u8..=100) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let rank = |level: NotificationLevel| match level {
            NotificationLevel::Disabled => 0,
            NotificationLevel::Critical => 1,
            NotificationLevel::Moderate => 2,
            NotificationLevel::All => 3,
        };
        prop_assert!(rank(NotificationLevel::from_slider(lo)) <= rank(NotificationLevel::from_slider(hi)));
    }

    /// Quality tiers follow the 90/70/50 thresholds
    #[test]
    fn quality_tier_thresholds(score in 0u8..=100) {
        let tier = QualityTier::from_score(score);
        let expected = match score {
            90..=100 => QualityTier::Excellent,
            70..=89 => QualityTier::Good,
            50..=69 => QualityTier::Fair,
            _ => QualityTier::Poor,
        };
        prop_assert_eq!(tier, expected);
    }
}

// =============================================================================
// Price Range Property Tests
// =============================================================================

proptest! {
    /// Any sequence of shifts keeps min <= max within bounds
    #[test]
    fn price_range_stays_ordered(
        a in 0u32..2000,
        b in 0u32..2000,
        shifts in prop::collection::vec((any::<bool>(), -20i32..20), 0..30),
    ) {
        let mut range = PriceRange::new(a, b);
        for (lower, steps) in shifts {
            if lower {
                range.shift_min(steps);
            } else {
                range.shift_max(steps);
            }
            prop_assert!(range.min() <= range.max());
            prop_assert!(range.max() <= PRICE_MAX);
        }
    }
}
