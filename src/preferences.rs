//! Preferences collected by the wizard, and their submission form.
//!
//! This module owns the form data behind each wizard step. Saving and loading
//! use JSON files, mirroring how submissions are sent to the backend.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::catalog::Catalog;
use crate::location::LocationChoice;
use crate::selection::PreferenceSelection;
use crate::types::NotificationLevel;

/// Lowest selectable price
pub const PRICE_MIN: u32 = 0;
/// Highest selectable price
pub const PRICE_MAX: u32 = 1000;
/// Price slider granularity
pub const PRICE_STEP: u32 = 10;
/// Default notification slider position
pub const DEFAULT_NOTIFICATION_LEVEL: u8 = 50;

/// Inclusive price range with `min <= max`, both within the slider bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "[u32; 2]", from = "[u32; 2]")]
pub struct PriceRange {
    min: u32,
    max: u32,
}

impl Default for PriceRange {
    fn default() -> Self {
        Self {
            min: PRICE_MIN,
            max: PRICE_MAX,
        }
    }
}

impl PriceRange {
    /// Build a range, clamping into bounds and ordering the ends.
    pub fn new(a: u32, b: u32) -> Self {
        let a = a.min(PRICE_MAX);
        let b = b.min(PRICE_MAX);
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    pub fn min(&self) -> u32 {
        self.min
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    /// Move the lower bound by whole steps; it never passes the upper bound.
    pub fn shift_min(&mut self, steps: i32) {
        self.min = shift(self.min, steps).min(self.max);
    }

    /// Move the upper bound by whole steps; it never drops below the lower bound.
    pub fn shift_max(&mut self, steps: i32) {
        self.max = shift(self.max, steps).max(self.min);
    }

    pub fn contains(&self, price: f64) -> bool {
        price >= self.min as f64 && price <= self.max as f64
    }

    pub fn label(&self) -> String {
        format!("${} - ${}", self.min, self.max)
    }
}

fn shift(value: u32, steps: i32) -> u32 {
    let delta = steps.saturating_mul(PRICE_STEP as i32);
    let moved = (value as i64 + delta as i64).clamp(PRICE_MIN as i64, PRICE_MAX as i64);
    moved as u32
}

impl From<[u32; 2]> for PriceRange {
    fn from(value: [u32; 2]) -> Self {
        Self::new(value[0], value[1])
    }
}

impl From<PriceRange> for [u32; 2] {
    fn from(value: PriceRange) -> Self {
        [value.min, value.max]
    }
}

/// Everything the wizard collects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub location: LocationChoice,
    pub selection: PreferenceSelection,
    pub price_range: PriceRange,
    /// Notification slider, 0-100.
    pub notification_level: u8,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            location: LocationChoice::default(),
            selection: PreferenceSelection::default(),
            price_range: PriceRange::default(),
            notification_level: DEFAULT_NOTIFICATION_LEVEL,
        }
    }
}

impl Preferences {
    pub fn notification(&self) -> NotificationLevel {
        NotificationLevel::from_slider(self.notification_level)
    }

    /// Move the notification slider, clamped to 0-100.
    pub fn adjust_notification(&mut self, delta: i16) {
        let value = (self.notification_level as i16 + delta).clamp(0, 100);
        self.notification_level = value as u8;
    }

    /// Human-readable lines for the review step.
    pub fn review_lines(&self, catalog: &Catalog) -> Vec<(String, String)> {
        vec![
            ("Location".to_string(), self.location.summary()),
            (
                "Categories".to_string(),
                self.selection.selected_category_names(catalog).join(", "),
            ),
            ("Price Range".to_string(), self.price_range.label()),
            (
                "Notification Level".to_string(),
                self.notification().review_label().to_string(),
            ),
        ]
    }

    /// Payload for `POST /deals/filter`.
    pub fn to_submission(&self) -> PreferenceSubmission {
        PreferenceSubmission {
            country: self.location.country.clone().unwrap_or_default(),
            region: self.location.region.clone().unwrap_or_default(),
            city: self.location.city.clone().unwrap_or_default(),
            categories: self
                .selection
                .selected_categories()
                .map(str::to_string)
                .collect(),
            subcategories: self
                .selection
                .selected_subcategories()
                .map(str::to_string)
                .collect(),
            price_range: self.price_range,
            notification_level: self.notification_level,
        }
    }

    /// Save preferences to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json =
            serde_json::to_string_pretty(self).context("Failed to serialize preferences to JSON")?;

        fs::write(&path, json)
            .with_context(|| format!("Failed to write preferences to {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Load preferences from a JSON file.
    ///
    /// The file is not trusted: the selection is rebuilt against `catalog`
    /// and the location against the reference data. Sliders are clamped.
    pub fn load_from_file<P: AsRef<Path>>(path: P, catalog: &Catalog) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read preferences from {:?}", path.as_ref()))?;

        let raw: Self =
            serde_json::from_str(&content).context("Failed to parse preferences JSON")?;

        Ok(Self {
            location: raw.location.sanitized(),
            selection: raw.selection.sanitized(catalog),
            price_range: raw.price_range,
            notification_level: raw.notification_level.min(100),
        })
    }
}

/// Final selection as the backend receives it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreferenceSubmission {
    pub country: String,
    pub region: String,
    pub city: String,
    pub categories: Vec<String>,
    #[serde(rename = "subCategories")]
    pub subcategories: Vec<String>,
    #[serde(rename = "priceRange")]
    pub price_range: PriceRange,
    #[serde(rename = "notificationLevel")]
    pub notification_level: u8,
}
