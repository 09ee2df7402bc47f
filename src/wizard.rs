//! Preferences wizard steps
//!
//! The wizard progresses through these steps linearly. Navigation is simply
//! unavailable at the ends; there are no branches.
//!
//! # State Transitions
//!
//! ```text
//! Location -> Categories -> PriceRange -> Review -> Payment
//! ```

use strum::{Display, EnumIter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumIter)]
pub enum WizardStep {
    /// Country, region and city.
    #[default]
    #[strum(serialize = "Location")]
    Location,
    /// Category and subcategory checkboxes.
    #[strum(serialize = "Categories")]
    Categories,
    /// Price bounds and notification frequency.
    #[strum(serialize = "Price Range")]
    PriceRange,
    /// Read-only summary.
    #[strum(serialize = "Review")]
    Review,
    /// One-time fee.
    #[strum(serialize = "Payment")]
    Payment,
}

impl WizardStep {
    /// Total number of steps.
    pub const TOTAL_STEPS: usize = 5;

    /// Get the next step, or `None` on the last one.
    pub fn next(&self) -> Option<Self> {
        match self {
            Self::Location => Some(Self::Categories),
            Self::Categories => Some(Self::PriceRange),
            Self::PriceRange => Some(Self::Review),
            Self::Review => Some(Self::Payment),
            Self::Payment => None,
        }
    }

    /// Get the previous step, or `None` on the first one.
    pub fn previous(&self) -> Option<Self> {
        match self {
            Self::Location => None,
            Self::Categories => Some(Self::Location),
            Self::PriceRange => Some(Self::Categories),
            Self::Review => Some(Self::PriceRange),
            Self::Payment => Some(Self::Review),
        }
    }

    pub fn can_go_back(&self) -> bool {
        self.previous().is_some()
    }

    pub fn is_last(&self) -> bool {
        self.next().is_none()
    }

    /// Get the step number (1-indexed for display).
    pub fn step_number(&self) -> usize {
        match self {
            Self::Location => 1,
            Self::Categories => 2,
            Self::PriceRange => 3,
            Self::Review => 4,
            Self::Payment => 5,
        }
    }

    pub fn progress_percent(&self) -> u16 {
        (self.step_number() * 100 / Self::TOTAL_STEPS) as u16
    }

    /// "Step 2 of 5: Categories"
    pub fn caption(&self) -> String {
        format!(
            "Step {} of {}: {}",
            self.step_number(),
            Self::TOTAL_STEPS,
            self
        )
    }

    /// Label of the forward button.
    pub fn forward_label(&self) -> &'static str {
        if self.is_last() { "Complete Setup" } else { "Next" }
    }
}
