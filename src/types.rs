//! Type-safe value sets for DealFinder
//!
//! Closed sets of values use enums with strum derives instead of strings, so
//! parsing and display stay in one place.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Payment currency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Currency {
    #[default]
    Usd,
    Eur,
}

impl Currency {
    /// Pick a currency from a locale string such as `de-DE` or `en_US`.
    ///
    /// EUR when the locale mentions EU, DE or FR; USD otherwise.
    pub fn from_locale(locale: &str) -> Self {
        if ["EU", "DE", "FR"].iter().any(|tag| locale.contains(tag)) {
            Self::Eur
        } else {
            Self::Usd
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Usd => "$",
            Self::Eur => "€",
        }
    }

    /// Lowercase ISO code as the processor expects it.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Usd => "usd",
            Self::Eur => "eur",
        }
    }
}

/// How often the user wants deal notifications, derived from a 0-100 slider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum NotificationLevel {
    Disabled,
    Critical,
    Moderate,
    All,
}

impl NotificationLevel {
    pub fn from_slider(value: u8) -> Self {
        match value {
            0 => Self::Disabled,
            1..=32 => Self::Critical,
            33..=65 => Self::Moderate,
            _ => Self::All,
        }
    }

    /// Explanation shown next to the slider.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Disabled => "Notifications disabled",
            Self::Critical => "Receive only critical deal alerts",
            Self::Moderate => "Receive moderate deal updates",
            Self::All => "Receive all deal notifications",
        }
    }

    /// Short label for the review step.
    pub fn review_label(&self) -> &'static str {
        match self {
            Self::Disabled => "Disabled",
            Self::Critical => "Critical alerts only",
            Self::Moderate => "Moderate updates",
            Self::All => "All notifications",
        }
    }
}

/// Deal quality bucket from a 0-100 quality score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum QualityTier {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl QualityTier {
    pub fn from_score(score: u8) -> Self {
        match score {
            90..=u8::MAX => Self::Excellent,
            70..=89 => Self::Good,
            50..=69 => Self::Fair,
            _ => Self::Poor,
        }
    }
}
