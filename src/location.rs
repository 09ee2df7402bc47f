//! Geographic reference data and the wizard's location choice.
//!
//! Country -> region -> city. Picking a country clears the region and city,
//! picking a region clears the city.

use serde::{Deserialize, Serialize};
use strum::Display;

/// What a country's first-level division is called.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum DivisionKind {
    State,
    Region,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub code: &'static str,
    pub name: &'static str,
    pub cities: &'static [&'static str],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Country {
    pub code: &'static str,
    pub name: &'static str,
    pub division: DivisionKind,
    pub regions: &'static [Region],
}

impl Country {
    pub fn region(&self, code: &str) -> Option<&'static Region> {
        self.regions.iter().find(|r| r.code == code)
    }
}

/// Supported countries, in display order.
pub static COUNTRIES: &[Country] = &[
    Country {
        code: "us",
        name: "United States",
        division: DivisionKind::State,
        regions: &[
            Region {
                code: "ny",
                name: "New York",
                cities: &["New York City", "Buffalo", "Albany"],
            },
            Region {
                code: "ca",
                name: "California",
                cities: &["Los Angeles", "San Francisco", "San Diego"],
            },
            Region {
                code: "tx",
                name: "Texas",
                cities: &["Houston", "Austin", "Dallas"],
            },
        ],
    },
    Country {
        code: "uk",
        name: "United Kingdom",
        division: DivisionKind::Region,
        regions: &[
            Region {
                code: "eng",
                name: "England",
                cities: &["London", "Manchester", "Birmingham"],
            },
            Region {
                code: "sct",
                name: "Scotland",
                cities: &["Edinburgh", "Glasgow", "Aberdeen"],
            },
            Region {
                code: "wls",
                name: "Wales",
                cities: &["Cardiff", "Swansea", "Newport"],
            },
        ],
    },
];

pub fn country(code: &str) -> Option<&'static Country> {
    COUNTRIES.iter().find(|c| c.code == code)
}

/// The user's location as chosen in the wizard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationChoice {
    pub country: Option<String>,
    pub region: Option<String>,
    pub city: Option<String>,
}

impl LocationChoice {
    /// Re-apply each field through the setters, dropping unknown values.
    pub fn sanitized(&self) -> Self {
        let mut clean = Self::default();
        if let Some(code) = &self.country {
            clean.set_country(code);
        }
        if let Some(code) = &self.region {
            clean.set_region(code);
        }
        if let Some(name) = &self.city {
            clean.set_city(name);
        }
        clean
    }

    /// Pick a country. Resets region and city. Unknown codes are ignored.
    pub fn set_country(&mut self, code: &str) -> bool {
        if country(code).is_none() {
            return false;
        }
        self.country = Some(code.to_string());
        self.region = None;
        self.city = None;
        true
    }

    /// Pick a region of the current country. Resets the city.
    pub fn set_region(&mut self, code: &str) -> bool {
        let Some(country) = self.country() else {
            return false;
        };
        if country.region(code).is_none() {
            return false;
        }
        self.region = Some(code.to_string());
        self.city = None;
        true
    }

    /// Pick a city of the current region.
    pub fn set_city(&mut self, name: &str) -> bool {
        let Some(region) = self.region() else {
            return false;
        };
        if !region.cities.contains(&name) {
            return false;
        }
        self.city = Some(name.to_string());
        true
    }

    pub fn country(&self) -> Option<&'static Country> {
        self.country.as_deref().and_then(country)
    }

    pub fn region(&self) -> Option<&'static Region> {
        let country = self.country()?;
        self.region.as_deref().and_then(|code| country.region(code))
    }

    /// Label for the region picker ("State" or "Region").
    pub fn division_label(&self) -> Option<String> {
        self.country().map(|c| c.division.to_string())
    }

    pub fn is_complete(&self) -> bool {
        self.city.is_some()
    }

    /// "United States, Austin" style summary for the review step.
    pub fn summary(&self) -> String {
        let country = self.country().map(|c| c.name).unwrap_or_default();
        let city = self.city.as_deref().unwrap_or_default();
        format!("{}, {}", country, city)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_country_change_resets_region_and_city() {
        let mut location = LocationChoice::default();
        assert!(location.set_country("us"));
        assert!(location.set_region("tx"));
        assert!(location.set_city("Austin"));
        assert!(location.is_complete());

        assert!(location.set_country("uk"));
        assert_eq!(location.region, None);
        assert_eq!(location.city, None);
    }

    #[test]
    fn test_region_change_resets_city() {
        let mut location = LocationChoice::default();
        location.set_country("uk");
        location.set_region("eng");
        location.set_city("London");

        location.set_region("sct");
        assert_eq!(location.region.as_deref(), Some("sct"));
        assert_eq!(location.city, None);
    }

    #[test]
    fn test_rejects_values_outside_current_scope() {
        let mut location = LocationChoice::default();
        assert!(!location.set_region("ny"));
        assert!(!location.set_country("fr"));

        location.set_country("us");
        assert!(!location.set_region("eng"));
        location.set_region("ny");
        assert!(!location.set_city("London"));
        assert_eq!(location.city, None);
    }

    #[test]
    fn test_division_label_and_summary() {
        let mut location = LocationChoice::default();
        assert_eq!(location.division_label(), None);

        location.set_country("us");
        assert_eq!(location.division_label().as_deref(), Some("State"));
        location.set_region("ca");
        location.set_city("San Diego");
        assert_eq!(location.summary(), "United States, San Diego");

        location.set_country("uk");
        assert_eq!(location.division_label().as_deref(), Some("Region"));
    }
}
