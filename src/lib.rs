//! DealFinder Library
//!
//! This library provides the core functionality for DealFinder: the category
//! selection model, the preferences wizard, deals, payments, the admin area,
//! the backend client and the terminal UI.

pub mod admin;
pub mod api;
pub mod app;
pub mod catalog;
pub mod cli;
pub mod components;
pub mod config;
pub mod deals;
pub mod error;
pub mod input;
pub mod location;
pub mod payment;
pub mod preferences;
pub mod selection;
pub mod theme;
pub mod types;
pub mod ui;
pub mod wizard;

// Re-export main types for convenience
pub use admin::{AccessState, AdminGate, RevenueRange};
pub use api::{ApiClient, DealQuery, DealSource, FileDealSource};
pub use catalog::{Catalog, Category};
pub use config::AppConfig;
pub use deals::{Deal, DealBoard, DealFilter, DealReport, RecommendationCriteria};
pub use error::DealFinderError;
pub use location::LocationChoice;
pub use payment::{PaymentFlow, PaymentGateway, PaymentRequest, PaymentStatus};
pub use preferences::{PreferenceSubmission, Preferences, PriceRange};
pub use selection::PreferenceSelection;
pub use types::{Currency, NotificationLevel, QualityTier};
pub use wizard::WizardStep;
