//! Application state definitions
//!
//! Contains all state-related types for the application: AppState, AppMode,
//! the effects key handling asks the event loop to run, and the messages
//! worker threads send back.

use std::path::{Path, PathBuf};

use strum::{Display, EnumIter};
use tracing::{info, warn};

use crate::admin::{AdminGate, Customer, DashboardData, Payment};
use crate::api::DealQuery;
use crate::catalog::Catalog;
use crate::config::AppConfig;
use crate::deals::{Deal, DealBoard};
use crate::error::DealFinderError;
use crate::input::TextInput;
use crate::payment::{BillingDetails, PaymentFlow, PaymentRequest};
use crate::preferences::{PreferenceSubmission, Preferences};
use crate::wizard::WizardStep;

/// Application operating modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AppMode {
    /// Marketing page - entry point
    Landing,
    /// Preferences wizard
    Preferences,
    /// Deals dashboard
    Dashboard,
    /// Admin password prompt
    AdminLogin,
    /// Admin dashboard
    Admin,
}

/// Entries of the landing page menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
pub enum LandingAction {
    #[strum(serialize = "Get Started")]
    GetStarted,
    #[strum(serialize = "Browse Deals")]
    BrowseDeals,
    #[strum(serialize = "Admin Dashboard")]
    Admin,
    #[strum(serialize = "Quit")]
    Quit,
}

/// Fields of the location step, top to bottom
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
pub enum LocationField {
    Country,
    Region,
    City,
}

/// Fields of the price step, top to bottom
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
pub enum PriceField {
    #[strum(serialize = "Minimum price")]
    Min,
    #[strum(serialize = "Maximum price")]
    Max,
    #[strum(serialize = "Notifications")]
    Notifications,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumIter)]
pub enum AdminTab {
    #[default]
    Overview,
    Customers,
    Revenue,
}

/// Row of the category checklist: a category, or one of its subcategories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRow {
    pub category: String,
    pub subcategory: Option<String>,
}

/// Admin data fetched in one round trip.
#[derive(Debug, Clone)]
pub struct AdminSnapshot {
    pub dashboard: DashboardData,
    pub customers: Vec<Customer>,
    pub revenue: Vec<Payment>,
}

/// Work the event loop runs on behalf of key handling.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// `GET /deals`
    LoadDeals(DealQuery),
    /// `POST /deals/filter`
    SubmitPreferences(PreferenceSubmission),
    /// `POST /deals/refresh`, then reload
    RefreshDeals,
    /// Write preferences to the configured file
    SavePreferences(PathBuf),
    /// Create and confirm the setup fee payment
    Checkout {
        request: PaymentRequest,
        payment_method: String,
        billing: BillingDetails,
    },
    /// Fetch admin dashboard, customers and revenue
    LoadAdmin,
    Quit,
}

/// Messages sent from worker threads to the main UI thread
#[derive(Debug)]
pub enum ApiMessage {
    DealsLoaded(Result<Vec<Deal>, DealFinderError>),
    DealsRefreshed(Result<String, DealFinderError>),
    PaymentFinished(Result<(), DealFinderError>),
    AdminLoaded(Result<AdminSnapshot, DealFinderError>),
}

/// Main application state
#[derive(Debug, Clone)]
pub struct AppState {
    /// Current application mode
    pub mode: AppMode,
    /// Whether help overlay is visible
    pub help_visible: bool,
    /// Status message for user feedback
    pub status_message: String,
    /// A request is in flight
    pub loading: bool,

    pub catalog: Catalog,
    /// Signed-in email, if any
    pub identity: Option<String>,
    pub display_name: String,

    pub landing_selection: usize,

    pub wizard_step: WizardStep,
    pub preferences: Preferences,
    pub location_field: usize,
    pub category_cursor: usize,
    pub price_field: usize,
    pub payment_input: TextInput,
    pub payment: PaymentFlow,
    pub payment_request: PaymentRequest,
    pub preferences_file: Option<PathBuf>,

    pub board: DealBoard,
    /// 0 is "All Deals", then one tab per catalog category
    pub deal_tab: usize,
    pub deal_cursor: usize,
    pub search: TextInput,
    pub search_focused: bool,
    pub show_report: bool,

    pub gate: AdminGate,
    pub password_input: TextInput,
    pub admin_error: Option<String>,
    pub admin: Option<AdminSnapshot>,
    pub admin_tab: AdminTab,
}

impl AppState {
    pub fn new(config: &AppConfig, catalog: Catalog) -> Self {
        let preferences = Self::restore_preferences(config.preferences_file.as_deref(), &catalog);
        Self {
            mode: AppMode::Landing,
            help_visible: false,
            status_message: "Welcome to DealFinder AI".to_string(),
            loading: false,
            catalog,
            identity: config.identity().map(str::to_string),
            display_name: config.display_name().to_string(),
            landing_selection: 0,
            wizard_step: WizardStep::default(),
            preferences,
            location_field: 0,
            category_cursor: 0,
            price_field: 0,
            payment_input: TextInput::masked("Payment method token (e.g. tok_visa)"),
            payment: PaymentFlow::default(),
            payment_request: config.payment_request(),
            preferences_file: config.preferences_file.clone(),
            board: DealBoard::default(),
            deal_tab: 0,
            deal_cursor: 0,
            search: TextInput::new("Search deals..."),
            search_focused: false,
            show_report: false,
            gate: AdminGate::new(
                config.superadmin_emails.clone(),
                config.superadmin_password.clone(),
            ),
            password_input: TextInput::masked("Enter admin password"),
            admin_error: None,
            admin: None,
            admin_tab: AdminTab::default(),
        }
    }

    /// Previously saved preferences, or the defaults when there are none.
    /// A file that fails to parse is logged and ignored.
    fn restore_preferences(path: Option<&Path>, catalog: &Catalog) -> Preferences {
        let Some(path) = path.filter(|p| p.exists()) else {
            return Preferences::default();
        };
        match Preferences::load_from_file(path, catalog) {
            Ok(preferences) => {
                info!("Restored preferences from {}", path.display());
                preferences
            }
            Err(e) => {
                warn!("Ignoring preferences file {}: {e:#}", path.display());
                Preferences::default()
            }
        }
    }

    /// Category checklist rows in display order.
    pub fn category_rows(&self) -> Vec<CategoryRow> {
        let mut rows = Vec::new();
        for category in self.catalog.categories() {
            rows.push(CategoryRow {
                category: category.id.clone(),
                subcategory: None,
            });
            for sub in &category.subcategories {
                rows.push(CategoryRow {
                    category: category.id.clone(),
                    subcategory: Some(sub.clone()),
                });
            }
        }
        rows
    }

    /// Category id of the active dashboard tab, `None` for "All Deals".
    pub fn active_category(&self) -> Option<&str> {
        match self.deal_tab {
            0 => None,
            n => self.catalog.categories().get(n - 1).map(|c| c.id.as_str()),
        }
    }

    /// Deal under the dashboard cursor.
    pub fn selected_deal(&self) -> Option<&Deal> {
        self.board.filtered().get(self.deal_cursor).copied()
    }

    /// True while a text field swallows ordinary keys.
    pub fn text_input_active(&self) -> bool {
        match self.mode {
            AppMode::Dashboard => self.search_focused,
            AppMode::AdminLogin => true,
            AppMode::Preferences => self.wizard_step == WizardStep::Payment,
            _ => false,
        }
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = message.into();
    }
}
