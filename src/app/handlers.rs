//! Key handling and worker results
//!
//! Everything here mutates `AppState` synchronously and returns the effects
//! the event loop should run. No I/O happens in this module.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use strum::IntoEnumIterator;
use tracing::{debug, info, warn};

use super::state::{
    AdminTab, ApiMessage, AppMode, AppState, Effect, LandingAction, LocationField, PriceField,
};
use crate::admin::{AccessState, SIGN_IN_REQUIRED};
use crate::api::DealQuery;
use crate::error::DealFinderError;
use crate::input::InputResult;
use crate::location::COUNTRIES;
use crate::payment::BillingDetails;
use crate::wizard::WizardStep;

/// Notification slider change per key press.
const NOTIFICATION_STEP: i16 = 5;

impl AppState {
    /// Handle one key press.
    pub fn handle_key(&mut self, key: KeyEvent) -> Vec<Effect> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return vec![Effect::Quit];
        }

        // Help overlay - ? or Esc dismisses it
        if self.help_visible {
            if matches!(key.code, KeyCode::Char('?') | KeyCode::Esc) {
                self.help_visible = false;
            }
            return Vec::new();
        }

        if !self.text_input_active() {
            match key.code {
                KeyCode::Char('?') => {
                    self.help_visible = true;
                    return Vec::new();
                }
                KeyCode::Char('q') => return vec![Effect::Quit],
                _ => {}
            }
        }

        match self.mode {
            AppMode::Landing => self.handle_landing_key(key),
            AppMode::Preferences => self.handle_wizard_key(key),
            AppMode::Dashboard => self.handle_dashboard_key(key),
            AppMode::AdminLogin => self.handle_admin_login_key(key),
            AppMode::Admin => self.handle_admin_key(key),
        }
    }

    /// Fold a worker result into the state.
    pub fn apply_message(&mut self, message: ApiMessage) -> Vec<Effect> {
        match message {
            ApiMessage::DealsLoaded(Ok(deals)) => {
                self.loading = false;
                self.set_status(format!("Loaded {} deals", deals.len()));
                self.board.set_deals(deals);
                self.clamp_deal_cursor();
                Vec::new()
            }
            ApiMessage::DealsLoaded(Err(err)) => {
                self.loading = false;
                self.set_status(format!("Failed to load deals: {}", err));
                Vec::new()
            }
            ApiMessage::DealsRefreshed(Ok(message)) => {
                self.set_status(message);
                vec![Effect::LoadDeals(self.current_query())]
            }
            ApiMessage::DealsRefreshed(Err(err)) => {
                self.loading = false;
                self.set_status(format!("Refresh failed: {}", err));
                Vec::new()
            }
            ApiMessage::PaymentFinished(outcome) => {
                self.payment.finish(outcome);
                if self.payment.is_succeeded() {
                    self.payment_input.clear();
                    self.complete_setup()
                } else {
                    let message = self.payment.error().unwrap_or_default().to_string();
                    self.set_status(message);
                    Vec::new()
                }
            }
            ApiMessage::AdminLoaded(Ok(snapshot)) => {
                self.loading = false;
                self.admin = Some(snapshot);
                self.set_status("Admin data loaded");
                Vec::new()
            }
            ApiMessage::AdminLoaded(Err(err)) => {
                self.loading = false;
                self.set_status(format!("Failed to load admin data: {}", err));
                Vec::new()
            }
        }
    }

    fn handle_landing_key(&mut self, key: KeyEvent) -> Vec<Effect> {
        let actions: Vec<LandingAction> = LandingAction::iter().collect();
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.landing_selection = self.landing_selection.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.landing_selection + 1 < actions.len() {
                    self.landing_selection += 1;
                }
            }
            KeyCode::Enter => match actions.get(self.landing_selection) {
                Some(LandingAction::GetStarted) => self.start_wizard(),
                Some(LandingAction::BrowseDeals) => return self.open_dashboard(),
                Some(LandingAction::Admin) => return self.enter_admin(),
                Some(LandingAction::Quit) => return vec![Effect::Quit],
                None => {}
            },
            _ => {}
        }
        Vec::new()
    }

    fn start_wizard(&mut self) {
        info!("Opening preferences wizard");
        self.mode = AppMode::Preferences;
        self.wizard_step = WizardStep::default();
        self.payment.reset();
        self.set_status(self.wizard_step.caption());
    }

    fn open_dashboard(&mut self) -> Vec<Effect> {
        self.mode = AppMode::Dashboard;
        self.loading = true;
        self.set_status("Loading deals...");
        vec![Effect::LoadDeals(self.current_query())]
    }

    fn current_query(&self) -> DealQuery {
        DealQuery {
            category: self.active_category().map(str::to_string),
            ..DealQuery::default()
        }
    }

    fn enter_admin(&mut self) -> Vec<Effect> {
        self.password_input.clear();
        match self.gate.check(self.identity.as_deref()) {
            AccessState::SignInRequired => {
                self.mode = AppMode::AdminLogin;
                self.admin_error = Some(SIGN_IN_REQUIRED.to_string());
            }
            AccessState::Denied => {
                warn!("Non-admin identity tried to open the admin area");
                self.mode = AppMode::Landing;
                self.set_status("The admin area is restricted to administrators");
            }
            AccessState::PasswordRequired => {
                self.mode = AppMode::AdminLogin;
                self.admin_error = None;
            }
            AccessState::Authenticated => {
                self.mode = AppMode::Admin;
                self.loading = true;
                return vec![Effect::LoadAdmin];
            }
        }
        Vec::new()
    }

    // ------------------------------------------------------------------
    // Preferences wizard
    // ------------------------------------------------------------------

    fn handle_wizard_key(&mut self, key: KeyEvent) -> Vec<Effect> {
        if self.payment.is_processing() {
            return Vec::new();
        }

        match key.code {
            KeyCode::Esc => {
                self.mode = AppMode::Landing;
                self.set_status("Preferences kept; press Enter on Get Started to continue");
                return Vec::new();
            }
            KeyCode::Tab => return self.advance_wizard(),
            KeyCode::BackTab => {
                if let Some(previous) = self.wizard_step.previous() {
                    self.wizard_step = previous;
                    self.set_status(self.wizard_step.caption());
                }
                return Vec::new();
            }
            _ => {}
        }

        match self.wizard_step {
            WizardStep::Location => self.handle_location_key(key),
            WizardStep::Categories => self.handle_categories_key(key),
            WizardStep::PriceRange => self.handle_price_key(key),
            WizardStep::Review => {
                if key.code == KeyCode::Enter {
                    return self.advance_wizard();
                }
                Vec::new()
            }
            WizardStep::Payment => self.handle_payment_key(key),
        }
    }

    fn advance_wizard(&mut self) -> Vec<Effect> {
        match self.wizard_step.next() {
            Some(next) => {
                self.wizard_step = next;
                self.set_status(self.wizard_step.caption());
                Vec::new()
            }
            None => self.complete_setup(),
        }
    }

    /// Leave the wizard for the dashboard and submit the preferences.
    fn complete_setup(&mut self) -> Vec<Effect> {
        info!(
            categories = self.preferences.selection.category_count(),
            subcategories = self.preferences.selection.subcategory_count(),
            "Preferences completed"
        );
        self.mode = AppMode::Dashboard;
        self.board.home_city = self.preferences.location.city.clone();
        self.deal_tab = 0;
        self.deal_cursor = 0;
        self.board.filter.category = None;
        self.loading = true;
        self.set_status("Setup complete! Finding deals for you...");

        let mut effects = vec![Effect::SubmitPreferences(self.preferences.to_submission())];
        if let Some(path) = &self.preferences_file {
            effects.push(Effect::SavePreferences(path.clone()));
        }
        effects
    }

    fn handle_location_key(&mut self, key: KeyEvent) -> Vec<Effect> {
        let fields: Vec<LocationField> = LocationField::iter().collect();
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.location_field = self.location_field.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.location_field + 1 < fields.len() {
                    self.location_field += 1;
                }
            }
            KeyCode::Left | KeyCode::Char('h') => self.cycle_location(fields[self.location_field], false),
            KeyCode::Right | KeyCode::Char('l') => self.cycle_location(fields[self.location_field], true),
            KeyCode::Enter => return self.advance_wizard(),
            _ => {}
        }
        Vec::new()
    }

    /// Pick the next (or previous) option of a location field.
    fn cycle_location(&mut self, field: LocationField, forward: bool) {
        let location = &self.preferences.location;
        let (options, current): (Vec<&str>, Option<&str>) = match field {
            LocationField::Country => (
                COUNTRIES.iter().map(|c| c.code).collect(),
                location.country.as_deref(),
            ),
            LocationField::Region => (
                location
                    .country()
                    .map(|c| c.regions.iter().map(|r| r.code).collect())
                    .unwrap_or_default(),
                location.region.as_deref(),
            ),
            LocationField::City => (
                location
                    .region()
                    .map(|r| r.cities.to_vec())
                    .unwrap_or_default(),
                location.city.as_deref(),
            ),
        };

        if options.is_empty() {
            let prerequisite = match field {
                LocationField::City => "a region",
                _ => "a country",
            };
            self.set_status(format!("Choose {} first", prerequisite));
            return;
        }

        let next = cycle_index(options.len(), current.and_then(|c| options.iter().position(|o| *o == c)), forward);
        let choice = options[next].to_string();
        let location = &mut self.preferences.location;
        let changed = match field {
            LocationField::Country => location.set_country(&choice),
            LocationField::Region => location.set_region(&choice),
            LocationField::City => location.set_city(&choice),
        };
        debug!(?field, %choice, changed, "Location changed");
    }

    fn handle_categories_key(&mut self, key: KeyEvent) -> Vec<Effect> {
        let rows = self.category_rows();
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.category_cursor = self.category_cursor.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.category_cursor + 1 < rows.len() {
                    self.category_cursor += 1;
                }
            }
            KeyCode::PageUp => self.category_cursor = self.category_cursor.saturating_sub(10),
            KeyCode::PageDown => {
                self.category_cursor = (self.category_cursor + 10).min(rows.len().saturating_sub(1));
            }
            KeyCode::Char(' ') | KeyCode::Enter => {
                if let Some(row) = rows.get(self.category_cursor) {
                    self.preferences.selection.toggle(
                        &self.catalog,
                        &row.category,
                        row.subcategory.as_deref(),
                    );
                }
            }
            _ => {}
        }
        Vec::new()
    }

    fn handle_price_key(&mut self, key: KeyEvent) -> Vec<Effect> {
        let fields: Vec<PriceField> = PriceField::iter().collect();
        let delta: i32 = match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.price_field = self.price_field.saturating_sub(1);
                return Vec::new();
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.price_field + 1 < fields.len() {
                    self.price_field += 1;
                }
                return Vec::new();
            }
            KeyCode::Enter => return self.advance_wizard(),
            KeyCode::Left | KeyCode::Char('h') => -1,
            KeyCode::Right | KeyCode::Char('l') => 1,
            _ => return Vec::new(),
        };

        match fields[self.price_field] {
            PriceField::Min => self.preferences.price_range.shift_min(delta),
            PriceField::Max => self.preferences.price_range.shift_max(delta),
            PriceField::Notifications => self
                .preferences
                .adjust_notification(delta as i16 * NOTIFICATION_STEP),
        }
        Vec::new()
    }

    fn handle_payment_key(&mut self, key: KeyEvent) -> Vec<Effect> {
        match self.payment_input.handle_key(key) {
            InputResult::Confirm(token) => {
                if !self.payment.begin() {
                    return Vec::new();
                }
                self.set_status("Processing payment...");
                vec![Effect::Checkout {
                    request: self.payment_request.clone(),
                    payment_method: token,
                    billing: BillingDetails {
                        email: self.identity.clone().unwrap_or_default(),
                        name: self.display_name.clone(),
                    },
                }]
            }
            InputResult::Continue | InputResult::Cancel => Vec::new(),
        }
    }

    // ------------------------------------------------------------------
    // Dashboard
    // ------------------------------------------------------------------

    fn handle_dashboard_key(&mut self, key: KeyEvent) -> Vec<Effect> {
        if self.search_focused {
            let result = self.search.handle_key(key);
            self.board.filter.query = self.search.value().to_string();
            self.deal_cursor = 0;
            if result != InputResult::Continue {
                self.search_focused = false;
            }
            return Vec::new();
        }

        let tabs = self.catalog.len() + 1;
        match key.code {
            KeyCode::Char('/') => self.search_focused = true,
            KeyCode::Left | KeyCode::Char('h') => self.select_tab(cycle_index(tabs, Some(self.deal_tab), false)),
            KeyCode::Right | KeyCode::Char('l') => self.select_tab(cycle_index(tabs, Some(self.deal_tab), true)),
            KeyCode::Up | KeyCode::Char('k') => {
                self.deal_cursor = self.deal_cursor.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.deal_cursor += 1;
                self.clamp_deal_cursor();
            }
            KeyCode::Char('s') => {
                if let Some(deal) = self.selected_deal().cloned() {
                    let message = if self.board.toggle_saved(&deal) {
                        format!("Saved \"{}\"", deal.title)
                    } else {
                        format!("Removed \"{}\" from saved deals", deal.title)
                    };
                    self.set_status(message);
                }
            }
            KeyCode::Char('r') => {
                self.loading = true;
                self.set_status("Refreshing deals...");
                return vec![Effect::RefreshDeals];
            }
            KeyCode::Char('g') => self.show_report = !self.show_report,
            KeyCode::Char('p') => self.start_wizard(),
            KeyCode::Char('a') => return self.enter_admin(),
            KeyCode::Esc => self.mode = AppMode::Landing,
            _ => {}
        }
        Vec::new()
    }

    fn select_tab(&mut self, tab: usize) {
        self.deal_tab = tab;
        self.board.filter.category = self.active_category().map(str::to_string);
        self.deal_cursor = 0;
    }

    fn clamp_deal_cursor(&mut self) {
        let len = self.board.filtered().len();
        self.deal_cursor = self.deal_cursor.min(len.saturating_sub(1));
    }

    // ------------------------------------------------------------------
    // Admin
    // ------------------------------------------------------------------

    fn handle_admin_login_key(&mut self, key: KeyEvent) -> Vec<Effect> {
        if key.code == KeyCode::Esc {
            self.password_input.clear();
            self.mode = AppMode::Landing;
            return Vec::new();
        }
        if self.gate.check(self.identity.as_deref()) == AccessState::SignInRequired {
            return Vec::new();
        }

        match self.password_input.handle_key(key) {
            InputResult::Confirm(password) => {
                self.password_input.clear();
                match self.gate.login(self.identity.as_deref(), &password) {
                    Ok(()) => {
                        self.admin_error = None;
                        self.mode = AppMode::Admin;
                        self.loading = true;
                        vec![Effect::LoadAdmin]
                    }
                    Err(DealFinderError::Access(message)) => {
                        self.admin_error = Some(message);
                        Vec::new()
                    }
                    Err(err) => {
                        self.admin_error = Some(err.to_string());
                        Vec::new()
                    }
                }
            }
            InputResult::Continue | InputResult::Cancel => Vec::new(),
        }
    }

    fn handle_admin_key(&mut self, key: KeyEvent) -> Vec<Effect> {
        let tabs: Vec<AdminTab> = AdminTab::iter().collect();
        let current = tabs.iter().position(|t| *t == self.admin_tab);
        match key.code {
            KeyCode::Left | KeyCode::Char('h') => {
                self.admin_tab = tabs[cycle_index(tabs.len(), current, false)];
            }
            KeyCode::Right | KeyCode::Char('l') | KeyCode::Tab => {
                self.admin_tab = tabs[cycle_index(tabs.len(), current, true)];
            }
            KeyCode::Char('r') => {
                self.loading = true;
                return vec![Effect::LoadAdmin];
            }
            KeyCode::Char('o') => {
                self.gate.logout();
                self.admin = None;
                self.mode = AppMode::AdminLogin;
                self.set_status("Logged out");
            }
            KeyCode::Esc => self.mode = AppMode::Landing,
            _ => {}
        }
        Vec::new()
    }
}

/// Wrapping step through `len` options. With no current option, forward
/// starts at the first and backward at the last.
fn cycle_index(len: usize, current: Option<usize>, forward: bool) -> usize {
    match (current, forward) {
        (None, true) => 0,
        (None, false) => len.saturating_sub(1),
        (Some(i), true) => (i + 1) % len,
        (Some(i), false) => (i + len - 1) % len,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_index_wraps() {
        assert_eq!(cycle_index(3, None, true), 0);
        assert_eq!(cycle_index(3, None, false), 2);
        assert_eq!(cycle_index(3, Some(2), true), 0);
        assert_eq!(cycle_index(3, Some(0), false), 2);
    }
}
