//! Application module
//!
//! Contains the main application logic, state management, and event handling.
//!
//! # Module Structure
//! - `state` - Application state types (AppState, AppMode, Effect, ApiMessage, etc.)
//! - `handlers` - Key handling and worker results, free of I/O
//! - Main module - App struct, worker threads and the event loop

mod handlers;
mod state;

// Re-export state types for external use
pub use state::{
    AdminSnapshot, AdminTab, ApiMessage, AppMode, AppState, CategoryRow, Effect, LandingAction,
    LocationField, PriceField,
};

use crate::admin::RevenueRange;
use crate::api::{ApiClient, CustomerQuery, DealSource};
use crate::components::keybindings::KeybindingContext;
use crate::error::{DealFinderError, Result};
use crate::payment::{self, PaymentGateway};
use crate::ui::UiRenderer;
use chrono::Utc;
use crossterm::event::{Event, KeyEventKind};
use ratatui::{backend::Backend, Terminal};
use std::collections::VecDeque;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Main application struct
pub struct App {
    state: AppState,
    ui_renderer: UiRenderer,
    /// Keybinding context for navigation hints
    keybinding_context: KeybindingContext,
    /// Channel sender for worker results (cloned to threads)
    api_tx: Sender<ApiMessage>,
    /// Channel receiver for worker results (polled in main loop)
    api_rx: Receiver<ApiMessage>,
    deals: Arc<dyn DealSource>,
    api: ApiClient,
    /// `None` when no processor key is configured
    payments: Option<Arc<dyn PaymentGateway>>,
}

impl App {
    /// Create a new application instance
    pub fn new(
        state: AppState,
        deals: Arc<dyn DealSource>,
        api: ApiClient,
        payments: Option<Arc<dyn PaymentGateway>>,
    ) -> Self {
        info!("Creating new App instance");
        let (api_tx, api_rx) = mpsc::channel();

        Self {
            state,
            ui_renderer: UiRenderer::new(),
            keybinding_context: KeybindingContext::new(),
            api_tx,
            api_rx,
            deals,
            api,
            payments,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Get reference to keybinding context
    pub fn keybinding_context(&self) -> &KeybindingContext {
        &self.keybinding_context
    }

    /// Run the main application loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        info!("Starting main application loop");

        loop {
            // Fold in results from worker threads
            if self.poll_messages() {
                break;
            }

            // Handle input events
            if crossterm::event::poll(Duration::from_millis(50))? {
                if let Event::Key(key_event) = crossterm::event::read()? {
                    // Windows reports releases too
                    if key_event.kind == KeyEventKind::Press && self.handle_key_event(key_event) {
                        break; // Exit requested
                    }
                }
            }

            // Render UI
            terminal.draw(|f| {
                self.ui_renderer
                    .render(f, &self.state, &self.keybinding_context)
            })?;
        }

        info!("Main loop finished");
        Ok(())
    }

    /// Handle a key press. Returns true when the app should exit.
    pub fn handle_key_event(&mut self, key: crossterm::event::KeyEvent) -> bool {
        let effects = self.state.handle_key(key);
        self.run_effects(effects)
    }

    /// Drain pending worker results without blocking. Returns true on quit.
    pub fn poll_messages(&mut self) -> bool {
        let mut quit = false;
        while let Ok(msg) = self.api_rx.try_recv() {
            let effects = self.state.apply_message(msg);
            quit |= self.run_effects(effects);
        }
        quit
    }

    /// Run effects in order, including the ones they trigger.
    fn run_effects(&mut self, effects: Vec<Effect>) -> bool {
        let mut queue: VecDeque<Effect> = effects.into();

        while let Some(effect) = queue.pop_front() {
            debug!(?effect, "Running effect");
            match effect {
                Effect::Quit => return true,
                Effect::LoadDeals(query) => {
                    let deals = Arc::clone(&self.deals);
                    self.spawn_worker(move || ApiMessage::DealsLoaded(deals.fetch_deals(&query)));
                }
                Effect::SubmitPreferences(submission) => {
                    let deals = Arc::clone(&self.deals);
                    self.spawn_worker(move || {
                        ApiMessage::DealsLoaded(deals.filter_deals(&submission))
                    });
                }
                Effect::RefreshDeals => {
                    let api = self.api.clone();
                    self.spawn_worker(move || ApiMessage::DealsRefreshed(api.refresh_deals()));
                }
                Effect::SavePreferences(path) => {
                    match self.state.preferences.save_to_file(&path) {
                        Ok(()) => info!("Saved preferences to {}", path.display()),
                        Err(e) => {
                            warn!("Failed to save preferences: {:#}", e);
                            self.state.set_status(format!("Could not save preferences: {}", e));
                        }
                    }
                }
                Effect::Checkout {
                    request,
                    payment_method,
                    billing,
                } => match &self.payments {
                    Some(gateway) => {
                        let gateway = Arc::clone(gateway);
                        self.spawn_worker(move || {
                            ApiMessage::PaymentFinished(payment::checkout(
                                gateway.as_ref(),
                                &request,
                                &payment_method,
                                &billing,
                            ))
                        });
                    }
                    None => {
                        let outcome = Err(DealFinderError::config("payments are not configured"));
                        queue.extend(self.state.apply_message(ApiMessage::PaymentFinished(outcome)));
                    }
                },
                Effect::LoadAdmin => {
                    let api = self.api.clone();
                    self.spawn_worker(move || ApiMessage::AdminLoaded(load_admin(&api)));
                }
            }
        }
        false
    }

    /// Run `job` on a worker thread and send its message back to the UI.
    fn spawn_worker<F>(&self, job: F)
    where
        F: FnOnce() -> ApiMessage + Send + 'static,
    {
        let tx = self.api_tx.clone();
        thread::spawn(move || {
            // Receiver gone means the app is shutting down
            let _ = tx.send(job());
        });
    }
}

/// Dashboard, customers and the default revenue window in one snapshot.
fn load_admin(api: &ApiClient) -> Result<AdminSnapshot> {
    let dashboard = api.get_dashboard()?;
    let customers = api.get_customers(&CustomerQuery::default())?;
    let range = RevenueRange::resolve(None, None, Utc::now().naive_utc())?;
    let revenue = api.get_revenue(&range)?;
    Ok(AdminSnapshot {
        dashboard,
        customers,
        revenue,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::FileDealSource;
    use crate::catalog::Catalog;
    use crate::config::AppConfig;
    use crate::deals::Deal;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use std::time::Instant;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn deal(id: u64, title: &str, category: &str) -> Deal {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "title": title,
            "price": 50.0,
            "original_price": 100.0,
            "retailer": "Target",
            "category": category
        }))
        .unwrap()
    }

    fn app(config: &AppConfig) -> App {
        let source = FileDealSource::new(vec![
            deal(1, "Smart TV", "electronics"),
            deal(2, "Running Shoes", "fashion"),
        ]);
        App::new(
            AppState::new(config, Catalog::default()),
            Arc::new(source),
            ApiClient::new("http://127.0.0.1:9/api").unwrap(),
            None,
        )
    }

    fn wait_until_loaded(app: &mut App) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while app.state().loading && Instant::now() < deadline {
            app.poll_messages();
            thread::sleep(Duration::from_millis(10));
        }
    }

    #[test]
    fn test_browse_deals_loads_from_source() {
        let mut app = app(&AppConfig::default());
        assert!(!app.handle_key_event(key(KeyCode::Down)));
        assert!(!app.handle_key_event(key(KeyCode::Enter)));
        assert_eq!(app.state().mode, AppMode::Dashboard);

        wait_until_loaded(&mut app);
        assert_eq!(app.state().board.deals().len(), 2);
        assert_eq!(app.state().status_message, "Loaded 2 deals");
    }

    #[test]
    fn test_quit_key() {
        let mut app = app(&AppConfig::default());
        assert!(app.handle_key_event(key(KeyCode::Char('q'))));
    }

    #[test]
    fn test_checkout_without_gateway_fails_cleanly() {
        let config = AppConfig {
            email: Some("shopper@example.com".to_string()),
            ..AppConfig::default()
        };
        let mut app = app(&config);
        app.state.mode = AppMode::Preferences;
        app.state.wizard_step = crate::wizard::WizardStep::Payment;

        for c in "tok_visa".chars() {
            app.handle_key_event(key(KeyCode::Char(c)));
        }
        assert!(!app.handle_key_event(key(KeyCode::Enter)));

        assert_eq!(app.state().mode, AppMode::Preferences);
        assert!(!app.state().payment.is_processing());
        assert_eq!(app.state().payment.error(), Some(payment::PAYMENT_FAILED));
    }

    #[test]
    fn test_save_preferences_on_completion() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        let config = AppConfig {
            preferences_file: Some(path.clone()),
            ..AppConfig::default()
        };
        let mut app = app(&config);
        app.state.mode = AppMode::Preferences;
        app.state.wizard_step = crate::wizard::WizardStep::Review;

        // Review -> Payment, then Tab finishes without paying
        app.handle_key_event(key(KeyCode::Tab));
        app.handle_key_event(key(KeyCode::Tab));
        assert_eq!(app.state().mode, AppMode::Dashboard);
        assert!(path.exists());

        wait_until_loaded(&mut app);
        assert_eq!(app.state().board.deals().len(), 2);
    }
}
