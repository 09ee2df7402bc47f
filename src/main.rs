//! DealFinder - Main entry point
//!
//! Interactive TUI by default; headless subcommands for scripting.

use anyhow::{Context, Result};
use chrono::Utc;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::File;
use std::io::stdout;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

use dealfinder::admin::{succeeded_revenue, AdminGate, RevenueRange};
use dealfinder::api::{ApiClient, CustomerQuery, DealQuery, DealSource, FileDealSource};
use dealfinder::app::{App, AppState};
use dealfinder::cli::{AdminCommands, Cli, Commands};
use dealfinder::config::AppConfig;
use dealfinder::deals::{recommend, Deal, DealFilter, DealReport, RecommendationCriteria};
use dealfinder::error::DealFinderError;
use dealfinder::payment::{HttpPaymentGateway, PaymentGateway};

/// Initialize tracing. The TUI owns the terminal, so it logs to a file.
fn init_logging(interactive: bool, log_file: Option<&Path>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    if interactive {
        let path = log_file
            .map(Path::to_path_buf)
            .unwrap_or_else(|| std::env::temp_dir().join("dealfinder.log"));
        let file = File::create(&path)
            .with_context(|| format!("Failed to create log file {}", path.display()))?;
        builder.with_writer(Mutex::new(file)).with_ansi(false).init();
    } else {
        builder.with_writer(std::io::stderr).init();
    }
    Ok(())
}

/// Main application entry point
fn main() -> Result<()> {
    let cli = Cli::parse_args();
    init_logging(cli.is_interactive(), cli.log_file.as_deref())?;
    info!("DealFinder starting up");

    // validate-config checks its own file, before the regular layers apply
    if let Some(Commands::ValidateConfig { config }) = &cli.command {
        return validate_config(config);
    }

    let config = AppConfig::load(
        cli.config.as_deref(),
        |key| std::env::var(key).ok(),
        &cli.overrides(),
    )
    .context("Failed to load configuration")?;
    debug!(api_url = %config.api_url, "Configuration loaded");

    let api = ApiClient::new(&config.api_url).context("Failed to create HTTP client")?;

    match cli.command {
        None | Some(Commands::Run) => run_tui(&config, api),
        Some(Commands::Deals {
            category,
            search,
            file,
        }) => {
            let deals = load_deals(&api, file.as_deref(), category.as_deref())?;
            let filter = DealFilter {
                category,
                query: search.unwrap_or_default(),
            };
            let matches = filter.apply(&deals);
            if matches.is_empty() {
                println!("No deals found.");
            }
            for deal in matches {
                println!("{}", deal_summary(deal));
            }
            Ok(())
        }
        Some(Commands::Recommend {
            max_price,
            min_discount,
            categories,
            file,
        }) => {
            let deals = load_deals(&api, file.as_deref(), None)?;
            let criteria = RecommendationCriteria::new(max_price, min_discount, categories);
            let picks = recommend(&deals, &criteria);
            info!("{} of {} deals recommended", picks.len(), deals.len());
            if picks.is_empty() {
                println!("No deals match your criteria.");
            }
            for deal in picks {
                let score = deal
                    .quality_score
                    .map(|s| format!(" [quality {}]", s))
                    .unwrap_or_default();
                println!("{}{}", deal_summary(deal), score);
            }
            Ok(())
        }
        Some(Commands::Report { file }) => {
            let report = match file {
                Some(path) => {
                    let deals = load_deals(&api, Some(&path), None)?;
                    DealReport::compute(&deals, Utc::now().naive_utc())
                }
                None => api.get_report().context("Failed to fetch report")?,
            };
            match report {
                Some(report) => report.lines().iter().for_each(|l| println!("{}", l)),
                None => println!("No deals found."),
            }
            Ok(())
        }
        Some(Commands::Admin { command }) => run_admin(&config, &api, command),
        Some(Commands::ValidateConfig { .. }) => Ok(()),
    }
}

fn validate_config(path: &Path) -> Result<()> {
    info!("Validating configuration file: {:?}", path);
    let config = match AppConfig::load_from_file(path) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration file: {:#}", e);
            eprintln!("✗ Failed to load configuration file: {:#}", e);
            std::process::exit(1);
        }
    };
    match config.validate() {
        Ok(()) => {
            info!("Configuration validation successful");
            println!("✓ Configuration file is valid: {}", path.display());
            Ok(())
        }
        Err(e) => {
            error!("Configuration validation failed: {:#}", e);
            eprintln!("✗ Configuration validation failed: {:#}", e);
            std::process::exit(1);
        }
    }
}

/// Deals from a JSON file, or from the API.
fn load_deals(api: &ApiClient, file: Option<&Path>, category: Option<&str>) -> Result<Vec<Deal>> {
    let query = match category {
        Some(c) => DealQuery::category(c),
        None => DealQuery::default(),
    };
    let deals = match file {
        Some(path) => FileDealSource::load(path)
            .with_context(|| format!("Failed to read deals from {}", path.display()))?
            .fetch_deals(&query)?,
        None => api.get_deals(&query).context("Failed to fetch deals")?,
    };
    Ok(deals)
}

fn deal_summary(deal: &Deal) -> String {
    format!(
        "#{:<5} {} | {} | ${:.2} (was ${:.2}, -{:.0}%)",
        deal.id,
        deal.title,
        deal.retailer,
        deal.price,
        deal.original_price,
        deal.discount()
    )
}

fn run_admin(config: &AppConfig, api: &ApiClient, command: AdminCommands) -> Result<()> {
    let mut gate = AdminGate::new(
        config.superadmin_emails.clone(),
        config.superadmin_password.clone(),
    );
    // Holding the configured password is the second factor from the shell
    gate.login(config.identity(), &config.superadmin_password)
        .context("Admin access refused")?;

    match command {
        AdminCommands::Stats => print_json(&api.get_stats()?),
        AdminCommands::Customers {
            skip,
            limit,
            search,
        } => print_json(&api.get_customers(&CustomerQuery {
            skip,
            limit,
            search,
        })?),
        AdminCommands::Revenue { start, end } => {
            let range = RevenueRange::resolve(start, end, Utc::now().naive_utc())?;
            let payments = api.get_revenue(&range)?;
            print_json(&payments)?;
            println!("Succeeded revenue: ${:.2}", succeeded_revenue(&payments));
            Ok(())
        }
        AdminCommands::Dashboard => print_json(&api.get_dashboard()?),
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Run the interactive TUI
fn run_tui(config: &AppConfig, api: ApiClient) -> Result<()> {
    debug!("Initializing terminal for TUI mode");

    let payments: Option<Arc<dyn PaymentGateway>> =
        match HttpPaymentGateway::new(api.clone(), &config.payment_url, &config.payment_key) {
            Ok(gateway) => Some(Arc::new(gateway)),
            Err(e) => {
                warn!("Payments disabled: {}", e);
                None
            }
        };
    let catalog = config.catalog().context("Failed to load category catalog")?;
    let state = AppState::new(config, catalog);
    let deals: Arc<dyn DealSource> = Arc::new(api.clone());
    let mut app = App::new(state, deals, api, payments);

    // Initialize terminal
    enable_raw_mode()
        .map_err(|e| DealFinderError::terminal(format!("Failed to enable raw mode: {}", e)))?;
    crossterm::execute!(stdout(), crossterm::terminal::EnterAlternateScreen).map_err(|e| {
        DealFinderError::terminal(format!("Failed to enter alternate screen: {}", e))
    })?;

    // Create terminal backend
    let backend = CrosstermBackend::new(stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| DealFinderError::terminal(format!("Failed to create terminal: {}", e)))?;

    let result = app.run(&mut terminal);

    // Cleanup terminal (always attempt cleanup, even if app failed)
    let _ = disable_raw_mode();
    let _ = crossterm::execute!(stdout(), crossterm::terminal::LeaveAlternateScreen);
    let _ = terminal.show_cursor();

    if let Err(e) = &result {
        error!("Application error: {}", e);
    }
    info!("DealFinder exiting");
    Ok(result?)
}
