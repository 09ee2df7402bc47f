use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::ConfigOverrides;

/// DealFinder - personalized deal discovery from the terminal
#[derive(Parser)]
#[command(name = "dealfinder")]
#[command(about = "Find the best retail deals for your location, interests and budget")]
#[command(version)]
pub struct Cli {
    /// JSON configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log file (the TUI never logs to the terminal)
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// Signed-in email address
    #[arg(long, global = true)]
    pub email: Option<String>,

    /// Display name
    #[arg(long, global = true)]
    pub name: Option<String>,

    /// Locale used for currency detection (e.g. de-DE)
    #[arg(long, global = true)]
    pub locale: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the interactive TUI (default)
    Run,
    /// List deals
    Deals {
        /// Only this category id
        #[arg(short, long)]
        category: Option<String>,
        /// Case-insensitive title search
        #[arg(short, long)]
        search: Option<String>,
        /// Read deals from a JSON file instead of the API
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
    /// Recommend deals (quality score 70 and above)
    Recommend {
        /// Highest acceptable price
        #[arg(long)]
        max_price: Option<f64>,
        /// Minimum discount in percent
        #[arg(long, default_value_t = crate::deals::DEFAULT_MIN_DISCOUNT)]
        min_discount: f64,
        /// Title keyword; repeat for several
        #[arg(short, long = "category")]
        categories: Vec<String>,
        /// Read deals from a JSON file instead of the API
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
    /// Print a deal report
    Report {
        /// Compute locally from a JSON deal file
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
    /// Validate a configuration file
    ValidateConfig {
        /// Path to configuration file to validate
        config: PathBuf,
    },
    /// Read-only admin data (requires the superadmin password)
    Admin {
        #[command(subcommand)]
        command: AdminCommands,
    },
}

#[derive(Subcommand)]
pub enum AdminCommands {
    /// Current platform statistics
    Stats,
    /// Customer list
    Customers {
        #[arg(long, default_value_t = 0)]
        skip: usize,
        #[arg(long, default_value_t = 100)]
        limit: usize,
        /// Match against name or email
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Payments within a date range (default: last 30 days)
    Revenue {
        /// Start, e.g. 2024-11-01T00:00:00
        #[arg(long)]
        start: Option<chrono::NaiveDateTime>,
        /// End, e.g. 2024-11-30T23:59:59
        #[arg(long)]
        end: Option<chrono::NaiveDateTime>,
    },
    /// Dashboard summary
    Dashboard,
}

impl Cli {
    pub fn parse_args() -> Self {
        <Self as clap::Parser>::parse()
    }

    /// Command-line layer of the configuration.
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            email: self.email.clone(),
            name: self.name.clone(),
            locale: self.locale.clone(),
            log_file: self.log_file.clone(),
        }
    }

    /// The TUI runs when no subcommand, or `run`, is given.
    pub fn is_interactive(&self) -> bool {
        matches!(self.command, None | Some(Commands::Run))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_no_args() {
        let cli = Cli::try_parse_from(["dealfinder"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.is_interactive());
    }

    #[test]
    fn test_cli_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "dealfinder",
            "deals",
            "--category",
            "electronics",
            "--email",
            "me@x.io",
        ])
        .unwrap();
        assert!(!cli.is_interactive());
        assert_eq!(cli.overrides().email.as_deref(), Some("me@x.io"));
        match cli.command {
            Some(Commands::Deals { category, .. }) => {
                assert_eq!(category.as_deref(), Some("electronics"));
            }
            _ => panic!("Expected Deals command"),
        }
    }

    #[test]
    fn test_cli_recommend_repeated_categories() {
        let cli = Cli::try_parse_from([
            "dealfinder",
            "recommend",
            "--max-price",
            "200",
            "-c",
            "laptop",
            "-c",
            "phone",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Recommend {
                max_price,
                min_discount,
                categories,
                ..
            }) => {
                assert_eq!(max_price, Some(200.0));
                assert_eq!(min_discount, 20.0);
                assert_eq!(categories, vec!["laptop", "phone"]);
            }
            _ => panic!("Expected Recommend command"),
        }
    }

    #[test]
    fn test_cli_admin_revenue_dates() {
        let cli = Cli::try_parse_from([
            "dealfinder",
            "admin",
            "revenue",
            "--start",
            "2024-11-01T00:00:00",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Admin {
                command: AdminCommands::Revenue { start, end },
            }) => {
                assert!(start.is_some());
                assert!(end.is_none());
            }
            _ => panic!("Expected admin revenue command"),
        }
    }

    #[test]
    fn test_cli_validate_config_requires_path() {
        assert!(Cli::try_parse_from(["dealfinder", "validate-config"]).is_err());
        assert!(Cli::try_parse_from(["dealfinder", "validate-config", "c.json"]).is_ok());
    }
}
