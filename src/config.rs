//! Application configuration.
//!
//! Layers, lowest precedence first: built-in defaults, an optional JSON file,
//! `DEALFINDER_*` environment variables, command-line flags.

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::api::DEFAULT_API_URL;
use crate::catalog::Catalog;
use crate::payment::{DEFAULT_FEE, PaymentRequest};
use crate::types::Currency;

/// Processor REST endpoint used when none is configured.
pub const DEFAULT_PAYMENT_URL: &str = "https://api.stripe.com";
pub const DEFAULT_LOCALE: &str = "en-US";

pub const ENV_API_URL: &str = "DEALFINDER_API_URL";
pub const ENV_SUPERADMIN_EMAILS: &str = "DEALFINDER_SUPERADMIN_EMAILS";
pub const ENV_SUPERADMIN_PASSWORD: &str = "DEALFINDER_SUPERADMIN_PASSWORD";
pub const ENV_PAYMENT_KEY: &str = "DEALFINDER_PAYMENT_KEY";
pub const ENV_PAYMENT_URL: &str = "DEALFINDER_PAYMENT_URL";
pub const ENV_EMAIL: &str = "DEALFINDER_EMAIL";
pub const ENV_NAME: &str = "DEALFINDER_NAME";
pub const ENV_LOCALE: &str = "DEALFINDER_LOCALE";
pub const ENV_FEE: &str = "DEALFINDER_FEE";
pub const ENV_CATALOG_FILE: &str = "DEALFINDER_CATALOG_FILE";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Backend base URL, ending in `/api`.
    pub api_url: String,
    pub superadmin_emails: Vec<String>,
    pub superadmin_password: String,
    /// Processor publishable key.
    pub payment_key: String,
    pub payment_url: String,
    /// Setup fee in major units.
    pub fee: f64,
    /// Signed-in identity.
    pub email: Option<String>,
    pub name: Option<String>,
    pub locale: String,
    pub log_file: Option<PathBuf>,
    /// Where the wizard saves preferences on completion.
    pub preferences_file: Option<PathBuf>,
    /// Category tree replacing the built-in one.
    pub catalog_file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            superadmin_emails: Vec::new(),
            superadmin_password: String::new(),
            payment_key: String::new(),
            payment_url: DEFAULT_PAYMENT_URL.to_string(),
            fee: DEFAULT_FEE,
            email: None,
            name: None,
            locale: DEFAULT_LOCALE.to_string(),
            log_file: None,
            preferences_file: None,
            catalog_file: None,
        }
    }
}

/// Values supplied on the command line; `None` leaves the lower layers alone.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub email: Option<String>,
    pub name: Option<String>,
    pub locale: Option<String>,
    pub log_file: Option<PathBuf>,
}

impl AppConfig {
    /// Build the configuration from every layer and validate it.
    pub fn load<F>(file: Option<&Path>, env: F, overrides: &ConfigOverrides) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match file {
            Some(path) => Self::load_from_file(path)?,
            None => Self::default(),
        };
        config.apply_env(env)?;
        config.apply_overrides(overrides);
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read configuration from {:?}", path.as_ref()))?;

        let config: Self =
            serde_json::from_str(&content).context("Failed to parse configuration JSON")?;

        info!("Loaded configuration from {:?}", path.as_ref());
        Ok(config)
    }

    /// Save configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .context("Failed to serialize configuration to JSON")?;

        fs::write(&path, json)
            .with_context(|| format!("Failed to write configuration to {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Overlay `DEALFINDER_*` variables. `env` is usually `|k| std::env::var(k).ok()`.
    pub fn apply_env<F>(&mut self, env: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| {
            let value = env(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
            if value.is_some() {
                info!("{key} set from environment");
            }
            value
        };

        if let Some(v) = var(ENV_API_URL) {
            self.api_url = v;
        }
        if let Some(v) = var(ENV_SUPERADMIN_EMAILS) {
            self.superadmin_emails = v
                .split(',')
                .map(|e| e.trim().to_string())
                .filter(|e| !e.is_empty())
                .collect();
        }
        if let Some(v) = var(ENV_SUPERADMIN_PASSWORD) {
            self.superadmin_password = v;
        }
        if let Some(v) = var(ENV_PAYMENT_KEY) {
            self.payment_key = v;
        }
        if let Some(v) = var(ENV_PAYMENT_URL) {
            self.payment_url = v;
        }
        if let Some(v) = var(ENV_EMAIL) {
            self.email = Some(v);
        }
        if let Some(v) = var(ENV_NAME) {
            self.name = Some(v);
        }
        if let Some(v) = var(ENV_LOCALE) {
            self.locale = v;
        }
        if let Some(v) = var(ENV_FEE) {
            self.fee = v
                .parse::<f64>()
                .map_err(|e| {
                    warn!("Invalid {ENV_FEE} value: {e}");
                })
                .ok()
                .with_context(|| format!("{ENV_FEE} must be a number, got {v:?}"))?;
        }
        if let Some(v) = var(ENV_CATALOG_FILE) {
            self.catalog_file = Some(PathBuf::from(v));
        }
        Ok(())
    }

    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(email) = &overrides.email {
            self.email = Some(email.clone());
        }
        if let Some(name) = &overrides.name {
            self.name = Some(name.clone());
        }
        if let Some(locale) = &overrides.locale {
            self.locale = locale.clone();
        }
        if let Some(path) = &overrides.log_file {
            self.log_file = Some(path.clone());
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        for (label, url) in [("api_url", &self.api_url), ("payment_url", &self.payment_url)] {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                bail!("{} must be an http(s) URL, got {:?}", label, url);
            }
        }

        if !(self.fee.is_finite() && self.fee > 0.0) {
            bail!("fee must be a positive amount, got {}", self.fee);
        }

        for email in &self.superadmin_emails {
            if !looks_like_email(email) {
                bail!("Invalid superadmin email: {:?}", email);
            }
        }

        if let Some(email) = &self.email {
            if !looks_like_email(email) {
                bail!("Invalid email: {:?}", email);
            }
        }

        if !self.superadmin_emails.is_empty() && self.superadmin_password.is_empty() {
            warn!("Superadmin emails configured without a password; admin login will fail");
        }

        Ok(())
    }

    pub fn identity(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("Guest")
    }

    pub fn currency(&self) -> Currency {
        Currency::from_locale(&self.locale)
    }

    /// The configured category tree, or the built-in one.
    pub fn catalog(&self) -> Result<Catalog> {
        let Some(path) = &self.catalog_file else {
            return Ok(Catalog::default());
        };
        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog file {}", path.display()))?;
        let catalog = Catalog::from_json(&json)
            .with_context(|| format!("Invalid catalog file {}", path.display()))?;
        info!("Loaded {} categories from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    /// Fee request for the signed-in user (empty email when anonymous).
    pub fn payment_request(&self) -> PaymentRequest {
        PaymentRequest::new(
            self.fee,
            self.currency(),
            self.email.clone().unwrap_or_default(),
        )
    }
}

fn looks_like_email(value: &str) -> bool {
    match value.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.') && !domain.starts_with('.'),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::tempdir;

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> + use<> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_validate() {
        let config = AppConfig::load(None, env_from(&[]), &ConfigOverrides::default()).unwrap();
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.fee, DEFAULT_FEE);
        assert_eq!(config.currency(), Currency::Usd);
        assert_eq!(config.display_name(), "Guest");
    }

    #[test]
    fn test_precedence_file_env_cli() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("dealfinder.json");
        fs::write(
            &path,
            r#"{"api_url": "http://file.example/api", "locale": "en-GB", "email": "file@x.io"}"#,
        )
        .unwrap();

        let env = env_from(&[
            (ENV_LOCALE, "de-DE"),
            (ENV_EMAIL, "env@x.io"),
            (ENV_SUPERADMIN_EMAILS, "a@x.io, b@x.io"),
        ]);
        let overrides = ConfigOverrides {
            email: Some("cli@x.io".to_string()),
            ..ConfigOverrides::default()
        };

        let config = AppConfig::load(Some(&path), env, &overrides).unwrap();
        assert_eq!(config.api_url, "http://file.example/api");
        assert_eq!(config.locale, "de-DE");
        assert_eq!(config.currency(), Currency::Eur);
        assert_eq!(config.email.as_deref(), Some("cli@x.io"));
        assert_eq!(config.superadmin_emails, vec!["a@x.io", "b@x.io"]);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let none = ConfigOverrides::default();
        assert!(AppConfig::load(None, env_from(&[(ENV_FEE, "five")]), &none).is_err());
        assert!(AppConfig::load(None, env_from(&[(ENV_FEE, "0")]), &none).is_err());
        assert!(AppConfig::load(None, env_from(&[(ENV_API_URL, "ftp://x")]), &none).is_err());
        assert!(
            AppConfig::load(None, env_from(&[(ENV_SUPERADMIN_EMAILS, "nobody")]), &none).is_err()
        );
    }

    #[test]
    fn test_blank_env_values_ignored() {
        let config =
            AppConfig::load(None, env_from(&[(ENV_API_URL, "  ")]), &ConfigOverrides::default())
                .unwrap();
        assert_eq!(config.api_url, DEFAULT_API_URL);
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        let mut config = AppConfig::default();
        config.fee = 7.5;
        config.save_to_file(&path).unwrap();
        assert_eq!(AppConfig::load_from_file(&path).unwrap(), config);
    }

    #[test]
    fn test_catalog_file() {
        assert_eq!(AppConfig::default().catalog().unwrap().len(), 9);

        let dir = tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        fs::write(&path, r#"[{"id":"garden","name":"Garden","subCategoryIds":["Plants"]}]"#)
            .unwrap();
        let env = env_from(&[(ENV_CATALOG_FILE, path.to_str().unwrap())]);
        let config = AppConfig::load(None, env, &ConfigOverrides::default()).unwrap();
        let catalog = config.catalog().unwrap();
        assert_eq!(catalog.len(), 1);
        assert!(catalog.contains("garden"));
        assert!(!catalog.contains("electronics"));

        // Duplicate ids are rejected by catalog validation
        fs::write(&path, r#"[{"id":"a","name":"A","subCategoryIds":[]},{"id":"a","name":"B","subCategoryIds":[]}]"#).unwrap();
        assert!(config.catalog().is_err());
        fs::write(&path, "[").unwrap();
        assert!(config.catalog().is_err());
    }

    #[test]
    fn test_payment_request_uses_locale_and_identity() {
        let mut config = AppConfig::default();
        config.locale = "fr-FR".to_string();
        config.email = Some("me@x.io".to_string());
        let request = config.payment_request();
        assert_eq!(request.currency, Currency::Eur);
        assert_eq!(request.email, "me@x.io");
        assert_eq!(request.price_label(), "€5.00");
    }
}
