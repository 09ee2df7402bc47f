//! Admin area: access gate and the read-only data the backend serves.

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{info, warn};

use crate::error::{DealFinderError, Result};

/// Days covered by the revenue view when no range is given.
pub const DEFAULT_REVENUE_DAYS: i64 = 30;
/// Message shown when nobody is signed in.
pub const SIGN_IN_REQUIRED: &str = "Please sign in to access this page.";
/// Message shown on a wrong admin password.
pub const INVALID_PASSWORD: &str = "Invalid password";

/// Where a visitor stands at the admin gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessState {
    /// No identity at all.
    SignInRequired,
    /// Signed in, but not on the allowlist. The UI sends them back to the landing page.
    Denied,
    /// Allowlisted, password not yet entered.
    PasswordRequired,
    Authenticated,
}

/// Two-factor gate: allowlisted email, then a shared password.
#[derive(Debug, Clone)]
pub struct AdminGate {
    allowlist: Vec<String>,
    password: String,
    authenticated: bool,
}

impl AdminGate {
    pub fn new(allowlist: Vec<String>, password: impl Into<String>) -> Self {
        Self {
            allowlist: allowlist
                .into_iter()
                .map(|e| e.trim().to_ascii_lowercase())
                .filter(|e| !e.is_empty())
                .collect(),
            password: password.into(),
            authenticated: false,
        }
    }

    pub fn is_allowlisted(&self, email: &str) -> bool {
        let email = email.trim().to_ascii_lowercase();
        self.allowlist.iter().any(|e| *e == email)
    }

    pub fn check(&self, identity: Option<&str>) -> AccessState {
        match identity.map(str::trim).filter(|e| !e.is_empty()) {
            None => AccessState::SignInRequired,
            Some(email) if !self.is_allowlisted(email) => AccessState::Denied,
            Some(_) if self.authenticated => AccessState::Authenticated,
            Some(_) => AccessState::PasswordRequired,
        }
    }

    /// Verify the shared password. An unset password never matches.
    pub fn login(&mut self, identity: Option<&str>, password: &str) -> Result<()> {
        match self.check(identity) {
            AccessState::SignInRequired => return Err(DealFinderError::access(SIGN_IN_REQUIRED)),
            AccessState::Denied => {
                warn!("Admin login refused for non-allowlisted identity");
                return Err(DealFinderError::access("Not an administrator"));
            }
            AccessState::Authenticated => return Ok(()),
            AccessState::PasswordRequired => {}
        }

        if self.password.is_empty() || password != self.password {
            warn!("Admin login failed: invalid password");
            return Err(DealFinderError::access(INVALID_PASSWORD));
        }

        info!("Admin authenticated");
        self.authenticated = true;
        Ok(())
    }

    pub fn logout(&mut self) {
        if self.authenticated {
            info!("Admin logged out");
        }
        self.authenticated = false;
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminStats {
    pub total_customers: u64,
    pub total_revenue: f64,
    pub total_deals: u64,
    pub total_stores: u64,
    pub total_savings: f64,
    pub customer_growth: f64,
    pub revenue_growth: f64,
    pub deal_growth: f64,
    pub store_growth: f64,
    #[serde(default)]
    pub category_distribution: BTreeMap<String, f64>,
    #[serde(default)]
    pub revenue_by_day: BTreeMap<String, f64>,
    pub timestamp: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: u64,
    pub email: String,
    pub name: String,
    pub joined_date: NaiveDateTime,
    pub total_spent: f64,
    pub is_premium: bool,
    #[serde(default)]
    pub last_login: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub id: u64,
    pub customer_id: u64,
    pub amount: f64,
    pub currency: String,
    pub timestamp: NaiveDateTime,
    pub status: String,
}

impl Payment {
    pub fn succeeded(&self) -> bool {
        self.status == "succeeded"
    }
}

/// Everything the admin dashboard shows, in one response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardData {
    #[serde(default)]
    pub stats: Option<AdminStats>,
    #[serde(default)]
    pub recent_customers: Vec<Customer>,
    #[serde(default)]
    pub recent_payments: Vec<Payment>,
    pub customer_count: u64,
    pub total_revenue: f64,
}

/// Inclusive timestamp window for the revenue view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevenueRange {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl RevenueRange {
    /// Fill in missing ends: `end` defaults to now, `start` to 30 days before now.
    pub fn resolve(
        start: Option<NaiveDateTime>,
        end: Option<NaiveDateTime>,
        now: NaiveDateTime,
    ) -> Result<Self> {
        let range = Self {
            start: start.unwrap_or(now - Duration::days(DEFAULT_REVENUE_DAYS)),
            end: end.unwrap_or(now),
        };
        if range.start > range.end {
            return Err(DealFinderError::validation(format!(
                "revenue range starts after it ends ({} > {})",
                range.start, range.end
            )));
        }
        Ok(range)
    }

    pub fn contains(&self, at: NaiveDateTime) -> bool {
        at >= self.start && at <= self.end
    }
}

/// Sum of succeeded payments.
pub fn succeeded_revenue(payments: &[Payment]) -> f64 {
    payments
        .iter()
        .filter(|p| p.succeeded())
        .map(|p| p.amount)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    fn gate() -> AdminGate {
        AdminGate::new(vec!["Boss@DealFinder.ai".to_string()], "hunter2")
    }

    #[test]
    fn test_gate_states() {
        let gate = gate();
        assert_eq!(gate.check(None), AccessState::SignInRequired);
        assert_eq!(gate.check(Some("  ")), AccessState::SignInRequired);
        assert_eq!(gate.check(Some("someone@else.com")), AccessState::Denied);
        assert_eq!(
            gate.check(Some("boss@dealfinder.ai")),
            AccessState::PasswordRequired
        );
    }

    #[test]
    fn test_login_and_logout() {
        let mut gate = gate();
        let me = Some("boss@dealfinder.ai");

        let err = gate.login(me, "wrong").unwrap_err();
        assert_eq!(err.to_string(), "Access denied: Invalid password");
        assert!(!gate.is_authenticated());

        gate.login(me, "hunter2").unwrap();
        assert_eq!(gate.check(me), AccessState::Authenticated);

        gate.logout();
        assert_eq!(gate.check(me), AccessState::PasswordRequired);
    }

    #[test]
    fn test_login_requires_identity_and_allowlist() {
        let mut gate = gate();
        assert!(gate.login(None, "hunter2").is_err());
        assert!(gate.login(Some("someone@else.com"), "hunter2").is_err());
        assert!(!gate.is_authenticated());
    }

    #[test]
    fn test_unset_password_never_matches() {
        let mut gate = AdminGate::new(vec!["a@b.c".to_string()], "");
        assert!(gate.login(Some("a@b.c"), "").is_err());
    }

    #[test]
    fn test_revenue_range_defaults() {
        let now = ts("2024-12-31 12:00:00");
        let range = RevenueRange::resolve(None, None, now).unwrap();
        assert_eq!(range.end, now);
        assert_eq!(range.start, ts("2024-12-01 12:00:00"));
        assert!(range.contains(ts("2024-12-15 00:00:00")));
        assert!(!range.contains(ts("2024-11-30 23:59:59")));

        assert!(RevenueRange::resolve(Some(now), Some(ts("2024-01-01 00:00:00")), now).is_err());
    }

    #[test]
    fn test_dashboard_parses_and_sums() {
        let json = r#"{
            "stats": null,
            "recent_customers": [{
                "id": 1, "email": "a@b.c", "name": "Ada",
                "joined_date": "2024-11-01T10:00:00", "total_spent": 5.0,
                "is_premium": true, "last_login": null
            }],
            "recent_payments": [
                {"id": 1, "customer_id": 1, "amount": 5.0, "currency": "usd",
                 "timestamp": "2024-11-01T10:05:00", "status": "succeeded"},
                {"id": 2, "customer_id": 1, "amount": 5.0, "currency": "usd",
                 "timestamp": "2024-11-02T10:05:00", "status": "failed"}
            ],
            "customer_count": 1,
            "total_revenue": 5.0
        }"#;
        let data: DashboardData = serde_json::from_str(json).unwrap();
        assert!(data.stats.is_none());
        assert_eq!(data.recent_customers[0].name, "Ada");
        assert_eq!(succeeded_revenue(&data.recent_payments), 5.0);
    }
}
