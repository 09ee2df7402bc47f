//! HTTP client for the DealFinder backend, plus an offline deal source.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

use crate::admin::{AdminStats, Customer, DashboardData, Payment, RevenueRange};
use crate::deals::{Deal, DealReport};
use crate::error::{DealFinderError, Result};
use crate::payment::{PaymentIntent, PaymentRequest};
use crate::preferences::PreferenceSubmission;

/// Default backend base URL.
pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Query for `GET /deals`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DealQuery {
    pub skip: usize,
    pub limit: usize,
    pub category: Option<String>,
}

impl Default for DealQuery {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: 100,
            category: None,
        }
    }
}

impl DealQuery {
    pub fn category(category: impl Into<String>) -> Self {
        Self {
            category: Some(category.into()),
            ..Self::default()
        }
    }
}

/// Query for `GET /admin/customers`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerQuery {
    pub skip: usize,
    pub limit: usize,
    pub search: Option<String>,
}

impl Default for CustomerQuery {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: 100,
            search: None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RefreshResponse {
    message: String,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    detail: serde_json::Value,
}

/// Where the dashboard gets its deals from.
pub trait DealSource: Send + Sync {
    fn fetch_deals(&self, query: &DealQuery) -> Result<Vec<Deal>>;

    /// Deals matching the user's submitted preferences.
    fn filter_deals(&self, submission: &PreferenceSubmission) -> Result<Vec<Deal>>;
}

/// Blocking JSON client for the backend.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::blocking::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn http(&self) -> &reqwest::blocking::Client {
        &self.http
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<T> {
        debug!("GET {}{}", self.base_url, path);
        let response = self.http.get(self.url(path)).query(query).send()?;
        decode(response)
    }

    fn post<B: Serialize + ?Sized, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        debug!("POST {}{}", self.base_url, path);
        let response = self.http.post(self.url(path)).json(body).send()?;
        decode(response)
    }

    pub fn get_deals(&self, query: &DealQuery) -> Result<Vec<Deal>> {
        let mut params = vec![
            ("skip", query.skip.to_string()),
            ("limit", query.limit.to_string()),
        ];
        if let Some(category) = &query.category {
            params.push(("category", category.clone()));
        }
        self.get("/deals", &params)
    }

    pub fn get_deals_by_category(&self, category: &str) -> Result<Vec<Deal>> {
        self.get_deals(&DealQuery::category(category))
    }

    pub fn submit_preferences(&self, submission: &PreferenceSubmission) -> Result<Vec<Deal>> {
        self.post("/deals/filter", submission)
    }

    /// Ask the backend to scrape fresh deals. Returns its status message.
    pub fn refresh_deals(&self) -> Result<String> {
        let response: RefreshResponse = self.post("/deals/refresh", &serde_json::json!({}))?;
        info!("{}", response.message);
        Ok(response.message)
    }

    /// Server-side report; `None` when the backend has no deals.
    pub fn get_report(&self) -> Result<Option<DealReport>> {
        let value: serde_json::Value = self.get("/report", &[])?;
        if value.as_object().is_some_and(|o| o.is_empty()) {
            return Ok(None);
        }
        Ok(Some(serde_json::from_value(value)?))
    }

    pub fn create_payment_intent(&self, request: &PaymentRequest) -> Result<PaymentIntent> {
        self.post("/create-payment-intent", request)
    }

    pub fn get_stats(&self) -> Result<AdminStats> {
        self.get("/admin/stats", &[])
    }

    pub fn get_customers(&self, query: &CustomerQuery) -> Result<Vec<Customer>> {
        let mut params = vec![
            ("skip", query.skip.to_string()),
            ("limit", query.limit.to_string()),
        ];
        if let Some(search) = query.search.as_ref().filter(|s| !s.is_empty()) {
            params.push(("search", search.clone()));
        }
        self.get("/admin/customers", &params)
    }

    pub fn get_revenue(&self, range: &RevenueRange) -> Result<Vec<Payment>> {
        let params = [
            ("start_date", range.start.format(TIMESTAMP_FORMAT).to_string()),
            ("end_date", range.end.format(TIMESTAMP_FORMAT).to_string()),
        ];
        self.get("/admin/revenue", &params)
    }

    pub fn get_dashboard(&self) -> Result<DashboardData> {
        self.get("/admin/dashboard", &[])
    }
}

impl DealSource for ApiClient {
    fn fetch_deals(&self, query: &DealQuery) -> Result<Vec<Deal>> {
        self.get_deals(query)
    }

    fn filter_deals(&self, submission: &PreferenceSubmission) -> Result<Vec<Deal>> {
        self.submit_preferences(submission)
    }
}

fn decode<T: DeserializeOwned>(response: reqwest::blocking::Response) -> Result<T> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json()?);
    }

    let body = response.text().unwrap_or_default();
    let message = match serde_json::from_str::<ErrorDetail>(&body) {
        Ok(ErrorDetail {
            detail: serde_json::Value::String(s),
        }) => s,
        Ok(ErrorDetail { detail }) => detail.to_string(),
        Err(_) if body.is_empty() => status.canonical_reason().unwrap_or("error").to_string(),
        Err(_) => body,
    };
    Err(DealFinderError::api(status.as_u16(), message))
}

/// Deals read from a local JSON file, for offline use.
#[derive(Debug, Clone, Default)]
pub struct FileDealSource {
    deals: Vec<Deal>,
}

impl FileDealSource {
    pub fn new(deals: Vec<Deal>) -> Self {
        Self { deals }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let deals: Vec<Deal> = serde_json::from_str(&content)?;
        info!("Loaded {} deals from {}", deals.len(), path.display());
        Ok(Self { deals })
    }

    pub fn deals(&self) -> &[Deal] {
        &self.deals
    }
}

impl DealSource for FileDealSource {
    fn fetch_deals(&self, query: &DealQuery) -> Result<Vec<Deal>> {
        Ok(self
            .deals
            .iter()
            .filter(|d| match &query.category {
                Some(c) => d.category.as_deref() == Some(c.as_str()),
                None => true,
            })
            .skip(query.skip)
            .take(query.limit)
            .cloned()
            .collect())
    }

    /// Price within range, and category among the selected ones (if any were selected).
    fn filter_deals(&self, submission: &PreferenceSubmission) -> Result<Vec<Deal>> {
        Ok(self
            .deals
            .iter()
            .filter(|d| submission.price_range.contains(d.price))
            .filter(|d| {
                submission.categories.is_empty()
                    || d.category
                        .as_ref()
                        .is_some_and(|c| submission.categories.contains(c))
            })
            .cloned()
            .collect())
    }
}
