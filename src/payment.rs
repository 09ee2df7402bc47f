//! One-time setup fee: request shape, processor gateway and checkout flow.
//!
//! The backend creates a payment intent and hands back a client secret; the
//! processor confirms it against a payment-method token. Card details never
//! pass through this crate.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::api::ApiClient;
use crate::error::{DealFinderError, Result};
use crate::types::Currency;

/// Default setup fee in major currency units.
pub const DEFAULT_FEE: f64 = 5.0;
/// Shown for any failure the processor did not describe itself.
pub const PAYMENT_FAILED: &str = "Payment failed. Please try again.";

/// Body of `POST /create-payment-intent`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRequest {
    /// Major units; the backend multiplies by 100.
    pub amount: f64,
    pub currency: Currency,
    pub email: String,
}

impl PaymentRequest {
    pub fn new(amount: f64, currency: Currency, email: impl Into<String>) -> Self {
        Self {
            amount,
            currency,
            email: email.into(),
        }
    }

    pub fn amount_in_cents(&self) -> u64 {
        (self.amount * 100.0).round().max(0.0) as u64
    }

    /// "€5.00"
    pub fn price_label(&self) -> String {
        format!("{}{:.2}", self.currency.symbol(), self.amount)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentIntent {
    #[serde(rename = "clientSecret")]
    pub client_secret: String,
}

impl PaymentIntent {
    /// Intent id, the part of the client secret before `_secret_`.
    pub fn id(&self) -> &str {
        self.client_secret
            .split_once("_secret_")
            .map(|(id, _)| id)
            .unwrap_or(&self.client_secret)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BillingDetails {
    pub email: String,
    pub name: String,
}

/// Creates and confirms payments.
pub trait PaymentGateway: Send + Sync {
    fn create_intent(&self, request: &PaymentRequest) -> Result<PaymentIntent>;

    /// Confirm `intent` with a processor-issued payment-method token.
    fn confirm(
        &self,
        intent: &PaymentIntent,
        payment_method: &str,
        billing: &BillingDetails,
    ) -> Result<()>;
}

/// Gateway backed by the DealFinder API and the processor's REST endpoint.
pub struct HttpPaymentGateway {
    api: ApiClient,
    http: reqwest::blocking::Client,
    processor_url: String,
    publishable_key: String,
}

#[derive(Debug, Deserialize)]
struct ProcessorError {
    error: ProcessorErrorBody,
}

#[derive(Debug, Deserialize)]
struct ProcessorErrorBody {
    message: String,
}

#[derive(Debug, Deserialize)]
struct ConfirmedIntent {
    status: String,
}

impl HttpPaymentGateway {
    pub fn new(api: ApiClient, processor_url: &str, publishable_key: &str) -> Result<Self> {
        if publishable_key.is_empty() {
            return Err(DealFinderError::config("payment publishable key is not set"));
        }
        Ok(Self {
            http: api.http().clone(),
            api,
            processor_url: processor_url.trim_end_matches('/').to_string(),
            publishable_key: publishable_key.to_string(),
        })
    }
}

impl PaymentGateway for HttpPaymentGateway {
    fn create_intent(&self, request: &PaymentRequest) -> Result<PaymentIntent> {
        self.api.create_payment_intent(request)
    }

    fn confirm(
        &self,
        intent: &PaymentIntent,
        payment_method: &str,
        billing: &BillingDetails,
    ) -> Result<()> {
        let url = format!(
            "{}/v1/payment_intents/{}/confirm",
            self.processor_url,
            intent.id()
        );
        let form = [
            ("key", self.publishable_key.as_str()),
            ("client_secret", intent.client_secret.as_str()),
            ("payment_method_data[type]", "card"),
            ("payment_method_data[card][token]", payment_method),
            ("payment_method_data[billing_details][email]", billing.email.as_str()),
            ("payment_method_data[billing_details][name]", billing.name.as_str()),
        ];

        let response = self.http.post(&url).form(&form).send()?;
        if !response.status().is_success() {
            let body = response.text().unwrap_or_default();
            let message = serde_json::from_str::<ProcessorError>(&body)
                .map(|e| e.error.message)
                .unwrap_or_else(|_| PAYMENT_FAILED.to_string());
            return Err(DealFinderError::payment(message));
        }

        let confirmed: ConfirmedIntent = response.json()?;
        if confirmed.status != "succeeded" {
            return Err(DealFinderError::payment(format!(
                "Payment not completed (status: {})",
                confirmed.status
            )));
        }
        Ok(())
    }
}

/// Create and confirm a payment in one go.
pub fn checkout(
    gateway: &dyn PaymentGateway,
    request: &PaymentRequest,
    payment_method: &str,
    billing: &BillingDetails,
) -> Result<()> {
    if request.email.trim().is_empty() {
        return Err(DealFinderError::validation(
            "Please sign in before completing payment.",
        ));
    }
    if payment_method.trim().is_empty() {
        return Err(DealFinderError::validation("Enter a payment method token."));
    }

    info!(amount = request.amount, currency = %request.currency, "Creating payment intent");
    let intent = gateway.create_intent(request)?;
    gateway.confirm(&intent, payment_method.trim(), billing)?;
    info!("Payment succeeded");
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PaymentStatus {
    #[default]
    Idle,
    Processing,
    Succeeded,
    Failed(String),
}

/// Checkout state as the payment step displays it.
#[derive(Debug, Clone, Default)]
pub struct PaymentFlow {
    status: PaymentStatus,
}

impl PaymentFlow {
    pub fn status(&self) -> &PaymentStatus {
        &self.status
    }

    pub fn is_processing(&self) -> bool {
        self.status == PaymentStatus::Processing
    }

    pub fn is_succeeded(&self) -> bool {
        self.status == PaymentStatus::Succeeded
    }

    /// Enter `Processing`. Returns false if a payment is already in flight.
    pub fn begin(&mut self) -> bool {
        if self.is_processing() {
            return false;
        }
        self.status = PaymentStatus::Processing;
        true
    }

    /// Record the checkout outcome.
    pub fn finish(&mut self, outcome: Result<()>) {
        self.status = match outcome {
            Ok(()) => PaymentStatus::Succeeded,
            Err(err) => {
                warn!("Payment failed: {}", err);
                PaymentStatus::Failed(user_message(&err))
            }
        };
    }

    pub fn reset(&mut self) {
        self.status = PaymentStatus::Idle;
    }

    pub fn error(&self) -> Option<&str> {
        match &self.status {
            PaymentStatus::Failed(msg) => Some(msg),
            _ => None,
        }
    }
}

/// Processor and validation messages are shown as-is; anything else is generic.
fn user_message(err: &DealFinderError) -> String {
    match err {
        DealFinderError::Payment(msg) | DealFinderError::Validation(msg) => msg.clone(),
        _ => PAYMENT_FAILED.to_string(),
    }
}
