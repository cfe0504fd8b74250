//! PayPal Orders v2 client.

use async_trait::async_trait;
use mockall::automock;
use reqwest::{Client, header::CONTENT_TYPE};
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;

use crate::domain::payments::records::{GatewayMode, PaypalCredentials};

const SANDBOX_URL: &str = "https://api-m.sandbox.paypal.com";
const LIVE_URL: &str = "https://api-m.paypal.com";

/// Status PayPal reports for a captured order.
pub const CAPTURE_COMPLETED: &str = "COMPLETED";

/// What the customer is asked to approve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaypalCheckout {
    /// Amount as a plain decimal string, e.g. `20.00`.
    pub amount: String,
    pub currency: String,
    /// Our order number, echoed back as the purchase unit reference.
    pub reference: String,
    pub return_url: String,
    pub cancel_url: String,
}

/// A created PayPal order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaypalOrder {
    pub id: String,
    pub status: String,
    pub approve_url: Option<String>,
}

/// A capture attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaypalCapture {
    pub id: String,
    pub status: String,
}

impl PaypalCapture {
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.status == CAPTURE_COMPLETED
    }
}

#[derive(Debug, Error)]
pub enum PaypalError {
    #[error("paypal http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected response from PayPal: {0}")]
    UnexpectedResponse(String),

    #[error("PayPal order has no approval link")]
    MissingApprovalLink,
}

#[automock]
#[async_trait]
pub trait PaypalApi: Send + Sync {
    /// Create an order with intent `CAPTURE`.
    async fn create_order(
        &self,
        credentials: &PaypalCredentials,
        mode: GatewayMode,
        checkout: &PaypalCheckout,
    ) -> Result<PaypalOrder, PaypalError>;

    /// Capture an approved order.
    async fn capture_order(
        &self,
        credentials: &PaypalCredentials,
        mode: GatewayMode,
        order_id: &str,
    ) -> Result<PaypalCapture, PaypalError>;
}

/// [`PaypalApi`] over PayPal's REST API.
#[derive(Debug, Clone, Default)]
pub struct ReqwestPaypalClient {
    http: Client,
}

impl ReqwestPaypalClient {
    #[must_use]
    pub fn new() -> Self {
        Self {
            http: Client::new(),
        }
    }

    fn base_url(mode: GatewayMode) -> &'static str {
        match mode {
            GatewayMode::Live => LIVE_URL,
            GatewayMode::Sandbox | GatewayMode::Test => SANDBOX_URL,
        }
    }

    async fn access_token(
        &self,
        credentials: &PaypalCredentials,
        mode: GatewayMode,
    ) -> Result<String, PaypalError> {
        let url = format!("{}/v1/oauth2/token", Self::base_url(mode));

        let response = self
            .http
            .post(&url)
            .basic_auth(&credentials.client_id, Some(&credentials.client_secret))
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body("grant_type=client_credentials")
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();

            return Err(PaypalError::UnexpectedResponse(format!(
                "token request failed with status {status}: {text}"
            )));
        }

        let parsed: TokenResponse = response.json().await?;

        Ok(parsed.access_token)
    }
}

#[async_trait]
impl PaypalApi for ReqwestPaypalClient {
    async fn create_order(
        &self,
        credentials: &PaypalCredentials,
        mode: GatewayMode,
        checkout: &PaypalCheckout,
    ) -> Result<PaypalOrder, PaypalError> {
        let token = self.access_token(credentials, mode).await?;
        let url = format!("{}/v2/checkout/orders", Self::base_url(mode));

        let body = json!({
            "intent": "CAPTURE",
            "purchase_units": [{
                "reference_id": checkout.reference,
                "amount": {
                    "currency_code": checkout.currency,
                    "value": checkout.amount,
                },
            }],
            "application_context": {
                "return_url": checkout.return_url,
                "cancel_url": checkout.cancel_url,
            },
        });

        let response = self
            .http
            .post(&url)
            .bearer_auth(&token)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();

            return Err(PaypalError::UnexpectedResponse(format!(
                "create order failed with status {status}: {text}"
            )));
        }

        let parsed: OrderResponse = response.json().await?;

        let approve_url = parsed
            .links
            .into_iter()
            .find(|link| link.rel == "approve" || link.rel == "payer-action")
            .map(|link| link.href);

        Ok(PaypalOrder {
            id: parsed.id,
            status: parsed.status,
            approve_url,
        })
    }

    async fn capture_order(
        &self,
        credentials: &PaypalCredentials,
        mode: GatewayMode,
        order_id: &str,
    ) -> Result<PaypalCapture, PaypalError> {
        let token = self.access_token(credentials, mode).await?;
        let url = format!(
            "{}/v2/checkout/orders/{order_id}/capture",
            Self::base_url(mode)
        );

        let response = self
            .http
            .post(&url)
            .bearer_auth(&token)
            .json(&json!({}))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();

            return Err(PaypalError::UnexpectedResponse(format!(
                "capture failed with status {status}: {text}"
            )));
        }

        let parsed: CaptureResponse = response.json().await?;

        Ok(PaypalCapture {
            id: parsed.id,
            status: parsed.status,
        })
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct OrderResponse {
    id: String,
    status: String,
    #[serde(default)]
    links: Vec<LinkDescription>,
}

#[derive(Debug, Deserialize)]
struct LinkDescription {
    href: String,
    rel: String,
}

#[derive(Debug, Deserialize)]
struct CaptureResponse {
    id: String,
    status: String,
}
