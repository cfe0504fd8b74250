//! Store Config

use clap::Args;

/// Currency and payment redirect settings.
#[derive(Debug, Args)]
pub struct StoreConfig {
    /// ISO 4217 code all prices are held in
    #[arg(long, env = "STORE_CURRENCY", default_value = "USD")]
    pub store_currency: String,

    /// Where customers land after a successful payment
    #[arg(long, env = "PAYMENT_SUCCESS_URL", default_value = "/checkout/success")]
    pub payment_success_url: String,

    /// Where customers land after a failed or cancelled payment
    #[arg(long, env = "PAYMENT_CANCEL_URL", default_value = "/checkout/cancel")]
    pub payment_cancel_url: String,

    /// Externally reachable base URL, used to build gateway return links
    #[arg(long, env = "PUBLIC_BASE_URL", default_value = "http://localhost:8698")]
    pub public_base_url: String,
}
