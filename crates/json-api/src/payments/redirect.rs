//! Payment redirects.

use salvo::{http::header::LOCATION, prelude::*};
use url::form_urlencoded::byte_serialize;

use storefront_app::domain::payments::records::PaymentOutcome;

use crate::{extensions::*, observability::observe_payment_outcome, state::PaymentRedirects};

impl PaymentRedirects {
    /// Where the browser goes for `outcome`.
    ///
    /// Failures carry their message as a `message` query parameter on the
    /// cancel URL.
    pub(crate) fn location(&self, outcome: &PaymentOutcome) -> String {
        if !outcome.success {
            let separator = if self.cancel_url.contains('?') { '&' } else { '?' };
            let message: String = byte_serialize(outcome.message.as_bytes()).collect();

            return format!("{}{separator}message={message}", self.cancel_url);
        }

        outcome
            .redirect_url
            .clone()
            .unwrap_or_else(|| self.success_url.clone())
    }
}

/// Answer `303 See Other` for a settled payment step and count it.
pub(crate) fn see_other(
    res: &mut Response,
    redirects: &PaymentRedirects,
    flow: &str,
    outcome: &PaymentOutcome,
) -> Result<StatusCode, StatusError> {
    observe_payment_outcome(flow, outcome.success);

    res.add_header(LOCATION, redirects.location(outcome), true)
        .or_500("failed to set location header")?;

    Ok(StatusCode::SEE_OTHER)
}
