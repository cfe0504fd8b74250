//! Payments service.
//!
//! Dispatches an order's payment to its gateway. PayPal orders are created
//! and captured through [`PaypalApi`]; every other gateway settles offline.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use serde_json::Value;
use sqlx::{Postgres, Transaction};
use storefront::{money::StoreCurrency, orders::PaymentStatus};
use tracing::{Span, info, warn};

use crate::{
    database::Db,
    domain::{
        customers::records::CustomerUuid,
        orders::{
            records::{OrderRecord, OrderUuid},
            repositories::PgOrdersRepository,
        },
        payments::{
            data::GatewaySettings,
            errors::PaymentsServiceError,
            paypal::{PaypalApi, PaypalCheckout, PaypalError},
            records::{PAYPAL, PaymentGatewayRecord, PaymentOutcome, PaypalCredentials},
            repository::PgGatewaysRepository,
        },
    },
};

/// PayPal webhook event that settles an order.
pub const CAPTURE_COMPLETED_EVENT: &str = "PAYMENT.CAPTURE.COMPLETED";

/// Where PayPal sends the customer back to.
#[derive(Debug, Clone)]
pub struct PaymentSettings {
    pub currency: StoreCurrency,
    pub public_base_url: String,
}

impl PaymentSettings {
    fn paypal_url(&self, order: OrderUuid, action: &str) -> String {
        format!(
            "{}/orders/{order}/payment/paypal/{action}",
            self.public_base_url.trim_end_matches('/')
        )
    }
}

#[derive(Clone)]
pub struct PgPaymentsService {
    db: Db,
    orders_repository: PgOrdersRepository,
    gateways_repository: PgGatewaysRepository,
    paypal: Arc<dyn PaypalApi>,
    settings: PaymentSettings,
}

impl PgPaymentsService {
    #[must_use]
    pub fn new(db: Db, paypal: Arc<dyn PaypalApi>, settings: PaymentSettings) -> Self {
        Self {
            db,
            orders_repository: PgOrdersRepository::new(),
            gateways_repository: PgGatewaysRepository::new(),
            paypal,
            settings,
        }
    }

    async fn enabled_gateway(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        slug: &str,
    ) -> Result<PaymentGatewayRecord, PaymentsServiceError> {
        self.gateways_repository
            .get_gateway(tx, slug)
            .await?
            .filter(|gateway| gateway.enabled)
            .ok_or(PaymentsServiceError::GatewayUnavailable)
    }

    async fn start_paypal(
        &self,
        order: &OrderRecord,
        gateway: &PaymentGatewayRecord,
    ) -> Result<PaymentOutcome, PaymentsServiceError> {
        let credentials = paypal_credentials(gateway)?;

        let checkout = PaypalCheckout {
            amount: self
                .settings
                .currency
                .decimal(order.total_amount)
                .map_err(|_range| PaymentsServiceError::InvalidData)?,
            currency: self.settings.currency.code().to_string(),
            reference: order.order_number.clone(),
            return_url: self.settings.paypal_url(order.uuid, "return"),
            cancel_url: self.settings.paypal_url(order.uuid, "cancel"),
        };

        let created = self
            .paypal
            .create_order(&credentials, gateway.mode, &checkout)
            .await?;

        let approve_url = created
            .approve_url
            .ok_or(PaypalError::MissingApprovalLink)?;

        let mut tx = self.db.begin().await?;

        let stored = self
            .orders_repository
            .set_payment_reference(
                &mut tx,
                order.uuid,
                &created.id,
                order.payment_reference.as_deref(),
            )
            .await?;

        tx.commit().await?;

        if stored.is_none() {
            warn!(
                paypal_order_id = %created.id,
                "order changed while paypal order was created"
            );

            return Ok(PaymentOutcome::failed("payment is already in progress"));
        }

        info!(paypal_order_id = %created.id, "paypal order created");

        Ok(PaymentOutcome::redirect(approve_url))
    }
}

impl std::fmt::Debug for PgPaymentsService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgPaymentsService")
            .field("db", &self.db)
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

fn paypal_credentials(
    gateway: &PaymentGatewayRecord,
) -> Result<PaypalCredentials, PaymentsServiceError> {
    gateway
        .mode_credentials()
        .cloned()
        .and_then(|value| serde_json::from_value(value).ok())
        .ok_or(PaymentsServiceError::GatewayMisconfigured)
}

#[async_trait]
impl PaymentsService for PgPaymentsService {
    #[tracing::instrument(
        name = "payments.service.pay_order",
        skip(self, proof),
        fields(
            customer_uuid = %customer,
            order_uuid = %order,
            payment_method = tracing::field::Empty
        ),
        err
    )]
    async fn pay_order(
        &self,
        customer: CustomerUuid,
        order: OrderUuid,
        proof: Option<String>,
    ) -> Result<PaymentOutcome, PaymentsServiceError> {
        let mut tx = self.db.begin().await?;

        let record = self
            .orders_repository
            .lock_customer_order(&mut tx, customer, order)
            .await?;

        if !record.awaiting_payment() {
            return Err(PaymentsServiceError::NotFound);
        }

        Span::current().record("payment_method", record.payment_method.as_str());

        let gateway = self.enabled_gateway(&mut tx, &record.payment_method).await?;

        if gateway.is_paypal() {
            tx.commit().await?;

            return self.start_paypal(&record, &gateway).await;
        }

        let proof = proof
            .map(|proof| proof.trim().to_string())
            .filter(|proof| !proof.is_empty());

        if gateway.require_proof && proof.is_none() {
            return Ok(PaymentOutcome::failed("a payment proof is required"));
        }

        let updated = self
            .orders_repository
            .record_payment_proof(&mut tx, order, proof.as_deref())
            .await?;

        tx.commit().await?;

        info!(gateway = %gateway.slug, "offline payment recorded");

        Ok(PaymentOutcome::completed(format!(
            "order {} is being processed",
            updated.order_number
        )))
    }

    #[tracing::instrument(
        name = "payments.service.complete_paypal",
        skip(self, token),
        fields(customer_uuid = %customer, order_uuid = %order),
        err
    )]
    async fn complete_paypal(
        &self,
        customer: CustomerUuid,
        order: OrderUuid,
        token: &str,
    ) -> Result<PaymentOutcome, PaymentsServiceError> {
        let mut tx = self.db.begin().await?;

        let record = self
            .orders_repository
            .get_customer_order(&mut tx, customer, order)
            .await?;

        if !record.awaiting_payment() {
            return Err(PaymentsServiceError::NotFound);
        }

        if record.payment_reference.as_deref() != Some(token) {
            return Ok(PaymentOutcome::failed(
                "payment does not belong to this order",
            ));
        }

        let gateway = self.enabled_gateway(&mut tx, PAYPAL).await?;

        tx.commit().await?;

        let credentials = paypal_credentials(&gateway)?;

        let capture = self
            .paypal
            .capture_order(&credentials, gateway.mode, token)
            .await?;

        if !capture.is_completed() {
            warn!(status = %capture.status, "paypal capture not completed");

            return Ok(PaymentOutcome::failed("payment was not completed"));
        }

        let mut tx = self.db.begin().await?;

        let paid = self.orders_repository.mark_paid(&mut tx, order).await?;

        tx.commit().await?;

        if paid.is_none() {
            warn!(
                capture_id = %capture.id,
                "captured payment for an order that can no longer be paid"
            );

            return Ok(PaymentOutcome::failed("order can no longer be paid"));
        }

        info!(capture_id = %capture.id, "paypal payment completed");

        Ok(PaymentOutcome::completed("payment completed"))
    }

    async fn cancel_paypal(
        &self,
        customer: CustomerUuid,
        order: OrderUuid,
    ) -> Result<PaymentOutcome, PaymentsServiceError> {
        let mut tx = self.db.begin().await?;

        self.orders_repository
            .get_customer_order(&mut tx, customer, order)
            .await?;

        tx.commit().await?;

        Ok(PaymentOutcome::failed("payment was cancelled"))
    }

    #[tracing::instrument(
        name = "payments.service.handle_webhook",
        skip(self, payload),
        fields(event_type = tracing::field::Empty),
        err
    )]
    async fn handle_webhook(
        &self,
        gateway: &str,
        payload: Value,
    ) -> Result<(), PaymentsServiceError> {
        let mut tx = self.db.begin().await?;

        let gateway = self.enabled_gateway(&mut tx, gateway).await?;

        let event_type = payload
            .get("event_type")
            .and_then(Value::as_str)
            .unwrap_or_default();

        Span::current().record("event_type", event_type);

        if gateway.is_paypal() && event_type == CAPTURE_COMPLETED_EVENT {
            let reference = payload
                .pointer("/resource/supplementary_data/related_ids/order_id")
                .and_then(Value::as_str)
                .ok_or(PaymentsServiceError::InvalidData)?;

            let order = self
                .orders_repository
                .lock_order_by_reference(&mut tx, PAYPAL, reference)
                .await?;

            match order {
                Some(order) => {
                    let paid = self.orders_repository.mark_paid(&mut tx, order.uuid).await?;

                    match paid {
                        Some(_) => info!(order_uuid = %order.uuid, "order paid by webhook"),
                        None if order.payment_status == PaymentStatus::Paid => {}
                        None => warn!(
                            order_uuid = %order.uuid,
                            status = %order.status,
                            "webhook capture for an order that can no longer be paid"
                        ),
                    }
                }
                None => warn!(paypal_order_id = reference, "webhook for unknown order"),
            }
        }

        tx.commit().await?;

        Ok(())
    }

    #[tracing::instrument(
        name = "payments.service.set_gateway",
        skip(self, gateway),
        fields(slug = %gateway.slug, enabled = gateway.enabled),
        err
    )]
    async fn set_gateway(
        &self,
        gateway: GatewaySettings,
    ) -> Result<PaymentGatewayRecord, PaymentsServiceError> {
        let gateway = gateway.validated()?;

        let mut tx = self.db.begin().await?;

        let saved = self.gateways_repository.upsert_gateway(&mut tx, &gateway).await?;

        tx.commit().await?;

        info!(mode = %saved.mode, "payment gateway saved");

        Ok(saved)
    }

    async fn get_gateway(&self, slug: &str) -> Result<PaymentGatewayRecord, PaymentsServiceError> {
        let mut tx = self.db.begin().await?;

        let gateway = self.gateways_repository.get_gateway(&mut tx, slug).await?;

        tx.commit().await?;

        gateway.ok_or(PaymentsServiceError::NotFound)
    }

    async fn list_gateways(&self) -> Result<Vec<PaymentGatewayRecord>, PaymentsServiceError> {
        let mut tx = self.db.begin().await?;

        let gateways = self.gateways_repository.list_gateways(&mut tx).await?;

        tx.commit().await?;

        Ok(gateways)
    }
}

#[automock]
#[async_trait]
pub trait PaymentsService: Send + Sync {
    /// Dispatch payment of an order that is `new` and unpaid.
    async fn pay_order(
        &self,
        customer: CustomerUuid,
        order: OrderUuid,
        proof: Option<String>,
    ) -> Result<PaymentOutcome, PaymentsServiceError>;

    /// Capture the PayPal order the customer approved.
    async fn complete_paypal(
        &self,
        customer: CustomerUuid,
        order: OrderUuid,
        token: &str,
    ) -> Result<PaymentOutcome, PaymentsServiceError>;

    /// The customer abandoned PayPal approval. The order stays unpaid.
    async fn cancel_paypal(
        &self,
        customer: CustomerUuid,
        order: OrderUuid,
    ) -> Result<PaymentOutcome, PaymentsServiceError>;

    /// Handle a gateway notification.
    async fn handle_webhook(&self, gateway: &str, payload: Value)
    -> Result<(), PaymentsServiceError>;

    /// Create or replace a gateway's configuration.
    async fn set_gateway(
        &self,
        gateway: GatewaySettings,
    ) -> Result<PaymentGatewayRecord, PaymentsServiceError>;

    async fn get_gateway(&self, slug: &str) -> Result<PaymentGatewayRecord, PaymentsServiceError>;

    async fn list_gateways(&self) -> Result<Vec<PaymentGatewayRecord>, PaymentsServiceError>;
}
