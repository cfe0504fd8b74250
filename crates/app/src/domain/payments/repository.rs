//! Payment Gateways Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as, types::Json};
use serde_json::Value;

use crate::domain::payments::{data::GatewaySettings, records::PaymentGatewayRecord};

const GET_GATEWAY_SQL: &str = include_str!("sql/get_gateway.sql");
const LIST_GATEWAYS_SQL: &str = include_str!("sql/list_gateways.sql");
const UPSERT_GATEWAY_SQL: &str = include_str!("sql/upsert_gateway.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgGatewaysRepository;

impl PgGatewaysRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn get_gateway(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        slug: &str,
    ) -> Result<Option<PaymentGatewayRecord>, sqlx::Error> {
        query_as::<Postgres, PaymentGatewayRecord>(GET_GATEWAY_SQL)
            .bind(slug)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn list_gateways(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<PaymentGatewayRecord>, sqlx::Error> {
        query_as::<Postgres, PaymentGatewayRecord>(LIST_GATEWAYS_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn upsert_gateway(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        gateway: &GatewaySettings,
    ) -> Result<PaymentGatewayRecord, sqlx::Error> {
        query_as::<Postgres, PaymentGatewayRecord>(UPSERT_GATEWAY_SQL)
            .bind(&gateway.slug)
            .bind(&gateway.name)
            .bind(gateway.enabled)
            .bind(gateway.mode.as_str())
            .bind(Json(&gateway.credentials))
            .bind(gateway.require_proof)
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for PaymentGatewayRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let mode: String = row.try_get("mode")?;

        Ok(Self {
            slug: row.try_get("slug")?,
            name: row.try_get("name")?,
            enabled: row.try_get("enabled")?,
            mode: mode.parse().map_err(|error| sqlx::Error::ColumnDecode {
                index: "mode".to_string(),
                source: Box::new(error),
            })?,
            credentials: row.try_get::<Json<Value>, _>("credentials")?.0,
            require_proof: row.try_get("require_proof")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
