//! Token repository.

use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use uuid::Uuid;

use crate::{
    auth::models::ActiveApiToken,
    domain::customers::records::CustomerUuid,
};

const CREATE_TOKEN_SQL: &str = include_str!("sql/create_token.sql");
const FIND_ACTIVE_TOKEN_SQL: &str = include_str!("sql/find_active_token.sql");
const TOUCH_TOKEN_SQL: &str = include_str!("sql/touch_token.sql");
const REVOKE_TOKEN_SQL: &str = include_str!("sql/revoke_token.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgTokensRepository;

impl PgTokensRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_token(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        token_uuid: Uuid,
        customer: CustomerUuid,
        token_hash: &str,
    ) -> Result<(), sqlx::Error> {
        query(CREATE_TOKEN_SQL)
            .bind(token_uuid)
            .bind(customer.into_uuid())
            .bind(token_hash)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn find_active_token(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        token_uuid: Uuid,
    ) -> Result<Option<ActiveApiToken>, sqlx::Error> {
        query_as::<Postgres, ActiveApiToken>(FIND_ACTIVE_TOKEN_SQL)
            .bind(token_uuid)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn touch_token(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        token_uuid: Uuid,
    ) -> Result<(), sqlx::Error> {
        query(TOUCH_TOKEN_SQL)
            .bind(token_uuid)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn revoke_token(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        token_uuid: Uuid,
        customer: CustomerUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(REVOKE_TOKEN_SQL)
            .bind(token_uuid)
            .bind(customer.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for ActiveApiToken {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let role: String = row.try_get("role")?;

        Ok(Self {
            customer_uuid: CustomerUuid::from_uuid(row.try_get("customer_uuid")?),
            role: role.parse().map_err(|error| sqlx::Error::ColumnDecode {
                index: "role".to_string(),
                source: Box::new(error),
            })?,
            token_hash: row.try_get("token_hash")?,
        })
    }
}
