//! Auth service.

use async_trait::async_trait;
use mockall::automock;
use sqlx::{Postgres, Transaction};
use tracing::{Span, info};
use uuid::Uuid;

use crate::{
    auth::{
        ApiTokenVersion, AuthServiceError, AuthenticatedCustomer, Registration, Session,
        format_api_token, generate_api_token_secret, hash_api_token, hash_password,
        parse_api_token, repository::PgTokensRepository, verify_password,
    },
    database::Db,
    domain::customers::{
        CustomersServiceError,
        data::{NewCustomer, normalize_email},
        records::{CustomerRecord, CustomerRole, CustomerUuid},
        repository::{CustomerRecordInput, PgCustomersRepository},
    },
};

#[derive(Debug, Clone)]
pub struct PgAuthService {
    db: Db,
    customers: PgCustomersRepository,
    tokens: PgTokensRepository,
}

impl PgAuthService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            customers: PgCustomersRepository::new(),
            tokens: PgTokensRepository::new(),
        }
    }

    async fn issue_token(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: CustomerUuid,
    ) -> Result<String, AuthServiceError> {
        let token_uuid = Uuid::now_v7();
        let secret = generate_api_token_secret();
        let token = format_api_token(token_uuid, ApiTokenVersion::V1, &secret);

        self.tokens
            .create_token(tx, token_uuid, customer, &hash_api_token(&token))
            .await?;

        Ok(token)
    }
}

#[async_trait]
impl AuthService for PgAuthService {
    #[tracing::instrument(
        name = "auth.service.register",
        skip(self, registration),
        fields(customer_uuid = tracing::field::Empty),
        err
    )]
    async fn register(&self, registration: Registration) -> Result<Session, AuthServiceError> {
        let customer = NewCustomer {
            uuid: CustomerUuid::new(),
            email: registration.email,
            name: registration.name,
            password: registration.password,
            role: CustomerRole::Customer,
        }
        .validated()?;

        let password_hash = hash_password(&customer.password)?;

        let mut tx = self.db.begin().await?;

        let created = self
            .customers
            .create_customer(
                &mut tx,
                &CustomerRecordInput {
                    uuid: customer.uuid,
                    email: &customer.email,
                    name: &customer.name,
                    password_hash: &password_hash,
                    role: customer.role,
                },
            )
            .await
            .map_err(CustomersServiceError::from)?;

        let token = self.issue_token(&mut tx, created.uuid).await?;

        tx.commit().await?;

        Span::current().record("customer_uuid", tracing::field::display(created.uuid));

        info!("customer registered");

        Ok(Session {
            token,
            customer: created,
        })
    }

    #[tracing::instrument(
        name = "auth.service.login",
        skip(self, email, password),
        fields(customer_uuid = tracing::field::Empty),
        err
    )]
    async fn login(&self, email: &str, password: &str) -> Result<Session, AuthServiceError> {
        let email = normalize_email(email).map_err(|_source| AuthServiceError::InvalidCredentials)?;

        let mut tx = self.db.begin().await?;

        let credentials = self
            .customers
            .find_credentials(&mut tx, &email)
            .await?
            .ok_or(AuthServiceError::InvalidCredentials)?;

        if !verify_password(password, &credentials.password_hash) {
            return Err(AuthServiceError::InvalidCredentials);
        }

        let token = self.issue_token(&mut tx, credentials.customer.uuid).await?;

        tx.commit().await?;

        Span::current().record(
            "customer_uuid",
            tracing::field::display(credentials.customer.uuid),
        );

        Ok(Session {
            token,
            customer: credentials.customer,
        })
    }

    async fn authenticate_bearer(
        &self,
        bearer_token: &str,
    ) -> Result<AuthenticatedCustomer, AuthServiceError> {
        let parsed_token =
            parse_api_token(bearer_token).map_err(|_source| AuthServiceError::NotFound)?;

        let mut tx = self.db.begin().await?;

        let token = self
            .tokens
            .find_active_token(&mut tx, parsed_token.token_uuid)
            .await?
            .ok_or(AuthServiceError::NotFound)?;

        if token.token_hash != hash_api_token(bearer_token) {
            return Err(AuthServiceError::NotFound);
        }

        self.tokens
            .touch_token(&mut tx, parsed_token.token_uuid)
            .await?;

        tx.commit().await?;

        Ok(AuthenticatedCustomer {
            customer_uuid: token.customer_uuid,
            token_uuid: parsed_token.token_uuid,
            role: token.role,
        })
    }

    async fn current_customer(
        &self,
        customer: CustomerUuid,
    ) -> Result<CustomerRecord, AuthServiceError> {
        let mut tx = self.db.begin().await?;

        let record = self
            .customers
            .get_customer(&mut tx, customer)
            .await
            .map_err(CustomersServiceError::from)?;

        tx.commit().await?;

        Ok(record)
    }

    #[tracing::instrument(
        name = "auth.service.logout",
        skip(self, session),
        fields(customer_uuid = %session.customer_uuid),
        err
    )]
    async fn logout(&self, session: AuthenticatedCustomer) -> Result<(), AuthServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self
            .tokens
            .revoke_token(&mut tx, session.token_uuid, session.customer_uuid)
            .await?;

        if rows_affected == 0 {
            return Err(AuthServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Create a customer account and issue its first token.
    async fn register(&self, registration: Registration) -> Result<Session, AuthServiceError>;

    /// Exchange email and password for a new token.
    async fn login(&self, email: &str, password: &str) -> Result<Session, AuthServiceError>;

    /// Resolve a presented bearer token to its customer.
    async fn authenticate_bearer(
        &self,
        bearer_token: &str,
    ) -> Result<AuthenticatedCustomer, AuthServiceError>;

    /// Load the profile of an authenticated customer.
    async fn current_customer(
        &self,
        customer: CustomerUuid,
    ) -> Result<CustomerRecord, AuthServiceError>;

    /// Revoke the token used for this request.
    async fn logout(&self, session: AuthenticatedCustomer) -> Result<(), AuthServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::test::TestContext;

    use super::*;

    fn registration(email: &str) -> Registration {
        Registration {
            email: email.to_string(),
            name: "Grace Hopper".to_string(),
            password: "a-very-long-password".to_string(),
        }
    }

    #[tokio::test]
    async fn registered_token_authenticates() -> TestResult {
        let ctx = TestContext::new().await;

        let session = ctx.auth.register(registration("grace@example.com")).await?;
        let authenticated = ctx.auth.authenticate_bearer(&session.token).await?;

        assert_eq!(authenticated.customer_uuid, session.customer.uuid);
        assert_eq!(authenticated.role, CustomerRole::Customer);

        Ok(())
    }

    #[tokio::test]
    async fn login_with_correct_password_issues_new_token() -> TestResult {
        let ctx = TestContext::new().await;

        let registered = ctx.auth.register(registration("grace@example.com")).await?;
        let session = ctx
            .auth
            .login("GRACE@example.com", "a-very-long-password")
            .await?;

        assert_ne!(session.token, registered.token);
        assert_eq!(session.customer.uuid, registered.customer.uuid);

        Ok(())
    }

    #[tokio::test]
    async fn login_with_wrong_password_is_rejected() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.auth.register(registration("grace@example.com")).await?;

        let result = ctx.auth.login("grace@example.com", "not-the-password").await;

        assert!(
            matches!(result, Err(AuthServiceError::InvalidCredentials)),
            "expected InvalidCredentials, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn login_with_unknown_email_is_rejected() {
        let ctx = TestContext::new().await;

        let result = ctx.auth.login("nobody@example.com", "whatever-password").await;

        assert!(
            matches!(result, Err(AuthServiceError::InvalidCredentials)),
            "expected InvalidCredentials, got {result:?}"
        );
    }

    #[tokio::test]
    async fn tampered_token_is_rejected() -> TestResult {
        let ctx = TestContext::new().await;

        let session = ctx.auth.register(registration("grace@example.com")).await?;
        let (id, _secret) = session.token.split_once('.').ok_or("token has no secret")?;
        let tampered = format!("{id}.{}", "00".repeat(32));

        let result = ctx.auth.authenticate_bearer(&tampered).await;

        assert!(
            matches!(result, Err(AuthServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn logout_revokes_token() -> TestResult {
        let ctx = TestContext::new().await;

        let session = ctx.auth.register(registration("grace@example.com")).await?;
        let authenticated = ctx.auth.authenticate_bearer(&session.token).await?;

        ctx.auth.logout(authenticated).await?;

        let result = ctx.auth.authenticate_bearer(&session.token).await;

        assert!(
            matches!(result, Err(AuthServiceError::NotFound)),
            "expected NotFound after logout, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn duplicate_registration_is_rejected() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.auth.register(registration("grace@example.com")).await?;

        let result = ctx.auth.register(registration("grace@example.com")).await;

        assert!(
            matches!(
                result,
                Err(AuthServiceError::Registration(
                    CustomersServiceError::AlreadyExists
                ))
            ),
            "expected AlreadyExists, got {result:?}"
        );

        Ok(())
    }
}
