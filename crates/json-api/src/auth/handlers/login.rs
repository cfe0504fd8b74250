//! Login Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    auth::{errors::into_status_error, models::SessionResponse},
    extensions::*,
    state::State,
};

/// Login Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login Handler
///
/// Exchanges credentials for a new bearer token.
#[endpoint(
    tags("auth"),
    summary = "Login",
    responses(
        (status_code = StatusCode::OK, description = "Token issued"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Wrong email or password"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<LoginRequest>,
    depot: &mut Depot,
) -> Result<Json<SessionResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();

    let session = state
        .app
        .auth
        .login(&request.email, &request.password)
        .await
        .map_err(into_status_error)?;

    Ok(Json(session.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use storefront_app::{
        auth::{AuthServiceError, MockAuthService, Session},
        domain::customers::records::CustomerUuid,
    };

    use crate::{
        errors::ErrorResponse,
        test_helpers::{Mocks, make_customer, public_service},
    };

    use super::*;

    fn make_service(auth: MockAuthService) -> Service {
        public_service(
            Mocks {
                auth,
                ..Mocks::default()
            },
            Router::with_path("auth/login").post(handler),
        )
    }

    #[tokio::test]
    async fn test_login_returns_token() -> TestResult {
        let customer = make_customer(CustomerUuid::new());

        let mut auth = MockAuthService::new();

        auth.expect_login()
            .once()
            .withf(|email, password| email == "ada@example.com" && password == "correct horse")
            .return_once(move |_, _| {
                Ok(Session {
                    token: "sf_v1_fresh".to_string(),
                    customer,
                })
            });

        let mut res = TestClient::post("http://example.com/auth/login")
            .json(&json!({ "email": "ada@example.com", "password": "correct horse" }))
            .send(&make_service(auth))
            .await;

        let body: SessionResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.token, "sf_v1_fresh");

        Ok(())
    }

    #[tokio::test]
    async fn test_wrong_password_returns_401_message() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_login()
            .once()
            .return_once(|_, _| Err(AuthServiceError::InvalidCredentials));

        let mut res = TestClient::post("http://example.com/auth/login")
            .json(&json!({ "email": "ada@example.com", "password": "wrong" }))
            .send(&make_service(auth))
            .await;

        let body: ErrorResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));
        assert_eq!(body.message, "Email or password is incorrect");

        Ok(())
    }
}
