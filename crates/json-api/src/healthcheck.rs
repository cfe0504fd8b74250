//! Storefront Liveness

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

/// Liveness report.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Always `ok` while the process serves requests
    pub status: String,

    /// Name of the running service
    pub service: String,

    /// Crate version of the running build
    pub version: String,
}

/// Storefront liveness
///
/// Answers without touching the database.
#[endpoint(tags("health"), summary = "Storefront liveness")]
pub(crate) async fn handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        service: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use super::*;

    #[tokio::test]
    async fn test_liveness_names_the_storefront_build() -> TestResult {
        let router = Router::new().push(Router::with_path("healthcheck").get(handler));

        let mut response = TestClient::get("http://example.com/healthcheck")
            .send(&Service::new(router))
            .await;

        assert_eq!(response.status_code, Some(StatusCode::OK));

        let body: HealthResponse = response.take_json().await?;

        assert_eq!(body.status, "ok");
        assert_eq!(body.service, "storefront-json");
        assert_eq!(body.version, env!("CARGO_PKG_VERSION"));

        Ok(())
    }
}
