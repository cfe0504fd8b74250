//! Error rendering

use salvo::{
    catcher::Catcher,
    http::ResBody,
    oapi::ToSchema,
    prelude::*,
};
use serde::{Deserialize, Serialize};

/// Body of every error response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ErrorResponse {
    pub message: String,
}

/// Catcher hook rendering any error status as `{ "message": ... }`.
///
/// Bodies a handler already wrote are left alone.
#[handler]
pub(crate) async fn render_error(res: &mut Response, ctrl: &mut FlowCtrl) {
    let Some(status) = res.status_code else {
        return;
    };

    if !status.is_client_error() && !status.is_server_error() {
        return;
    }

    let message = match &res.body {
        ResBody::Error(error) => error.brief.clone(),
        ResBody::None => status.canonical_reason().unwrap_or("Error").to_string(),
        _ => return,
    };

    res.render(Json(ErrorResponse { message }));

    ctrl.skip_rest();
}

/// Catcher used by the server.
pub(crate) fn catcher() -> Catcher {
    Catcher::default().hoop(render_error)
}
