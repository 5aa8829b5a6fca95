use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Extension,
};

use crate::middleware::RequestId;

use super::{AppState, RelayError};

/// Forwards one GET to the upstream catalog and relays its JSON body as-is.
///
/// Every upstream failure collapses into the same [`RelayError`]; the
/// specific cause is only logged.
pub(super) async fn relay_products(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Response, RelayError> {
    match state.upstream.fetch_body().await {
        Ok(body) => {
            tracing::debug!(request_id = %req_id.0, bytes = body.len(), "relayed products");
            Ok(([(header::CONTENT_TYPE, "application/json")], body).into_response())
        }
        Err(e) => {
            tracing::error!(
                request_id = %req_id.0,
                upstream = state.upstream.url(),
                error = %e,
                "error fetching products data"
            );
            Err(RelayError)
        }
    }
}
