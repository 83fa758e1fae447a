//! Fills in the request path of error envelopes.

use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use crate::errors::ErrorEnvelope;

/// `AppError` responses carry their envelope in the response extensions;
/// re-render it with the path of the request that failed.
pub async fn error_envelope_path(request: Request, next: Next) -> Response {
    let path = request.uri().path().to_string();
    let mut response = next.run(request).await;

    match response.extensions_mut().remove::<ErrorEnvelope>() {
        Some(mut envelope) => {
            envelope.path = path;
            (response.status(), Json(envelope)).into_response()
        }
        None => response,
    }
}
