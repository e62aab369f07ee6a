//! API-key gate in front of the weather endpoint.
//!
//! Clients present their key either as `Authorization: Api-Key <key>` or in
//! an `X-Api-Key` header. A missing key is answered with 401, an unknown one
//! with 403; neither reaches the handler.

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::AppState;

// ---

const API_KEY_HEADER: &str = "x-api-key";

const API_KEY_SCHEME: &str = "Api-Key ";

/// Extract the client key from the request headers, if any.
fn presented_key(headers: &HeaderMap) -> Option<&str> {
    // ---
    let from_authorization = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix(API_KEY_SCHEME));

    from_authorization
        .or_else(|| headers.get(API_KEY_HEADER).and_then(|v| v.to_str().ok()))
        .map(str::trim)
        .filter(|k| !k.is_empty())
}

/// Middleware rejecting requests without a configured client key.
pub async fn require_api_key(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    // ---
    let allowed = match presented_key(request.headers()) {
        Some(key) => state.config.client_api_keys.iter().any(|k| k == key),
        None => {
            tracing::warn!("Rejected {} - missing API key", request.uri().path());
            return StatusCode::UNAUTHORIZED.into_response();
        }
    };

    if !allowed {
        tracing::warn!("Rejected {} - unknown API key", request.uri().path());
        return StatusCode::FORBIDDEN.into_response();
    }

    next.run(request).await
}
