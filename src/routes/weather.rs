use std::net::SocketAddr;

use axum::{
    extract::{ConnectInfo, Query, Request, State},
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use tracing::{debug, error, info, warn};
use validator::Validate;

use crate::{auth, weather::fetch_weather, AppState};

// ---

const DEFAULT_LANG: &str = "en";

const FORWARDED_FOR: &str = "x-forwarded-for";

pub fn router(state: AppState) -> Router<AppState> {
    // ---
    Router::new()
        .route("/weather", get(handler))
        .route_layer(middleware::from_fn_with_state(state, auth::require_api_key))
}

/// Query parameters accepted by `GET /weather`
#[derive(Debug, Deserialize)]
struct WeatherQuery {
    /// "lat,lon" pair, e.g. "48.85,2.35"
    position: Option<String>,
    lang_iso: Option<String>,
}

async fn handler(
    State(state): State<AppState>,
    Query(params): Query<WeatherQuery>,
    request: Request,
) -> Response {
    // ---
    info!("GET /weather - Starting pipeline");

    let ip_address = client_ip(&request);
    let lang_iso = params.lang_iso.as_deref().unwrap_or(DEFAULT_LANG);

    debug!("position: {:?}", params.position);
    debug!("lang_iso: {}", lang_iso);
    debug!("ip_address: {:?}", ip_address);

    let weather = match fetch_weather(
        &state.http,
        &state.config,
        &state.conditions,
        params.position.as_deref(),
        ip_address.as_deref(),
        lang_iso,
    )
    .await
    {
        Ok(weather) => weather,
        Err(e) => {
            warn!("GET /weather - No weather data: {}", e);
            return StatusCode::BAD_REQUEST.into_response();
        }
    };

    if let Err(errors) = weather.validate() {
        error!("GET /weather - Weather data failed validation: {}", errors);
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }

    debug!(
        "GET /weather - Returning OK with {} hourly and {} daily points",
        weather.next_24h.len(),
        weather.next_days.len()
    );
    (StatusCode::OK, Json(weather)).into_response()
}

/// First `X-Forwarded-For` entry, else the peer address of the connection.
fn client_ip(request: &Request) -> Option<String> {
    // ---
    let forwarded = request
        .headers()
        .get(FORWARDED_FOR)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|ip| !ip.is_empty());

    if let Some(ip) = forwarded {
        return Some(ip.to_string());
    }

    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use axum::{body::Body, http};

    #[test]
    fn test_client_ip_from_forwarded_for() {
        // ---
        let request = http::Request::builder()
            .header(FORWARDED_FOR, "203.0.113.7, 10.0.0.1")
            .body(Body::empty())
            .unwrap();
        assert_eq!(client_ip(&request).as_deref(), Some("203.0.113.7"));
    }

    #[test]
    fn test_client_ip_from_connection() {
        // ---
        let mut request = http::Request::builder().body(Body::empty()).unwrap();
        request
            .extensions_mut()
            .insert(ConnectInfo(SocketAddr::from(([198, 51, 100, 4], 5555))));
        assert_eq!(client_ip(&request).as_deref(), Some("198.51.100.4"));
    }

    #[test]
    fn test_client_ip_unknown() {
        // ---
        let request = http::Request::builder().body(Body::empty()).unwrap();
        assert_eq!(client_ip(&request), None);
    }
}
