//! `weather-gateway`: a thin endpoint over an upstream weather provider.
//!
//! `GET /weather` resolves a location from explicit coordinates or the client
//! IP, fetches a three-day forecast upstream, localizes condition text from a
//! static code table and returns a validated, stable response schema.
//!
//! Shared types are re-exported here (EMBP gateway) so handlers refer to
//! `crate::Config` and friends rather than to module paths.
use std::sync::Arc;

pub mod auth;
pub mod clock;
pub mod conditions;
pub mod config;
pub mod forecast;
pub mod models;
pub mod routes;
pub mod upstream;
pub mod weather;

pub use conditions::ConditionTable;
pub use config::Config;
pub use models::{
    Condition, CurrentWeather, DailyForecastPoint, HourlyForecastPoint, Location, WeatherData,
};

// ---

/// State shared by every request handler.
///
/// Everything in here is built once at startup and only read afterwards.
#[derive(Debug, Clone)]
pub struct AppState {
    // ---
    pub config: Arc<Config>,
    pub conditions: Arc<ConditionTable>,
    pub http: reqwest::Client,
}

impl AppState {
    pub fn new(config: Config, conditions: ConditionTable) -> Self {
        Self {
            config: Arc::new(config),
            conditions: Arc::new(conditions),
            http: reqwest::Client::new(),
        }
    }
}
