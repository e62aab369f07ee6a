//! Upstream forecast fetch and reshaping into [`WeatherData`].
//!
//! Location selection, one call to the provider's `forecast.json`, timezone
//! resolution and the mapping into the response schema. Every failure is
//! reported as a [`FetchError`]; callers treat all variants alike.

use std::sync::LazyLock;

use chrono::DateTime;
use chrono_tz::Tz;
use regex::Regex;
use reqwest::{Client, StatusCode};
use thiserror::Error;

use crate::upstream::ForecastResponse;
use crate::{clock, forecast, Condition, ConditionTable, Config, CurrentWeather, WeatherData};

// ---

/// Number of forecast days requested from the provider.
pub const FORECAST_DAYS: u8 = 3;

static POSITION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^-?\d+(\.\d+)?,-?\d+(\.\d+)?").expect("position pattern is valid")
});

static IPV4_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^((25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)\.){3}(25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)$",
    )
    .expect("ipv4 pattern is valid")
});

/// Why a forecast could not be produced.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("neither position {position:?} nor ip address {ip_address:?} is usable")]
    UnresolvableLocation {
        position: Option<String>,
        ip_address: Option<String>,
    },

    #[error("upstream request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("upstream returned status {0}")]
    Status(StatusCode),

    #[error("upstream payload could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("upstream payload is missing {0}")]
    MissingField(&'static str),

    #[error("unknown timezone {0:?}")]
    UnknownTimezone(String),
}

/// The `q` value sent upstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocationQuery {
    Position(String),
    IpAddress(String),
}

impl LocationQuery {
    // ---
    /// Pick the location source. A position matching `lat,lon` wins over a
    /// dotted-quad IPv4 address; anything else is unresolvable.
    pub fn resolve(position: Option<&str>, ip_address: Option<&str>) -> Option<Self> {
        // ---
        if let Some(position) = position.filter(|p| POSITION_PATTERN.is_match(p)) {
            return Some(Self::Position(position.to_string()));
        }
        ip_address
            .filter(|ip| IPV4_PATTERN.is_match(ip))
            .map(|ip| Self::IpAddress(ip.to_string()))
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Position(p) => p,
            Self::IpAddress(ip) => ip,
        }
    }
}

/// Fetch the forecast for a location and reshape it.
pub async fn fetch_weather(
    client: &Client,
    config: &Config,
    conditions: &ConditionTable,
    position: Option<&str>,
    ip_address: Option<&str>,
    lang_iso: &str,
) -> Result<WeatherData, FetchError> {
    // ---
    let query = LocationQuery::resolve(position, ip_address).ok_or_else(|| {
        FetchError::UnresolvableLocation {
            position: position.map(String::from),
            ip_address: ip_address.map(String::from),
        }
    })?;

    let url = format!("{}/forecast.json", config.api_base_url);
    let days = FORECAST_DAYS.to_string();

    tracing::debug!("Fetching forecast for q={} from {}", query.as_str(), url);

    let response = client
        .get(&url)
        .query(&[
            ("key", config.api_key.as_str()),
            ("q", query.as_str()),
            ("days", days.as_str()),
            ("aqi", "no"),
            ("alerts", "no"),
        ])
        .send()
        .await?;

    let status = response.status();
    if status != StatusCode::OK {
        return Err(FetchError::Status(status));
    }

    let body = response.text().await?;
    let payload: ForecastResponse = serde_json::from_str(&body)?;

    let now = clock::now_in_zone(&payload.location.tz_id)
        .ok_or_else(|| FetchError::UnknownTimezone(payload.location.tz_id.clone()))?;

    reshape(payload, now, config, conditions, lang_iso)
}

/// Map the upstream payload into the response schema.
///
/// `now` is the current instant in the location's zone; the 24-hour window
/// is anchored on its hour boundary.
pub fn reshape(
    payload: ForecastResponse,
    now: DateTime<Tz>,
    config: &Config,
    conditions: &ConditionTable,
    lang_iso: &str,
) -> Result<WeatherData, FetchError> {
    // ---
    let now_hour = clock::truncate_to_hour(now);
    let days = &payload.forecast.forecastday;
    let today = days
        .first()
        .ok_or(FetchError::MissingField("forecast.forecastday[0]"))?;

    let current = &payload.current;
    let current = CurrentWeather {
        temp: current.temp_c,
        min_temp: today.day.mintemp_c,
        max_temp: today.day.maxtemp_c,
        is_day: current.is_day,
        feels_like: current.feelslike_c,
        condition: Condition {
            code: current.condition.code,
            text: conditions.lookup(current.condition.code, current.is_day, lang_iso),
            icon: None,
        },
    };

    Ok(WeatherData {
        last_updated: payload.current.last_updated_epoch,
        source: config.source_name.clone(),
        source_link: config.source_link.clone(),
        next_24h: forecast::next_24h(&now_hour, days, conditions, lang_iso),
        next_days: forecast::next_days(days, conditions, lang_iso),
        location: payload.location,
        current,
    })
}
