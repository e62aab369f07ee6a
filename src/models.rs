//! Response schema served by `GET /weather`.
//!
//! Every type carries its declared bounds as `validator` rules; a reshaped
//! payload is only returned to the client after `WeatherData::validate`
//! passes.

use serde::{Deserialize, Serialize};
use validator::Validate;

// ---

/// Lowest accepted temperature in °C.
pub const TEMP_MIN: f64 = -273.17;

/// Highest accepted temperature in °C.
pub const TEMP_MAX: f64 = 90.0;

/// Weather condition with localized text.
#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
pub struct Condition {
    // ---
    pub code: i64,

    /// `None` when the code is missing from the condition table.
    #[validate(required, length(max = 200))]
    pub text: Option<String>,

    /// Never populated by the reshaping step.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<i64>,
}

/// Location as reported by the upstream provider, passed through as-is.
///
/// Only `tz_id` is needed before reshaping; every other field may be absent
/// or `null` upstream and is rejected by validation instead of decoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Location {
    // ---
    #[validate(required, length(max = 200))]
    pub name: Option<String>,

    #[validate(required, length(max = 200))]
    pub region: Option<String>,

    #[validate(required, length(max = 200))]
    pub country: Option<String>,

    #[validate(required, range(min = -90.0, max = 90.0))]
    pub lat: Option<f64>,

    #[validate(required, range(min = -180.0, max = 180.0))]
    pub lon: Option<f64>,

    #[validate(length(max = 50))]
    pub tz_id: String,

    #[validate(required)]
    pub localtime_epoch: Option<i64>,

    #[validate(required, length(max = 20))]
    pub localtime: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
pub struct CurrentWeather {
    // ---
    #[validate(range(min = TEMP_MIN, max = TEMP_MAX))]
    pub temp: f64,

    #[validate(range(min = TEMP_MIN, max = TEMP_MAX))]
    pub min_temp: f64,

    #[validate(range(min = TEMP_MIN, max = TEMP_MAX))]
    pub max_temp: f64,

    pub is_day: bool,

    #[validate(range(min = TEMP_MIN, max = TEMP_MAX))]
    pub feels_like: f64,

    #[validate(nested)]
    pub condition: Condition,
}

#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
pub struct HourlyForecastPoint {
    // ---
    #[validate(range(min = TEMP_MIN, max = TEMP_MAX))]
    pub temp: f64,

    #[validate(range(min = 0.0, max = 100.0))]
    pub humidity: f64,

    pub timestamp: i64,

    #[validate(nested)]
    pub condition: Condition,
}

#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
pub struct DailyForecastPoint {
    // ---
    #[validate(range(min = TEMP_MIN, max = TEMP_MAX))]
    pub min_temp: f64,

    #[validate(range(min = TEMP_MIN, max = TEMP_MAX))]
    pub max_temp: f64,

    #[validate(range(min = 0.0, max = 100.0))]
    pub humidity: f64,

    pub timestamp: i64,

    #[validate(nested)]
    pub condition: Condition,
}

/// Root response body.
#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
pub struct WeatherData {
    // ---
    pub last_updated: i64,

    #[validate(length(max = 100))]
    pub source: String,

    #[validate(url)]
    pub source_link: String,

    #[validate(nested)]
    pub location: Location,

    #[validate(nested)]
    pub current: CurrentWeather,

    #[validate(nested)]
    pub next_24h: Vec<HourlyForecastPoint>,

    #[validate(nested)]
    pub next_days: Vec<DailyForecastPoint>,
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;

    fn condition(text: Option<&str>) -> Condition {
        Condition {
            code: 1000,
            text: text.map(String::from),
            icon: None,
        }
    }

    fn create_test_weather(temp: f64) -> WeatherData {
        // ---
        WeatherData {
            last_updated: 1_700_000_000,
            source: "WeatherAPI".to_string(),
            source_link: "https://www.weatherapi.com/".to_string(),
            location: Location {
                name: Some("Paris".to_string()),
                region: Some("Ile-de-France".to_string()),
                country: Some("France".to_string()),
                lat: Some(48.87),
                lon: Some(2.33),
                tz_id: "Europe/Paris".to_string(),
                localtime_epoch: Some(1_700_000_000),
                localtime: Some("2023-11-14 23:13".to_string()),
            },
            current: CurrentWeather {
                temp,
                min_temp: 4.0,
                max_temp: 11.0,
                is_day: true,
                feels_like: 6.5,
                condition: condition(Some("Sunny")),
            },
            next_24h: vec![HourlyForecastPoint {
                temp: 7.0,
                humidity: 80.0,
                timestamp: 1_700_000_000,
                condition: condition(Some("Sunny")),
            }],
            next_days: vec![DailyForecastPoint {
                min_temp: 4.0,
                max_temp: 11.0,
                humidity: 75.0,
                timestamp: 1_699_920_000,
                condition: condition(Some("Sunny")),
            }],
        }
    }

    #[test]
    fn test_valid_payload_passes() {
        // ---
        assert!(create_test_weather(8.0).validate().is_ok());
    }

    #[test]
    fn test_temperature_bounds() {
        // ---
        assert!(create_test_weather(-300.0).validate().is_err());
        assert!(create_test_weather(90.5).validate().is_err());

        // Edge cases
        assert!(create_test_weather(TEMP_MIN).validate().is_ok());
        assert!(create_test_weather(TEMP_MAX).validate().is_ok());
    }

    #[test]
    fn test_humidity_bounds() {
        // ---
        let mut weather = create_test_weather(8.0);
        weather.next_24h[0].humidity = 101.0;
        assert!(weather.validate().is_err());

        let mut weather = create_test_weather(8.0);
        weather.next_days[0].humidity = -1.0;
        assert!(weather.validate().is_err());
    }

    #[test]
    fn test_missing_condition_text_fails() {
        // ---
        let mut weather = create_test_weather(8.0);
        weather.next_24h[0].condition = condition(None);
        assert!(weather.validate().is_err());
    }

    #[test]
    fn test_location_bounds() {
        // ---
        let mut weather = create_test_weather(8.0);
        weather.location.lat = Some(91.0);
        assert!(weather.validate().is_err());

        let mut weather = create_test_weather(8.0);
        weather.location.tz_id = "x".repeat(51);
        assert!(weather.validate().is_err());
    }

    #[test]
    fn test_missing_location_fields_fail() {
        // ---
        let mut weather = create_test_weather(8.0);
        weather.location.region = None;
        assert!(weather.validate().is_err());

        let mut weather = create_test_weather(8.0);
        weather.location.lon = None;
        assert!(weather.validate().is_err());
    }

    #[test]
    fn test_location_decodes_with_missing_or_null_fields() {
        // ---
        let raw = r#"{"name": "Paris", "region": null, "tz_id": "Europe/Paris"}"#;
        let location: Location = serde_json::from_str(raw).unwrap();
        assert_eq!(location.region, None);
        assert_eq!(location.country, None);
        assert!(location.validate().is_err());

        // tz_id is still mandatory
        assert!(serde_json::from_str::<Location>(r#"{"name": "Paris"}"#).is_err());
    }

    #[test]
    fn test_source_link_must_be_url() {
        // ---
        let mut weather = create_test_weather(8.0);
        weather.source_link = "not a url".to_string();
        assert!(weather.validate().is_err());
    }

    #[test]
    fn test_icon_omitted_from_json() {
        // ---
        let json = serde_json::to_value(create_test_weather(8.0)).unwrap();
        assert_eq!(json["current"]["condition"]["text"], "Sunny");
        assert!(json["current"]["condition"].get("icon").is_none());
    }
}
