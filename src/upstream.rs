//! Raw payload of the upstream `forecast.json` endpoint.
//!
//! Only the fields the reshaping step consumes are declared; everything else
//! in the provider's response is ignored. A missing field fails decoding.

use serde::{Deserialize, Deserializer};

use crate::Location;

// ---

#[derive(Debug, Deserialize)]
pub struct ForecastResponse {
    pub location: Location,
    pub current: RawCurrent,
    pub forecast: RawForecast,
}

#[derive(Debug, Deserialize)]
pub struct RawCondition {
    pub code: i64,
}

#[derive(Debug, Deserialize)]
pub struct RawCurrent {
    pub last_updated_epoch: i64,
    pub temp_c: f64,
    pub feelslike_c: f64,
    #[serde(deserialize_with = "flag")]
    pub is_day: bool,
    pub condition: RawCondition,
}

#[derive(Debug, Deserialize)]
pub struct RawForecast {
    pub forecastday: Vec<ForecastDay>,
}

/// One day bucket: daily summary plus its hourly points.
#[derive(Debug, Deserialize)]
pub struct ForecastDay {
    pub date_epoch: i64,
    pub day: RawDay,
    pub hour: Vec<RawHour>,
}

#[derive(Debug, Deserialize)]
pub struct RawDay {
    pub mintemp_c: f64,
    pub maxtemp_c: f64,
    pub avghumidity: f64,
    pub condition: RawCondition,
}

#[derive(Debug, Deserialize)]
pub struct RawHour {
    pub time_epoch: i64,
    pub temp_c: f64,
    pub humidity: f64,
    #[serde(deserialize_with = "flag")]
    pub is_day: bool,
    pub condition: RawCondition,
}

/// The provider encodes day/night as `0`/`1`; accept a JSON bool as well.
fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Int(i64),
        Bool(bool),
    }

    Ok(match Flag::deserialize(deserializer)? {
        Flag::Int(n) => n != 0,
        Flag::Bool(b) => b,
    })
}
