//! Forecast slicers: the rolling 24-hour window and the daily summaries.

use chrono::{DateTime, Duration, TimeZone};

use crate::upstream::ForecastDay;
use crate::{Condition, ConditionTable, DailyForecastPoint, HourlyForecastPoint};

// ---

/// Hourly points with `now_hour <= time_epoch <= now_hour + 24h`.
///
/// Hours of all days are flattened in upstream order; each point is localized
/// with its own day/night flag.
pub fn next_24h<Z: TimeZone>(
    now_hour: &DateTime<Z>,
    days: &[ForecastDay],
    conditions: &ConditionTable,
    lang_iso: &str,
) -> Vec<HourlyForecastPoint> {
    // ---
    let start = now_hour.timestamp();
    let end = (now_hour.clone() + Duration::hours(24)).timestamp();

    days.iter()
        .flat_map(|day| day.hour.iter())
        .filter(|hour| (start..=end).contains(&hour.time_epoch))
        .map(|hour| HourlyForecastPoint {
            temp: hour.temp_c,
            humidity: hour.humidity,
            timestamp: hour.time_epoch,
            condition: Condition {
                code: hour.condition.code,
                text: conditions.lookup(hour.condition.code, hour.is_day, lang_iso),
                icon: None,
            },
        })
        .collect()
}

/// One summary per upstream day, always localized with day-mode text.
pub fn next_days(
    days: &[ForecastDay],
    conditions: &ConditionTable,
    lang_iso: &str,
) -> Vec<DailyForecastPoint> {
    // ---
    days.iter()
        .map(|day| DailyForecastPoint {
            min_temp: day.day.mintemp_c,
            max_temp: day.day.maxtemp_c,
            humidity: day.day.avghumidity,
            timestamp: day.date_epoch,
            condition: Condition {
                code: day.day.condition.code,
                text: conditions.lookup(day.day.condition.code, true, lang_iso),
                icon: None,
            },
        })
        .collect()
}
