//! Wall-clock time in the location's own timezone.

use chrono::{DateTime, Duration, TimeZone, Timelike, Utc};
use chrono_tz::Tz;

// ---

/// Current instant in the named IANA zone, or `None` if the zone is unknown.
///
/// There is no fallback zone: an unknown identifier aborts the request.
pub fn now_in_zone(tz_id: &str) -> Option<DateTime<Tz>> {
    // ---
    let tz: Tz = match tz_id.parse() {
        Ok(tz) => tz,
        Err(_) => {
            tracing::warn!("Unknown timezone: {}", tz_id);
            return None;
        }
    };
    Some(Utc::now().with_timezone(&tz))
}

/// Drop minutes, seconds and sub-seconds, keeping the zone.
pub fn truncate_to_hour<Z: TimeZone>(now: DateTime<Z>) -> DateTime<Z> {
    // ---
    let offset = Duration::minutes(i64::from(now.minute()))
        + Duration::seconds(i64::from(now.second()))
        + Duration::nanoseconds(i64::from(now.nanosecond()));
    now - offset
}
