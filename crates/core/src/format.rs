//! Presentation helpers for the list view.

use chrono::{DateTime, Utc};

use crate::document::TimestampLike;

pub const NOT_AVAILABLE: &str = "N/A";

/// Render a timestamp-like value as `DD/MM/YYYY` (UTC), or `"N/A"`.
///
/// Tried in order: native store timestamp, concrete instant, object with a
/// non-zero `seconds` field. Anything else, including date strings, is `"N/A"`.
pub fn format_display_date(value: impl Into<TimestampLike>) -> String {
    match display_instant(&value.into()) {
        Some(at) => at.format("%d/%m/%Y").to_string(),
        None => NOT_AVAILABLE.to_string(),
    }
}

fn display_instant(value: &TimestampLike) -> Option<DateTime<Utc>> {
    match value {
        TimestampLike::Store(ts) => ts.to_datetime(),
        TimestampLike::DateTime(at) => Some(*at),
        TimestampLike::EpochSeconds(seconds) if *seconds != 0.0 && seconds.is_finite() => {
            DateTime::from_timestamp_millis((seconds * 1000.0) as i64)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::{json, Value};

    #[test]
    fn epoch_seconds_object() {
        assert_eq!(format_display_date(&json!({"seconds": 1_700_000_000})), "14/11/2023");
        assert_eq!(format_display_date(&json!({"seconds": "1700000000"})), "14/11/2023");
    }

    #[test]
    fn absent_and_unparseable() {
        assert_eq!(format_display_date(None::<&Value>), NOT_AVAILABLE);
        assert_eq!(format_display_date(&Value::Null), NOT_AVAILABLE);
        assert_eq!(format_display_date(&json!("not a date")), NOT_AVAILABLE);
        assert_eq!(format_display_date(&json!({"seconds": 0})), NOT_AVAILABLE);
        assert_eq!(format_display_date(&json!({"minutes": 3})), NOT_AVAILABLE);
        assert_eq!(format_display_date(&json!(true)), NOT_AVAILABLE);
    }

    #[test]
    fn out_of_range_seconds_is_not_available() {
        assert_eq!(format_display_date(&json!({"seconds": 1e300})), NOT_AVAILABLE);
    }

    #[test]
    fn native_timestamp_and_instant() {
        let tagged = json!({"_type": "timestamp", "seconds": 0, "nanoseconds": 0});
        assert_eq!(format_display_date(&tagged), "01/01/1970");

        let at = Utc.with_ymd_and_hms(2025, 2, 3, 23, 59, 59).unwrap();
        assert_eq!(format_display_date(at), "03/02/2025");
        assert_eq!(format_display_date(None::<DateTime<Utc>>), NOT_AVAILABLE);
    }
}
