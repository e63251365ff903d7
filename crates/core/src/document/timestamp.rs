use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::{json, Value};

/// `_type` tag marking a native store timestamp object.
pub const TIMESTAMP_TYPE: &str = "timestamp";

const NAIVE_DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"];

/// Native timestamp as the document store encodes it:
/// `{"_type": "timestamp", "seconds": i64, "nanoseconds": u32}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreTimestamp {
    pub seconds: i64,
    pub nanoseconds: u32,
}

impl StoreTimestamp {
    pub fn from_datetime(at: DateTime<Utc>) -> Self {
        Self {
            seconds: at.timestamp(),
            nanoseconds: at.timestamp_subsec_nanos(),
        }
    }

    /// Convert to a point in time. `None` when the fields are out of range.
    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.seconds, self.nanoseconds)
    }

    pub fn to_value(&self) -> Value {
        json!({
            "_type": TIMESTAMP_TYPE,
            "seconds": self.seconds,
            "nanoseconds": self.nanoseconds,
        })
    }
}

/// Every shape a loosely-typed date field may take in a raw document.
#[derive(Debug, Clone, PartialEq)]
pub enum TimestampLike {
    /// Native store timestamp; carries its own conversion to a point in time.
    Store(StoreTimestamp),
    /// Already a concrete instant.
    DateTime(DateTime<Utc>),
    /// Plain object carrying a `seconds` field but no timestamp tag.
    EpochSeconds(f64),
    /// Bare number, read as epoch milliseconds.
    Millis(f64),
    Text(String),
    Other,
    Absent,
}

impl TimestampLike {
    /// Classify a raw field value. The timestamp tag is checked before the
    /// `seconds` field so a tagged object never falls through to epoch seconds.
    pub fn classify(value: Option<&Value>) -> Self {
        match value {
            None | Some(Value::Null) => TimestampLike::Absent,
            Some(Value::Object(map)) => {
                if map.get("_type").and_then(Value::as_str) == Some(TIMESTAMP_TYPE) {
                    let seconds = map.get("seconds").and_then(Value::as_i64);
                    let nanoseconds = map
                        .get("nanoseconds")
                        .map(|n| n.as_u64().and_then(|n| u32::try_from(n).ok()))
                        .unwrap_or(Some(0));
                    match (seconds, nanoseconds) {
                        (Some(seconds), Some(nanoseconds)) => TimestampLike::Store(StoreTimestamp {
                            seconds,
                            nanoseconds,
                        }),
                        _ => TimestampLike::Other,
                    }
                } else if let Some(seconds) = map.get("seconds") {
                    epoch_seconds(seconds)
                        .map(TimestampLike::EpochSeconds)
                        .unwrap_or(TimestampLike::Other)
                } else {
                    TimestampLike::Other
                }
            }
            Some(Value::Number(n)) => n
                .as_f64()
                .map(TimestampLike::Millis)
                .unwrap_or(TimestampLike::Other),
            Some(Value::String(s)) => TimestampLike::Text(s.clone()),
            Some(_) => TimestampLike::Other,
        }
    }

    /// Storage-time conversion: use the native conversion when available,
    /// otherwise parse the value as a generic date.
    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        match self {
            TimestampLike::Store(ts) => ts.to_datetime(),
            TimestampLike::DateTime(at) => Some(*at),
            TimestampLike::Millis(ms) if ms.is_finite() => {
                DateTime::from_timestamp_millis(ms.trunc() as i64)
            }
            TimestampLike::Text(text) => parse_date_text(text),
            _ => None,
        }
    }
}

impl From<&Value> for TimestampLike {
    fn from(value: &Value) -> Self {
        TimestampLike::classify(Some(value))
    }
}

impl From<Option<&Value>> for TimestampLike {
    fn from(value: Option<&Value>) -> Self {
        TimestampLike::classify(value)
    }
}

impl From<DateTime<Utc>> for TimestampLike {
    fn from(at: DateTime<Utc>) -> Self {
        TimestampLike::DateTime(at)
    }
}

impl From<Option<DateTime<Utc>>> for TimestampLike {
    fn from(at: Option<DateTime<Utc>>) -> Self {
        at.map(TimestampLike::DateTime).unwrap_or(TimestampLike::Absent)
    }
}

impl From<StoreTimestamp> for TimestampLike {
    fn from(ts: StoreTimestamp) -> Self {
        TimestampLike::Store(ts)
    }
}

/// A `seconds` field may arrive as a number or as numeric text.
fn epoch_seconds(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|secs| secs.is_finite()),
        _ => None,
    }
}

/// Parse RFC 3339, then a zone-less date-time, then a bare date (midnight UTC).
fn parse_date_text(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if let Ok(at) = DateTime::parse_from_rfc3339(text) {
        return Some(at.with_timezone(&Utc));
    }
    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
