use serde_json::Value;

use super::model::{RawDocument, VideoRecord};
use super::timestamp::TimestampLike;

pub const UNTITLED: &str = "Untitled";
pub const DEFAULT_STATUS: &str = "public";

/// Turn a raw store document into a [`VideoRecord`].
///
/// Pure and total: malformed fields fall back to their defaults instead of
/// failing, so one bad document never aborts a live stream.
pub fn normalize(doc: &RawDocument) -> VideoRecord {
    let record = VideoRecord {
        id: Some(doc.id.clone()),
        title: text_or(doc.get("title"), UNTITLED),
        description: text_or(doc.get("description"), ""),
        url: text_or(doc.get("url"), ""),
        created_at: TimestampLike::classify(doc.get("createdAt")).to_datetime(),
        updated_at: TimestampLike::classify(doc.get("updatedAt")).to_datetime(),
        size: passthrough(doc, "size"),
        tag_used: passthrough(doc, "tagUsed"),
        tags: passthrough(doc, "tags"),
        duration: passthrough(doc, "duration"),
        status: text_or(doc.get("status"), DEFAULT_STATUS),
        converted: doc.get("converted").is_some_and(is_truthy),
        uploaded_date: doc.get("uploadedDate").filter(|v| !v.is_null()).cloned(),
    };
    tracing::debug!(id = %doc.id, ?record, "normalized document");
    record
}

/// Non-empty string value, or the default.
fn text_or(value: Option<&Value>, default: &str) -> String {
    match value {
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        _ => default.to_string(),
    }
}

fn passthrough(doc: &RawDocument, field: &str) -> Option<String> {
    match doc.get(field)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Null => None,
        other => {
            tracing::debug!(id = %doc.id, field, value = %other, "dropping non-scalar field");
            None
        }
    }
}

/// Loose boolean coercion: false, 0, NaN, "" and null are false.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::timestamp::StoreTimestamp;
    use chrono::{TimeZone, Utc};
    use serde_json::{json, Map};

    fn doc(fields: Value) -> RawDocument {
        let fields = match fields {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        RawDocument::new("v1", fields)
    }

    #[test]
    fn empty_document_gets_defaults() {
        let record = normalize(&doc(json!({})));
        assert_eq!(record.id.as_deref(), Some("v1"));
        assert_eq!(record.title, UNTITLED);
        assert_eq!(record.description, "");
        assert_eq!(record.url, "");
        assert_eq!(record.status, DEFAULT_STATUS);
        assert!(!record.converted);
        assert_eq!(record.created_at, None);
        assert_eq!(record.updated_at, None);
        assert_eq!(record.size, None);
        assert_eq!(record.uploaded_date, None);
    }

    #[test]
    fn falsy_and_mistyped_values_fall_back() {
        let record = normalize(&doc(json!({
            "title": "",
            "description": null,
            "url": 42,
            "status": "",
            "converted": 0,
            "createdAt": {"nonsense": true},
            "updatedAt": "yesterday-ish",
            "tags": ["a", "b"],
        })));
        assert_eq!(record.title, UNTITLED);
        assert_eq!(record.description, "");
        assert_eq!(record.url, "");
        assert_eq!(record.status, DEFAULT_STATUS);
        assert!(!record.converted);
        assert_eq!(record.created_at, None);
        assert_eq!(record.updated_at, None);
        assert_eq!(record.tags, None);
    }

    #[test]
    fn populated_document_passes_through() {
        let created = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let record = normalize(&doc(json!({
            "title": "Launch",
            "description": "Keynote",
            "url": "https://cdn.example/launch.mp4",
            "createdAt": StoreTimestamp::from_datetime(created).to_value(),
            "updatedAt": "2024-01-02T00:00:00Z",
            "size": "120MB",
            "tagUsed": "keynote",
            "tags": "event,launch",
            "duration": 95,
            "status": "private",
            "converted": "yes",
            "uploadedDate": {"seconds": 1_700_000_000, "nanoseconds": 0},
        })));
        assert_eq!(record.title, "Launch");
        assert_eq!(record.description, "Keynote");
        assert_eq!(record.created_at, Some(created));
        assert_eq!(
            record.updated_at,
            Some(Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap())
        );
        assert_eq!(record.size.as_deref(), Some("120MB"));
        assert_eq!(record.tag_used.as_deref(), Some("keynote"));
        assert_eq!(record.duration.as_deref(), Some("95"));
        assert_eq!(record.status, "private");
        assert!(record.converted);
        assert_eq!(
            record.uploaded_date,
            Some(json!({"seconds": 1_700_000_000, "nanoseconds": 0}))
        );
    }

    #[test]
    fn tagged_timestamp_preferred_over_seconds() {
        let record = normalize(&doc(json!({
            "createdAt": {"_type": "timestamp", "seconds": 86_400, "nanoseconds": 0},
        })));
        assert_eq!(record.created_at, Utc.timestamp_opt(86_400, 0).single());
    }

    #[test]
    fn truthiness() {
        assert!(is_truthy(&json!(true)));
        assert!(is_truthy(&json!(1)));
        assert!(is_truthy(&json!({})));
        assert!(!is_truthy(&json!(false)));
        assert!(!is_truthy(&json!("")));
        assert!(!is_truthy(&json!(0.0)));
    }
}
