use serde::Serialize;

use crate::document::VideoRecord;
use crate::error::GatewayError;

pub const EMPTY_ADVISORY: &str = "no records found; please add some";

/// What the list view renders from.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewState {
    pub records: Vec<VideoRecord>,
    pub loading: bool,
    /// Failure or advisory message, if any.
    pub error: Option<String>,
}

impl ViewState {
    pub(crate) fn begin_loading(&mut self) {
        self.loading = true;
        self.error = None;
    }

    /// An empty list is valid but flagged to the user. A populated list only
    /// clears that advisory; other messages stay until the next reload.
    pub(crate) fn apply_snapshot(&mut self, records: Vec<VideoRecord>) {
        if records.is_empty() {
            tracing::warn!("collection is empty");
            self.error = Some(EMPTY_ADVISORY.to_string());
        } else if self.error.as_deref() == Some(EMPTY_ADVISORY) {
            self.error = None;
        }
        self.records = records;
        self.loading = false;
    }

    /// Keeps the last good list.
    pub(crate) fn apply_failure(&mut self, err: &GatewayError) {
        self.error = Some(err.to_string());
        self.loading = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{normalize, RawDocument};
    use serde_json::Map;

    fn record(id: &str) -> VideoRecord {
        normalize(&RawDocument::new(id, Map::new()))
    }

    #[test]
    fn empty_snapshot_is_advisory() {
        let mut state = ViewState::default();
        state.begin_loading();
        state.apply_snapshot(Vec::new());
        assert!(!state.loading);
        assert!(state.records.is_empty());
        assert_eq!(state.error.as_deref(), Some(EMPTY_ADVISORY));
    }

    #[test]
    fn failure_keeps_previous_records() {
        let mut state = ViewState::default();
        state.apply_snapshot(vec![record("a"), record("b")]);
        state.begin_loading();
        state.apply_failure(&GatewayError::Fetch);
        assert!(!state.loading);
        assert_eq!(state.records.len(), 2);
        assert_eq!(state.error.as_deref(), Some("failed to fetch records"));
    }

    #[test]
    fn populated_snapshot_clears_advisory() {
        let mut state = ViewState::default();
        state.apply_snapshot(Vec::new());
        state.apply_snapshot(vec![record("a")]);
        assert_eq!(state.error, None);
    }

    #[test]
    fn populated_snapshot_keeps_other_errors() {
        let mut state = ViewState::default();
        state.apply_snapshot(vec![record("a")]);
        state.error = Some("failed to delete record".into());
        state.apply_snapshot(vec![record("a"), record("b")]);
        assert_eq!(state.records.len(), 2);
        assert_eq!(state.error.as_deref(), Some("failed to delete record"));
    }
}
