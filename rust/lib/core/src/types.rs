use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

/// Result wrapper for list operations.
#[derive(Debug, Clone, Serialize)]
pub struct ListResult<T: Serialize> {
    pub items: Vec<T>,
    pub total: usize,
}

impl<T: Serialize> ListResult<T> {
    pub fn from_items(items: Vec<T>) -> Self {
        let total = items.len();
        Self { items, total }
    }
}

/// Generate a new random ID (UUIDv4, no dashes).
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string().replace('-', "")
}

/// Get the current time as an RFC 3339 string.
pub fn now_rfc3339() -> String {
    format_timestamp(Utc::now())
}

/// Format a UTC instant the way every stored timestamp is written.
///
/// Fixed microsecond precision with a `Z` suffix, so stored values compare
/// correctly as plain strings in SQL range filters and `ORDER BY`.
pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_new_id() {
        let id = new_id();
        assert_eq!(id.len(), 32);
        assert!(!id.contains('-'));
    }

    #[test]
    fn test_now_rfc3339() {
        let ts = now_rfc3339();
        assert!(ts.contains('T'));
        assert!(ts.ends_with('Z'));
    }

    #[test]
    fn timestamps_sort_lexically() {
        let a = format_timestamp(Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap());
        let b = format_timestamp(Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap());
        assert_eq!(a, "2024-01-01T09:00:00.000000Z");
        assert!(a < b);
    }

    #[test]
    fn list_result_counts_items() {
        let result = ListResult::from_items(vec!["a", "b"]);
        assert_eq!(result.total, 2);
    }
}
