//! Occupancy history snapshots.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A snapshot of a lot's occupancy. Immutable once recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParkingHistory {
    pub id: i64,
    pub parking_id: i64,
    /// One entry per spot, in spot order.
    pub spots_state: Vec<i32>,
    pub recorded_at: DateTime<Utc>,
}

/// Request payload for recording a snapshot. `recorded_at` is set by storage.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateParkingHistoryRequest {
    #[validate(range(min = 1, message = "parking_id must be a positive id"))]
    pub parking_id: i64,

    pub spots_state: Vec<i32>,
}

/// Query parameters for listing history.
///
/// Dates stay as strings here so a bad value can be reported by name.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListParkingHistoryQuery {
    #[serde(default, deserialize_with = "super::query::optional_id")]
    pub parking_id: Option<i64>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// Inclusive bounds on `recorded_at`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RecordedRange {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

impl ListParkingHistoryQuery {
    /// Parses the date filters. The error names the offending parameter.
    pub fn recorded_range(&self) -> Result<RecordedRange, String> {
        Ok(RecordedRange {
            from: parse_bound("start_date", self.start_date.as_deref())?,
            to: parse_bound("end_date", self.end_date.as_deref())?,
        })
    }
}

/// Accepts RFC 3339 timestamps or plain `YYYY-MM-DD` dates (midnight UTC).
fn parse_bound(name: &str, raw: Option<&str>) -> Result<Option<DateTime<Utc>>, String> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };

    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(Some(ts.with_timezone(&Utc)));
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Some(naive.and_utc()))
        .ok_or_else(|| format!("Invalid {}: expected RFC 3339 timestamp or YYYY-MM-DD", name))
}
