//! Clock and timestamp helpers for callers.

use chrono::{DateTime, Utc};

use crate::error::{Result, ShabbatError};

/// Current instant.
pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Parse an RFC 3339 timestamp with any offset into UTC.
pub fn parse_instant(s: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s.trim())
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| ShabbatError::InvalidInstant(format!("'{s}': {e}")))
}

/// `at` when given, otherwise the current instant.
pub fn resolve_instant(at: Option<&str>) -> Result<DateTime<Utc>> {
    match at {
        Some(s) => parse_instant(s),
        None => Ok(now()),
    }
}
