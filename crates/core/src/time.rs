//! Wire-format timestamps.
//!
//! Everything leaving the system is ISO-8601 UTC with a trailing `Z`,
//! microsecond precision (the format the frontend already parses).

use chrono::{SecondsFormat, Utc};

/// Current time as an ISO-8601 UTC string, e.g. `2026-08-29T10:15:30.123456Z`.
pub fn now_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}
