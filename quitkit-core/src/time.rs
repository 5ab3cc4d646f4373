//! Time utilities: wall-clock "now" in the user's timezone, lenient parsing.

use anyhow::Result;
use chrono::{DateTime, NaiveDateTime, NaiveTime, Utc};
use chrono_tz::Tz;

/// Parse an "HH:MM" 24-hour time-of-day. Returns None on anything malformed
/// so callers can fall back to the default window.
pub fn parse_hhmm(s: &str) -> Option<NaiveTime> {
    let (h, m) = s.trim().split_once(':')?;
    let h: u32 = h.parse().ok()?;
    let m: u32 = m.parse().ok()?;
    NaiveTime::from_hms_opt(h, m, 0)
}

/// Current wall-clock time in an IANA timezone like "America/Chicago".
/// The day window is compared against local time, never UTC.
pub fn local_now(tz: &str) -> Result<NaiveDateTime> {
    local_at(Utc::now(), tz)
}

/// Project a UTC instant onto local wall-clock time in `tz`.
pub fn local_at(instant: DateTime<Utc>, tz: &str) -> Result<NaiveDateTime> {
    let tz: Tz = tz
        .parse()
        .map_err(|_| anyhow::anyhow!("invalid timezone: {tz}"))?;
    Ok(instant.with_timezone(&tz).naive_local())
}

/// Parse a stored RFC3339 program start. Malformed values degrade to None.
pub fn parse_start_date(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s.trim())
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}
