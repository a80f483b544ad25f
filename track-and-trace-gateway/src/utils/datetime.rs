//! 到港时间解析
//!
//! Scrapers report `arrival` in whatever format the carrier site uses. Accepted:
//! - RFC 3339 timestamps
//! - plain `YYYY-MM-DD` dates (midnight UTC)
//! - Unix timestamps in seconds or milliseconds

use chrono::{DateTime, NaiveDate, Utc};

/// Parse a scraped arrival value into a UTC timestamp.
pub fn parse_arrival(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
    }

    raw.parse::<i64>().ok().and_then(parse_unix_timestamp)
}

/// 解析 Unix 时间戳（自动判断秒/毫秒）
fn parse_unix_timestamp(ts: i64) -> Option<DateTime<Utc>> {
    // > 10^11 is treated as milliseconds
    if ts > 100_000_000_000 {
        DateTime::from_timestamp_millis(ts)
    } else {
        DateTime::from_timestamp(ts, 0)
    }
}
