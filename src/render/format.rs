use chrono::{DateTime, NaiveDate};

/// Compact follower count, e.g. 4200000 -> "4.2M", 12500 -> "13K"
pub fn format_count(count: u64) -> String {
    // 999_500 and up would round to "1000K"
    if count >= 999_500 {
        format!("{:.1}M", count as f64 / 1_000_000.0)
    } else if count >= 1_000 {
        format!("{:.0}K", count as f64 / 1_000.0)
    } else {
        count.to_string()
    }
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(value) {
        return Some(timestamp.date_naive());
    }
    value
        .get(..10)
        .and_then(|day| NaiveDate::parse_from_str(day, "%Y-%m-%d").ok())
}

/// Card date, e.g. "Jan 15, 2024"; unparseable input is returned as-is
pub fn format_short_date(value: &str) -> String {
    match parse_date(value) {
        Some(date) => date.format("%b %-d, %Y").to_string(),
        None => value.to_string(),
    }
}

/// Detail date, e.g. "Monday, January 15, 2024"
pub fn format_long_date(value: &str) -> String {
    match parse_date(value) {
        Some(date) => date.format("%A, %B %-d, %Y").to_string(),
        None => value.to_string(),
    }
}
