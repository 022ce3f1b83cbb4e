use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use once_cell::sync::Lazy;
use regex::Regex;

type Layout = (Regex, &'static [&'static str]);

fn layout(pattern: &str, formats: &'static [&'static str]) -> Layout {
    (Regex::new(pattern).unwrap(), formats)
}

// Date layouts; ambiguous numeric forms try month-first, then day-first
static DATE_PATTERNS: Lazy<Vec<Layout>> = Lazy::new(|| {
    vec![
        // ISO format: 2024-01-15
        layout(r"^\d{4}-\d{1,2}-\d{1,2}$", &["%Y-%m-%d"]),
        // 2024/01/15
        layout(r"^\d{4}/\d{1,2}/\d{1,2}$", &["%Y/%m/%d"]),
        // ISO with dots: 2024.01.15
        layout(r"^\d{4}\.\d{1,2}\.\d{1,2}$", &["%Y.%m.%d"]),
        // 01/15/2024 or 15/01/2024
        layout(r"^\d{1,2}/\d{1,2}/\d{4}$", &["%m/%d/%Y", "%d/%m/%Y"]),
        // 01-15-2024 or 15-01-2024
        layout(r"^\d{1,2}-\d{1,2}-\d{4}$", &["%m-%d-%Y", "%d-%m-%Y"]),
        // 15.01.2024
        layout(r"^\d{1,2}\.\d{1,2}\.\d{4}$", &["%d.%m.%Y"]),
        // Short year: 01/15/24
        layout(r"^\d{1,2}/\d{1,2}/\d{2}$", &["%m/%d/%y", "%d/%m/%y"]),
        // Month name: Jan 15, 2024 or January 15 2024
        layout(r"^[A-Za-z]{3,9} \d{1,2},? \d{4}$", &["%B %d, %Y", "%B %d %Y"]),
        // 15 January 2024
        layout(r"^\d{1,2} [A-Za-z]{3,9},? \d{4}$", &["%d %B %Y", "%d %B, %Y"]),
        // 15-Jan-2024
        layout(r"^\d{1,2}-[A-Za-z]{3}-\d{4}$", &["%d-%b-%Y"]),
        // 15-Jan-24
        layout(r"^\d{1,2}-[A-Za-z]{3}-\d{2}$", &["%d-%b-%y"]),
    ]
});

// Datetime layouts without an offset
static DATETIME_PATTERNS: Lazy<Vec<Layout>> = Lazy::new(|| {
    vec![
        // 2024-01-15T10:30:00, 2024-01-15 10:30, 2024-01-15T10:30:00.123
        layout(r"^\d{4}-\d{1,2}-\d{1,2}[T ]\d{1,2}:\d{2}(:\d{2}(\.\d+)?)?$", &[
                "%Y-%m-%dT%H:%M:%S",
                "%Y-%m-%d %H:%M:%S",
                "%Y-%m-%dT%H:%M:%S%.f",
                "%Y-%m-%d %H:%M:%S%.f",
                "%Y-%m-%dT%H:%M",
                "%Y-%m-%d %H:%M",
            ]),
        // 01/15/2024 10:30:00
        layout(r"^\d{1,2}/\d{1,2}/\d{4} \d{1,2}:\d{2}(:\d{2})?$", &[
                "%m/%d/%Y %H:%M:%S",
                "%m/%d/%Y %H:%M",
                "%d/%m/%Y %H:%M:%S",
                "%d/%m/%Y %H:%M",
            ]),
    ]
});

// With timezone: 2024-01-15T10:30:00Z or 2024-01-15T10:30:00+02:00
static OFFSET_DATETIME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{4}-\d{2}-\d{2}[Tt ]\d{2}:\d{2}:\d{2}(\.\d+)?([Zz]|[+-]\d{2}:\d{2})$").unwrap()
});

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Check if a value is one of the sentinel tokens (case-insensitive, trimmed)
pub fn is_sentinel(value: &str, tokens: &[String]) -> bool {
    let trimmed = value.trim();
    tokens.iter().any(|t| trimmed.eq_ignore_ascii_case(t.trim()))
}

/// Parse a finite numeric value
pub fn parse_numeric(value: &str) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
}

/// Check if a value is numeric (integer or float)
pub fn is_numeric(value: &str) -> bool {
    parse_numeric(value).is_some()
}

/// Parse a date or datetime in any of the recognised layouts.
/// Offsets are converted to UTC and dropped.
pub fn parse_datetime(value: &str) -> Option<NaiveDateTime> {
    let collapsed = WHITESPACE_RUN.replace_all(value.trim(), " ");
    let trimmed = collapsed.as_ref();
    if trimmed.is_empty() {
        return None;
    }

    if OFFSET_DATETIME.is_match(trimmed) {
        let rfc3339 = trimmed.replacen(' ', "T", 1);
        return DateTime::parse_from_rfc3339(&rfc3339)
            .ok()
            .map(|dt| dt.naive_utc());
    }

    for (pattern, formats) in DATETIME_PATTERNS.iter() {
        if pattern.is_match(trimmed) {
            if let Some(dt) = formats
                .iter()
                .find_map(|f| NaiveDateTime::parse_from_str(trimmed, f).ok())
            {
                return Some(dt);
            }
        }
    }

    for (pattern, formats) in DATE_PATTERNS.iter() {
        if pattern.is_match(trimmed) {
            if let Some(date) = formats
                .iter()
                .find_map(|f| NaiveDate::parse_from_str(trimmed, f).ok())
            {
                return Some(date.and_time(NaiveTime::MIN));
            }
        }
    }

    None
}
