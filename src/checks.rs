use chrono::{DateTime, NaiveDateTime};
use regex::Regex;
use std::sync::LazyLock;
use url::Url;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

/// Basic `local@domain.tld` shape: no whitespace and a single `@`.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Absolute URL with an http or https scheme.
pub fn is_valid_url(url: &str) -> bool {
    match Url::parse(url) {
        Ok(parsed) => matches!(parsed.scheme(), "http" | "https"),
        Err(_) => false,
    }
}

/// ISO-8601 timestamp carrying both a `T` separator and a `Z` UTC marker.
pub fn is_valid_iso_date(date: &str) -> bool {
    if !date.contains('T') || !date.contains('Z') {
        return false;
    }
    // RFC 3339 requires seconds; ISO-8601 also allows minute precision
    DateTime::parse_from_rfc3339(date).is_ok()
        || NaiveDateTime::parse_from_str(date, "%Y-%m-%dT%H:%MZ").is_ok()
}
