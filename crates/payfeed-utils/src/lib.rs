//! Utility functions and helpers

use chrono::{DateTime, Local, TimeZone};
use std::time::{SystemTime, UNIX_EPOCH};

/// Group the digits of an integer string with a separator every three places.
///
/// A leading `-` is kept in front of the grouped digits.
pub fn group_digits(digits: &str, separator: &str) -> String {
    let (sign, digits) = match digits.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", digits),
    };

    let mut groups: Vec<String> = Vec::new();
    let chars: Vec<char> = digits.chars().collect();
    let mut end = chars.len();
    while end > 3 {
        groups.push(chars[end - 3..end].iter().collect());
        end -= 3;
    }
    groups.push(chars[..end].iter().collect());
    groups.reverse();

    format!("{}{}", sign, groups.join(separator))
}

/// Avatar initials: first letter of each whitespace-separated token,
/// uppercased, at most two characters.
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|token| token.chars().next())
        .flat_map(|c| c.to_uppercase())
        .take(2)
        .collect()
}

/// Milliseconds since the Unix epoch, used as a time-based id source.
///
/// A clock set before 1970 yields 0 rather than failing.
pub fn timestamp_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Time-of-day label in the feed's `9:18PM` style
pub fn time_label<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    at.format("%-I:%M%p").to_string()
}

/// Time-of-day label for the local wall clock
pub fn current_time_label() -> String {
    time_label(&Local::now())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};

    #[test]
    fn test_group_digits() {
        assert_eq!(group_digits("0", ","), "0");
        assert_eq!(group_digits("500", ","), "500");
        assert_eq!(group_digits("2000", ","), "2,000");
        assert_eq!(group_digits("1234567", "."), "1.234.567");
        assert_eq!(group_digits("-1000", ","), "-1,000");
    }

    #[test]
    fn test_initials() {
        assert_eq!(initials("Ann B"), "AB");
        assert_eq!(initials("Ariya Shingles"), "AS");
        assert_eq!(initials("jsosa"), "J");
        assert_eq!(initials("  mary  ann  lee "), "MA");
        assert_eq!(initials("élise ñúñez"), "ÉÑ");
        assert_eq!(initials(""), "");
    }

    #[test]
    fn test_time_label() {
        let evening = NaiveDate::from_ymd_opt(2024, 6, 15)
            .unwrap()
            .and_hms_opt(21, 18, 0)
            .unwrap();
        assert_eq!(time_label(&Utc.from_utc_datetime(&evening)), "9:18PM");

        let morning = NaiveDate::from_ymd_opt(2024, 6, 15)
            .unwrap()
            .and_hms_opt(0, 5, 0)
            .unwrap();
        assert_eq!(time_label(&Utc.from_utc_datetime(&morning)), "12:05AM");
    }

    #[test]
    fn test_timestamp_is_recent() {
        // 2020-01-01T00:00:00Z
        assert!(timestamp_millis() > 1_577_836_800_000);
    }
}
