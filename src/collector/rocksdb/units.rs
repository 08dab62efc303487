//! Number parsing for stats dump tokens.
//!
//! The dump prints sizes with binary suffixes ("12.50 MB"), counts with a
//! decimal "K" shorthand ("12K writes"), durations as "H:MM:SS" and often
//! trails a number with prose ("3 commit groups"). Everything here is a
//! pure function over `&str` and never fails hard: an unreadable token is
//! [`Reading::Malformed`], an empty one [`Reading::Missing`].

use std::borrow::Cow;

use crate::model::Reading;

pub const KILOBYTE: f64 = 1024.0;
pub const MEGABYTE: f64 = KILOBYTE * 1024.0;
pub const GIGABYTE: f64 = MEGABYTE * 1024.0;
pub const TERABYTE: f64 = GIGABYTE * 1024.0;
pub const PETABYTE: f64 = TERABYTE * 1024.0;

/// Binary size suffixes, in detection priority order.
const BYTE_UNITS: [(&str, f64); 5] = [
    ("KB", KILOBYTE),
    ("MB", MEGABYTE),
    ("GB", GIGABYTE),
    ("TB", TERABYTE),
    ("PB", PETABYTE),
];

/// Column header the dump appends to clock-formatted durations.
const CLOCK_SUFFIX: &str = "H:M:S";

/// Parses a token that may carry a unit suffix into base units.
///
/// Detection order:
/// 1. `" KB"` anywhere or trailing `KB` (then MB, GB, TB, PB): binary multiple
/// 2. first word ends with `K`: decimal thousands
/// 3. trailing `B`: plain bytes
/// 4. trailing `H:M:S`: clock duration, see [`parse_duration`]
///
/// The result is the first space-separated word that reads as a float,
/// times the multiplier.
///
/// # Examples
///
/// ```
/// use rdbstat::collector::rocksdb::parse_unit_value;
/// use rdbstat::model::Reading;
///
/// assert_eq!(parse_unit_value("2K"), Reading::Value(2000.0));
/// assert_eq!(parse_unit_value("3 commit groups"), Reading::Value(3.0));
/// ```
pub fn parse_unit_value(token: &str) -> Reading {
    if token.trim().is_empty() {
        return Reading::Missing;
    }

    let mut multiplier = 1.0;
    let body: Cow<'_, str> =
        if let Some(&(unit, factor)) = BYTE_UNITS.iter().find(|(unit, _)| has_unit(token, unit)) {
            multiplier = factor;
            Cow::Owned(token.replacen(unit, "", 1))
        } else if token.contains('K') && first_word(token).ends_with('K') {
            multiplier = 1000.0;
            strip_first_word_suffix(token, 'K')
        } else if let Some(stripped) = token.strip_suffix('B') {
            Cow::Borrowed(stripped)
        } else if token.ends_with(CLOCK_SUFFIX) {
            return parse_duration(token);
        } else {
            Cow::Borrowed(token)
        };

    match first_number(&body) {
        Some(v) => Reading::Value(v * multiplier),
        None => Reading::Malformed,
    }
}

/// Parses `"H:MM:SS"` (optionally followed by a space and more text) into
/// seconds. Seconds may be fractional.
pub fn parse_duration(token: &str) -> Reading {
    let clock = first_word(token);
    if clock.is_empty() {
        return Reading::Missing;
    }

    let mut parts = clock.split(':');
    let (Some(h), Some(m), Some(s)) = (parts.next(), parts.next(), parts.next()) else {
        return Reading::Malformed;
    };

    match (h.parse::<f64>(), m.parse::<f64>(), s.parse::<f64>()) {
        (Ok(h), Ok(m), Ok(s)) => Reading::Value(h * 3600.0 + m * 60.0 + s),
        _ => Reading::Malformed,
    }
}

/// Splits on single spaces and drops the empty pieces left by runs of
/// padding between aligned columns.
pub fn split_ws(line: &str) -> Vec<&str> {
    line.split(' ').filter(|f| !f.is_empty()).collect()
}

/// True when `token` is nothing but a size suffix ("MB", "K", "B").
pub(crate) fn is_bare_unit(token: &str) -> bool {
    token == "K" || token == "B" || BYTE_UNITS.iter().any(|(unit, _)| token == *unit)
}

fn has_unit(token: &str, unit: &str) -> bool {
    token.ends_with(unit) || token.split(' ').skip(1).any(|w| w.starts_with(unit))
}

fn first_word(token: &str) -> &str {
    token.split(' ').next().unwrap_or("")
}

fn strip_first_word_suffix(token: &str, suffix: char) -> Cow<'_, str> {
    match token.split_once(' ') {
        Some((first, rest)) => {
            Cow::Owned(format!("{} {}", first.strip_suffix(suffix).unwrap_or(first), rest))
        }
        None => Cow::Borrowed(token.strip_suffix(suffix).unwrap_or(token)),
    }
}

/// First word that reads as a finite float. `inf` and `NaN` spellings are
/// words, not numbers.
fn first_number(s: &str) -> Option<f64> {
    s.split(' ')
        .filter_map(|w| w.parse::<f64>().ok())
        .find(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_binary_units() {
        assert_eq!(parse_unit_value("1.5 MB"), Reading::Value(1.5 * MEGABYTE));
        assert_eq!(parse_unit_value("12KB"), Reading::Value(12.0 * KILOBYTE));
        assert_eq!(parse_unit_value("2 GB"), Reading::Value(2.0 * GIGABYTE));
        assert_eq!(parse_unit_value("1 TB"), Reading::Value(TERABYTE));
        assert_eq!(parse_unit_value("0.5 PB"), Reading::Value(0.5 * PETABYTE));
    }

    #[test]
    fn test_parse_unit_with_leading_prose() {
        assert_eq!(parse_unit_value("ingest: 1.00 GB"), Reading::Value(GIGABYTE));
        assert_eq!(parse_unit_value("written: 0.50 GB"), Reading::Value(0.5 * GIGABYTE));
        assert_eq!(parse_unit_value("2.00 MB/s"), Reading::Value(2.0 * MEGABYTE));
    }

    #[test]
    fn test_parse_decimal_k() {
        assert_eq!(parse_unit_value("2K"), Reading::Value(2000.0));
        assert_eq!(parse_unit_value("12K writes"), Reading::Value(12000.0));
        assert_eq!(parse_unit_value("1.5K keys"), Reading::Value(1500.0));
    }

    #[test]
    fn test_k_in_later_word_is_not_a_multiplier() {
        assert_eq!(parse_unit_value("3 Keys"), Reading::Value(3.0));
    }

    #[test]
    fn test_parse_plain_bytes() {
        assert_eq!(parse_unit_value("5B"), Reading::Value(5.0));
        assert_eq!(parse_unit_value("512 B"), Reading::Value(512.0));
    }

    #[test]
    fn test_parse_first_number_wins() {
        assert_eq!(parse_unit_value("3 commit groups"), Reading::Value(3.0));
        assert_eq!(parse_unit_value("cumulative 0.250"), Reading::Value(0.25));
        assert_eq!(parse_unit_value("1.0 writes per commit group"), Reading::Value(1.0));
        assert_eq!(parse_unit_value("42"), Reading::Value(42.0));
    }

    #[test]
    fn test_parse_clock_suffix() {
        assert_eq!(parse_unit_value("00:01:30.500 H:M:S"), Reading::Value(90.5));
    }

    #[test]
    fn test_parse_unparseable() {
        assert_eq!(parse_unit_value("not-a-number"), Reading::Malformed);
        assert_eq!(parse_unit_value("not-a-number").sentinel(), -1.0);
        assert_eq!(parse_unit_value("MB"), Reading::Malformed);
        assert_eq!(parse_unit_value("KB"), Reading::Malformed);
        assert_eq!(parse_unit_value(""), Reading::Missing);
        assert_eq!(parse_unit_value("   "), Reading::Missing);
    }

    #[test]
    fn test_non_finite_words_are_malformed() {
        assert_eq!(parse_unit_value("inf"), Reading::Malformed);
        assert_eq!(parse_unit_value("-inf MB"), Reading::Malformed);
        assert_eq!(parse_unit_value("NaN"), Reading::Malformed);
        assert_eq!(parse_unit_value("infinity 2.5"), Reading::Value(2.5));
    }

    #[test]
    fn test_parse_duration() {
        assert_eq!(parse_duration("0:05:30"), Reading::Value(330.0));
        assert_eq!(parse_duration("1:00:00 (stuff)"), Reading::Value(3600.0));
        assert_eq!(parse_duration("00:00:1.250"), Reading::Value(1.25));
        assert_eq!(parse_duration("bad:input:x"), Reading::Malformed);
        assert_eq!(parse_duration("bad:input:x").sentinel(), -1.0);
        assert_eq!(parse_duration("12:30"), Reading::Malformed);
        assert_eq!(parse_duration(""), Reading::Missing);
    }

    #[test]
    fn test_split_ws() {
        assert_eq!(split_ws("  L0      2/0   1.2 MB "), vec!["L0", "2/0", "1.2", "MB"]);
        assert!(split_ws("     ").is_empty());
    }

    #[test]
    fn test_is_bare_unit() {
        assert!(is_bare_unit("MB"));
        assert!(is_bare_unit("K"));
        assert!(is_bare_unit("B"));
        assert!(!is_bare_unit("1.2"));
        assert!(!is_bare_unit("MB/s"));
    }
}
