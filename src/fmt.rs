//! Human-readable formatting for the level table and summary output.
//!
//! Pure functions only. Sizes are parameterized via [`FmtStyle`] the same
//! way for table columns and for the one-line summary.

use chrono::{DateTime, Utc};

use crate::collector::rocksdb::{GIGABYTE, KILOBYTE, MEGABYTE, TERABYTE};
use crate::model::Reading;

/// Controls compact (table columns) vs verbose (summary lines) output.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum FmtStyle {
    /// Compact: no spaces, short suffixes ("1.5G")
    Compact,
    /// Detail: spaces, full suffixes ("1.5 GiB")
    Detail,
}

/// Format byte count as human-readable size.
///
/// Compact: `"1.5G"`, `"100.3M"`, `"50.0K"`, `"512B"`
/// Detail:  `"1.5 GiB"`, `"100.3 MiB"`, `"50.0 KiB"`, `"512 B"`
pub fn format_bytes(bytes: f64, style: FmtStyle) -> String {
    let (t, g, m, k, b) = match style {
        FmtStyle::Compact => ("T", "G", "M", "K", "B"),
        FmtStyle::Detail => (" TiB", " GiB", " MiB", " KiB", " B"),
    };
    if bytes >= TERABYTE {
        format!("{:.1}{}", bytes / TERABYTE, t)
    } else if bytes >= GIGABYTE {
        format!("{:.1}{}", bytes / GIGABYTE, g)
    } else if bytes >= MEGABYTE {
        format!("{:.1}{}", bytes / MEGABYTE, m)
    } else if bytes >= KILOBYTE {
        format!("{:.1}{}", bytes / KILOBYTE, k)
    } else {
        format!("{:.0}{}", bytes, b)
    }
}

/// Format bytes-per-second rate; `"0"` below one byte per second.
pub fn format_bytes_rate(rate: f64, style: FmtStyle) -> String {
    if rate < 1.0 {
        return "0".to_string();
    }
    format!("{}/s", format_bytes(rate, style))
}

/// Format fractional seconds: `"2.5s"`, `"3m5s"`, `"1h30m"`.
pub fn format_seconds(secs: f64) -> String {
    if secs < 0.0 {
        return "-".to_string();
    }
    if secs < 60.0 {
        return format!("{:.1}s", secs);
    }
    let whole = secs as u64;
    if whole < 3600 {
        format!("{}m{}s", whole / 60, whole % 60)
    } else if whole < 86400 {
        format!("{}h{}m", whole / 3600, (whole % 3600) / 60)
    } else {
        format!("{}d{}h", whole / 86400, (whole % 86400) / 3600)
    }
}

/// Format plain counts with a decimal suffix: `"12.0K"`, `"3.4M"`.
pub fn format_count(v: f64) -> String {
    if v >= 1_000_000.0 {
        format!("{:.1}M", v / 1_000_000.0)
    } else if v >= 1_000.0 {
        format!("{:.1}K", v / 1_000.0)
    } else {
        format!("{:.0}", v)
    }
}

/// Right-aligns a formatted reading; `"--"` for anything that is not a value.
pub fn format_reading(reading: Reading, width: usize, f: impl Fn(f64) -> String) -> String {
    match reading.value() {
        Some(v) => format!("{:>width$}", f(v), width = width),
        None => format!("{:>width$}", "--", width = width),
    }
}

/// Format `Option<f64>` with width and precision, `"--"` for `None`.
pub fn format_opt_f64(v: Option<f64>, width: usize, precision: usize) -> String {
    match v {
        Some(v) => format!("{:>width$.prec$}", v, width = width, prec = precision),
        None => format!("{:>width$}", "--", width = width),
    }
}

/// Format a unix timestamp as `YYYY-MM-DD HH:MM:SS UTC`; `"--"` when out of range.
pub fn format_timestamp(epoch_secs: i64) -> String {
    match DateTime::<Utc>::from_timestamp(epoch_secs, 0) {
        Some(dt) => dt.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        None => "--".to_string(),
    }
}
