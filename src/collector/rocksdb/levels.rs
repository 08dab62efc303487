//! Parser for the per-level compaction table.
//!
//! ```text
//! Level    Files   Size     Score Read(GB)  Rn(GB) Rnp1(GB) Write(GB) Wnew(GB) Moved(GB) W-Amp Rd(MB/s) Wr(MB/s) Comp(sec) Comp(cnt) Avg(sec) KeyIn KeyDrop
//! ----------------------------------------------------------------------------------------------------------------------------------------------------------
//!   L0      2/0    1.23 MB   0.5      0.0     0.0      0.0       0.1      0.1       0.0   1.0      0.0     12.1         5         3    1.667       0      0
//!   L1      4/1   10.50 MB   0.9      0.3     0.1      0.2       0.3      0.1       0.0   2.4     40.2     38.0         8         2    4.000     12K     1K
//!  Sum      6/1   11.73 MB   0.0      0.3     0.1      0.2       0.4      0.2       0.0   3.1     40.2     50.1        13         5    2.600     12K     1K
//!  Int      0/0    0.00 KB   0.0      0.0     0.0      0.0       0.0      0.0       0.0   0.0      0.0      0.0         0         0    0.000       0      0
//! ```

use tracing::debug;

use crate::model::{LevelFiles, LevelRecord, Reading};

use super::section::is_section_header;
use super::units::{GIGABYTE, MEGABYTE, is_bare_unit, parse_unit_value, split_ws};

/// Rule line separating the column header from the rows.
const TABLE_RULE: &str = "------";
/// Interval summary row; the table ends here.
const INTERVAL_ROW: &str = " Int";

/// Collects rows after the first dashed rule until the `Int` summary row
/// (or the next section header).
///
/// `lines` is one section's body, optionally led by its own header. A
/// header anywhere else ends the scan, so a section without a table never
/// picks up the next section's rows.
///
/// Each non-blank row that starts with a space becomes one record. Rows are
/// independent: a bad column only affects that column of that row.
pub fn parse_level_table<S: AsRef<str>>(lines: &[S]) -> Vec<LevelRecord> {
    let mut records = Vec::new();
    let mut in_table = false;

    for (idx, line) in lines.iter().map(|line| line.as_ref()).enumerate() {
        if !in_table {
            if idx > 0 && is_section_header(line) {
                break;
            }
            in_table = line.starts_with(TABLE_RULE);
            continue;
        }
        if line.starts_with(INTERVAL_ROW) || is_section_header(line) {
            break;
        }
        if line.trim().is_empty() {
            continue;
        }
        match parse_level_row(line) {
            Some(record) => records.push(record),
            None => debug!(line, "not a level row, skipped"),
        }
    }

    records
}

/// Parses one table row. Returns `None` for lines that are not rows (no
/// leading space, or nothing but whitespace).
///
/// Columns, after merging bare unit tokens into the number before them:
/// level, files/threads, size, score, read, rn, rnp1, write, wnew, moved,
/// w-amp, rd MB/s, wr MB/s, comp sec, comp cnt, avg sec, key in, key drop.
pub fn parse_level_row(line: &str) -> Option<LevelRecord> {
    if !line.starts_with(' ') {
        return None;
    }

    let fields = merge_unit_tokens(split_ws(line));
    let mut record = LevelRecord::new(fields.first()?.as_str());

    let col = |idx: usize| -> Reading {
        fields
            .get(idx)
            .map_or(Reading::Missing, |field| parse_unit_value(field))
    };

    let files = fields.get(1).and_then(|field| {
        let files = parse_files(field);
        if files.is_none() {
            debug!(level = %record.level, field = %field, "malformed files/threads column");
        }
        files
    });
    record.files = files;
    record.size_bytes = fields.get(2).map_or(Reading::Missing, |field| parse_size(field));
    record.score = col(3);
    record.read_bytes = col(4).scale(GIGABYTE);
    record.read_n_bytes = col(5).scale(GIGABYTE);
    record.read_np1_bytes = col(6).scale(GIGABYTE);
    record.write_bytes = col(7).scale(GIGABYTE);
    record.write_new_bytes = col(8).scale(GIGABYTE);
    record.moved_bytes = col(9).scale(GIGABYTE);
    record.write_amp = col(10);
    record.read_bytes_per_sec = col(11).scale(MEGABYTE);
    record.write_bytes_per_sec = col(12).scale(MEGABYTE);
    record.comp_seconds = col(13);
    record.comp_count = col(14);
    record.avg_seconds = col(15);
    record.keys_in = col(16);
    record.keys_dropped = col(17);

    Some(record)
}

/// Splits a `files/compaction-threads` token ("10/2").
pub fn parse_files(field: &str) -> Option<LevelFiles> {
    let (num, threads) = field.split_once('/')?;
    Some(LevelFiles {
        num: num.parse().ok()?,
        comp_threads: threads.parse().ok()?,
    })
}

/// Number of levels: one more than the highest numeric level id, or zero
/// when no row carries one.
pub fn level_count(records: &[LevelRecord]) -> usize {
    records
        .iter()
        .filter_map(LevelRecord::level_number)
        .max()
        .map_or(0, |max| max as usize + 1)
}

/// Size column: unit-bearing values convert as printed, bare numbers are
/// megabytes (older engines print a `Size(MB)` column).
fn parse_size(field: &str) -> Reading {
    if field.parse::<f64>().is_ok() {
        parse_unit_value(field).scale(MEGABYTE)
    } else {
        parse_unit_value(field)
    }
}

/// Re-joins value and unit that column padding split apart
/// (`["1.23", "MB"]` -> `["1.23 MB"]`). The level id and files columns
/// are never merged into.
fn merge_unit_tokens(tokens: Vec<&str>) -> Vec<String> {
    let mut merged: Vec<String> = Vec::with_capacity(tokens.len());
    for token in tokens {
        if merged.len() > 2 && is_bare_unit(token) {
            if let Some(prev) = merged.last_mut() {
                prev.push(' ');
                prev.push_str(token);
                continue;
            }
        }
        merged.push(token.to_string());
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROW: &str =
        " L3    10/2  100.50 MB  1.2  3.00 1.00 2.00 4.00 1.50 0.00 1.30 10.0 20.0 5.0 2 2.5 1000 50";

    #[test]
    fn test_parse_level_row() {
        let r = parse_level_row(ROW).unwrap();
        assert_eq!(r.level, "L3");
        assert_eq!(r.files, Some(LevelFiles { num: 10.0, comp_threads: 2.0 }));
        assert_eq!(r.size_bytes, Reading::Value(100.5 * MEGABYTE));
        assert_eq!(r.score, Reading::Value(1.2));
        assert_eq!(r.read_bytes, Reading::Value(3.0 * GIGABYTE));
        assert_eq!(r.read_n_bytes, Reading::Value(GIGABYTE));
        assert_eq!(r.read_np1_bytes, Reading::Value(2.0 * GIGABYTE));
        assert_eq!(r.write_bytes, Reading::Value(4.0 * GIGABYTE));
        assert_eq!(r.write_new_bytes, Reading::Value(1.5 * GIGABYTE));
        assert_eq!(r.moved_bytes, Reading::Value(0.0));
        assert_eq!(r.write_amp, Reading::Value(1.30));
        assert_eq!(r.read_bytes_per_sec, Reading::Value(10.0 * MEGABYTE));
        assert_eq!(r.write_bytes_per_sec, Reading::Value(20.0 * MEGABYTE));
        assert_eq!(r.comp_seconds, Reading::Value(5.0));
        assert_eq!(r.comp_count, Reading::Value(2.0));
        assert_eq!(r.avg_seconds, Reading::Value(2.5));
        assert_eq!(r.keys_in, Reading::Value(1000.0));
        assert_eq!(r.keys_dropped, Reading::Value(50.0));
    }

    #[test]
    fn test_parse_level_row_bare_size_is_megabytes() {
        let r = parse_level_row("  L1  4/0  64.0  0.9  0 0 0 0 0 0 0 0 0 0 0 0 0 0").unwrap();
        assert_eq!(r.size_bytes, Reading::Value(64.0 * MEGABYTE));
        assert_eq!(r.score, Reading::Value(0.9));
    }

    #[test]
    fn test_parse_level_row_k_counts() {
        let r = parse_level_row(
            "  L1  4/1  10.50 MB  0.9  0.3 0.1 0.2 0.3 0.1 0.0 2.4 40.2 38.0 8 2 4.000 12K 1K",
        )
        .unwrap();
        assert_eq!(r.keys_in, Reading::Value(12000.0));
        assert_eq!(r.keys_dropped, Reading::Value(1000.0));
    }

    #[test]
    fn test_parse_level_row_short() {
        let r = parse_level_row(" L2  3/0  1.00 MB  0.4").unwrap();
        assert_eq!(r.level, "L2");
        assert_eq!(r.score, Reading::Value(0.4));
        assert_eq!(r.read_bytes, Reading::Missing);
        assert_eq!(r.keys_dropped, Reading::Missing);
    }

    #[test]
    fn test_parse_level_row_bad_files_keeps_row() {
        let r = parse_level_row(" L4  ten/x  1.00 MB  0.4").unwrap();
        assert_eq!(r.files, None);
        assert_eq!(r.size_bytes, Reading::Value(MEGABYTE));
    }

    #[test]
    fn test_parse_level_row_not_a_row() {
        assert!(parse_level_row("Level Files Size").is_none());
        assert!(parse_level_row("    ").is_none());
    }

    #[test]
    fn test_parse_files() {
        assert_eq!(parse_files("2/0"), Some(LevelFiles { num: 2.0, comp_threads: 0.0 }));
        assert_eq!(parse_files("2"), None);
        assert_eq!(parse_files("a/1"), None);
        assert_eq!(parse_files("1/b"), None);
    }

    const TABLE: &[&str] = &[
        "** Compaction Stats [default] **",
        "Level    Files   Size     Score Read(GB)  Rn(GB) Rnp1(GB) Write(GB) Wnew(GB) Moved(GB) W-Amp Rd(MB/s) Wr(MB/s) Comp(sec) Comp(cnt) Avg(sec) KeyIn KeyDrop",
        "----------------------------------------------------------------------------------------------------------------------------------------------------------",
        "  L0      2/0    1.23 MB   0.5      0.0     0.0      0.0       0.1      0.1       0.0   1.0      0.0     12.1         5         3    1.667       0      0",
        "",
        "  L1      4/1   10.50 MB   0.9      0.3     0.1      0.2       0.3      0.1       0.0   2.4     40.2     38.0         8         2    4.000     12K     1K",
        "  L6      1/0   20.00 MB   0.0      0.0     0.0      0.0       0.0      0.0       0.0   0.0      0.0      0.0         0         0    0.000       0      0",
        " Sum      7/1   31.73 MB   0.0      0.3     0.1      0.2       0.4      0.2       0.0   3.1     40.2     50.1        13         5    2.600     12K     1K",
        " Int      0/0    0.00 KB   0.0      0.0     0.0      0.0       0.0      0.0       0.0   0.0      0.0      0.0         0         0    0.000       0      0",
        "  L9      1/0    1.00 MB   0.0      0.0     0.0      0.0       0.0      0.0       0.0   0.0      0.0      0.0         0         0    0.000       0      0",
    ];

    #[test]
    fn test_parse_level_table() {
        let records = parse_level_table(TABLE);
        let levels: Vec<&str> = records.iter().map(|r| r.level.as_str()).collect();
        assert_eq!(levels, vec!["L0", "L1", "L6", "Sum"]);
        assert_eq!(records[1].size_bytes, Reading::Value(10.5 * MEGABYTE));
        assert_eq!(records[1].keys_in, Reading::Value(12000.0));
        assert_eq!(level_count(&records), 7);
    }

    #[test]
    fn test_parse_level_table_stops_at_section_header() {
        let lines = [
            "------",
            "  L0  1/0  1.00 MB  0.1",
            "** DB Stats **",
            "  L5  1/0  1.00 MB  0.1",
        ];
        let records = parse_level_table(&lines);
        assert_eq!(records.len(), 1);
        assert_eq!(level_count(&records), 1);
    }

    #[test]
    fn test_parse_level_table_stays_in_first_section() {
        let lines = [
            "** Compaction Stats [oplogCF] **",
            "Flush(GB): cumulative 2.000, interval 0.000",
            "** Compaction Stats [other] **",
            "------",
            "  L4  1/0  1.00 MB  0.1",
        ];
        assert!(parse_level_table(&lines).is_empty());
        assert!(parse_level_table(&lines[1..]).is_empty());
    }

    #[test]
    fn test_parse_level_table_without_rule() {
        let lines = ["  L0  1/0  1.00 MB  0.1"];
        assert!(parse_level_table(&lines).is_empty());
    }

    #[test]
    fn test_level_count_without_numeric_levels() {
        assert_eq!(level_count(&[]), 0);
        assert_eq!(level_count(&[LevelRecord::new("Sum")]), 0);
    }

    #[test]
    fn test_merge_unit_tokens() {
        let merged = merge_unit_tokens(vec!["L0", "2/0", "1.23", "MB", "0.5", "B"]);
        assert_eq!(merged, vec!["L0", "2/0", "1.23 MB", "0.5 B"]);
    }
}
