//! Parser for the `Stalls(count): ` line of the compaction section.

use std::collections::BTreeMap;

use tracing::debug;

use super::section::labeled_fields;
use super::units::parse_unit_value;

/// Label of the stall counter line.
pub const STALLS_LABEL: &str = "Stalls(count): ";

/// Turns `"5 write-stall, 3 compaction-stall"` entries into
/// `{"write-stall": 5, "compaction-stall": 3}`.
///
/// Entries that are not exactly `<count> <cause>`, or whose count does not
/// parse, are skipped.
pub fn parse_stall_counts<'a, I>(entries: I) -> BTreeMap<String, f64>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut stalls = BTreeMap::new();

    for entry in entries {
        let parts: Vec<&str> = entry.split(' ').collect();
        let [count, cause] = parts.as_slice() else {
            debug!(entry, "unexpected stall entry shape");
            continue;
        };
        match parse_unit_value(count).value() {
            Some(n) => {
                stalls.insert((*cause).to_string(), n);
            }
            None => debug!(entry, "unparseable stall count"),
        }
    }

    stalls
}

/// Locates the stall line inside `section` and parses it.
pub fn stall_counts<S: AsRef<str>>(lines: &[S], section: &str) -> BTreeMap<String, f64> {
    parse_stall_counts(labeled_fields(lines, section, STALLS_LABEL))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_stall_counts() {
        let stalls = parse_stall_counts("5 write-stall, 3 compaction-stall".split(", "));
        assert_eq!(stalls.len(), 2);
        assert_eq!(stalls["write-stall"], 5.0);
        assert_eq!(stalls["compaction-stall"], 3.0);
    }

    #[test]
    fn test_parse_stall_counts_garbage() {
        assert!(parse_stall_counts(["garbage"]).is_empty());
        assert!(parse_stall_counts(["1 two words"]).is_empty());
        assert!(parse_stall_counts(["many stalls"]).is_empty());
    }

    #[test]
    fn test_stall_counts_from_section() {
        let lines = [
            "** Compaction Stats [default] **",
            "Stalls(count): 0 level0_slowdown, 2 level0_numfiles, 1K memtable_compaction, 3 total",
            "** DB Stats **",
        ];
        let stalls = stall_counts(&lines, "** Compaction Stats [default] **");
        assert_eq!(stalls.len(), 4);
        assert_eq!(stalls["level0_slowdown"], 0.0);
        assert_eq!(stalls["level0_numfiles"], 2.0);
        assert_eq!(stalls["memtable_compaction"], 1000.0);
        assert_eq!(stalls["total"], 3.0);
    }

    #[test]
    fn test_stall_counts_missing_line() {
        let lines = ["** Compaction Stats [default] **", "Flush(GB): cumulative 0.0"];
        assert!(stall_counts(&lines, "** Compaction Stats [default] **").is_empty());
    }
}
