//! Section and labeled-line lookup inside a stats dump.
//!
//! A dump is a flat list of lines. Sections open with a header such as
//! `** DB Stats **` and run until the next `** ... **` line. Inside a
//! section, key-value lines look like
//! `Cumulative WAL: 3 writes, 0 syncs, 3.00 writes per sync, ...`.

use crate::model::Reading;

use super::units::parse_unit_value;

/// Header of the DB-wide statistics section.
pub const DB_STATS_SECTION: &str = "** DB Stats **";

/// Header of the per-column-family compaction section.
pub fn compaction_section(column_family: &str) -> String {
    format!("** Compaction Stats [{}] **", column_family)
}

/// True for `** Name **` lines, which delimit sections.
pub fn is_section_header(line: &str) -> bool {
    line.starts_with("** ") && line.ends_with(" **")
}

/// Returns the non-blank lines strictly between the first line starting
/// with `header` and the next section header.
///
/// An absent section is an empty result, not an error.
pub fn section_lines<'a, S: AsRef<str>>(lines: &'a [S], header: &str) -> Vec<&'a str> {
    let mut rest = lines
        .iter()
        .map(|line| line.as_ref())
        .skip_while(|line| !line.starts_with(header));

    if rest.next().is_none() {
        return Vec::new();
    }

    rest.take_while(|line| !is_section_header(line))
        .filter(|line| !line.trim().is_empty())
        .collect()
}

/// Finds the last line in the section that starts with `label` and splits
/// what follows the label on `", "`.
pub fn labeled_fields<'a, S: AsRef<str>>(
    lines: &'a [S],
    header: &str,
    label: &str,
) -> Vec<&'a str> {
    section_lines(lines, header)
        .into_iter()
        .filter_map(|line| line.strip_prefix(label))
        .last()
        .map(|rest| rest.split(", ").collect())
        .unwrap_or_default()
}

/// Parses field `idx` of a labeled line. Out-of-range indexes are
/// [`Reading::Missing`]: engine versions differ in how many fields they print.
pub fn labeled_field<S: AsRef<str>>(lines: &[S], header: &str, label: &str, idx: usize) -> Reading {
    labeled_fields(lines, header, label)
        .get(idx)
        .map_or(Reading::Missing, |field| parse_unit_value(field))
}
