//! Parsers for the RocksDB statistics dump.
//!
//! These are pure functions over the dump's lines. They never fail: absent
//! sections, labels or fields come back as [`Reading::Missing`](crate::model::Reading)
//! or an empty collection, unreadable text as `Reading::Malformed`.

pub mod levels;
pub mod section;
pub mod stalls;
pub mod units;

pub use levels::{level_count, parse_files, parse_level_row, parse_level_table};
pub use section::{
    DB_STATS_SECTION, compaction_section, is_section_header, labeled_field, labeled_fields,
    section_lines,
};
pub use stalls::{STALLS_LABEL, parse_stall_counts, stall_counts};
pub use units::{
    GIGABYTE, KILOBYTE, MEGABYTE, PETABYTE, TERABYTE, parse_duration, parse_unit_value, split_ws,
};
