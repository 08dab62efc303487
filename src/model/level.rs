//! Per-level row of the compaction stats table.

use serde::Serialize;

use super::Reading;

/// `files/compaction-threads` column of a level row.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct LevelFiles {
    pub num: f64,
    pub comp_threads: f64,
}

/// One row of the per-level compaction table, converted into base units.
///
/// Byte columns printed in GB/MB by the engine are stored as bytes, and
/// rate columns printed in MB/s as bytes per second.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LevelRecord {
    /// Level identifier as printed ("L0".."L6", "Sum").
    pub level: String,
    /// `None` when the `files/threads` token does not split into two numbers.
    pub files: Option<LevelFiles>,
    pub size_bytes: Reading,
    pub score: Reading,
    pub read_bytes: Reading,
    /// Bytes read from level N.
    pub read_n_bytes: Reading,
    /// Bytes read from level N+1.
    pub read_np1_bytes: Reading,
    pub write_bytes: Reading,
    /// New bytes written into level N+1.
    pub write_new_bytes: Reading,
    pub moved_bytes: Reading,
    pub write_amp: Reading,
    pub read_bytes_per_sec: Reading,
    pub write_bytes_per_sec: Reading,
    pub comp_seconds: Reading,
    pub comp_count: Reading,
    pub avg_seconds: Reading,
    pub keys_in: Reading,
    pub keys_dropped: Reading,
}

impl LevelRecord {
    /// Creates a record with every numeric column missing.
    pub fn new(level: impl Into<String>) -> Self {
        Self {
            level: level.into(),
            files: None,
            size_bytes: Reading::Missing,
            score: Reading::Missing,
            read_bytes: Reading::Missing,
            read_n_bytes: Reading::Missing,
            read_np1_bytes: Reading::Missing,
            write_bytes: Reading::Missing,
            write_new_bytes: Reading::Missing,
            moved_bytes: Reading::Missing,
            write_amp: Reading::Missing,
            read_bytes_per_sec: Reading::Missing,
            write_bytes_per_sec: Reading::Missing,
            comp_seconds: Reading::Missing,
            comp_count: Reading::Missing,
            avg_seconds: Reading::Missing,
            keys_in: Reading::Missing,
            keys_dropped: Reading::Missing,
        }
    }

    /// Numeric part of the level id ("L3" -> 3). `None` for "Sum" and
    /// anything else without a number.
    pub fn level_number(&self) -> Option<u32> {
        let id = self.level.strip_prefix('L').unwrap_or(&self.level);
        id.parse().ok()
    }

    /// L0 is fed from memtable flushes, so inter-level compaction
    /// metrics (reads, moves, amplification, key counts) do not apply.
    pub fn is_memtable_level(&self) -> bool {
        self.level == "L0"
    }
}
