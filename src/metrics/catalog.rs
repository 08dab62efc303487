//! Catalog of every metric family derived from a stats document.

use serde::Serialize;

/// Subsystem segment placed between the namespace and the metric name.
pub const SUBSYSTEM: &str = "rocksdb";

/// How a publisher should treat the value. Counters are cumulative in the
/// dump itself, so each cycle publishes the dump's total, never a sum
/// across cycles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricKind {
    Counter,
    Gauge,
}

/// Static description of a metric family.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct MetricDesc {
    pub name: &'static str,
    pub help: &'static str,
    pub kind: MetricKind,
    /// Label keys every series of this family carries.
    pub labels: &'static [&'static str],
}

impl MetricDesc {
    const fn counter(
        name: &'static str,
        help: &'static str,
        labels: &'static [&'static str],
    ) -> Self {
        Self {
            name,
            help,
            kind: MetricKind::Counter,
            labels,
        }
    }

    const fn gauge(
        name: &'static str,
        help: &'static str,
        labels: &'static [&'static str],
    ) -> Self {
        Self {
            name,
            help,
            kind: MetricKind::Gauge,
            labels,
        }
    }

    /// `<namespace>_rocksdb_<name>`; the namespace is dropped when empty.
    pub fn full_name(&self, namespace: &str) -> String {
        if namespace.is_empty() {
            format!("{}_{}", SUBSYSTEM, self.name)
        } else {
            format!("{}_{}_{}", namespace, SUBSYSTEM, self.name)
        }
    }
}

const NONE: &[&str] = &[];
const TYPE: &[&str] = &["type"];
const LEVEL: &[&str] = &["level"];
const LEVEL_TYPE: &[&str] = &["level", "type"];

// Cumulative DB-wide values.
pub const WRITES: MetricDesc =
    MetricDesc::counter("writes_total", "The total number of write operations in RocksDB", NONE);
pub const WRITE_KEYS: MetricDesc = MetricDesc::counter(
    "writes_key_total",
    "The total number of key write operations in RocksDB",
    NONE,
);
pub const WRITE_BATCHES: MetricDesc = MetricDesc::counter(
    "write_batches_total",
    "The total number of write batches in RocksDB",
    NONE,
);
pub const WRITE_BYTES: MetricDesc =
    MetricDesc::counter("write_bytes_total", "The total number of data written by RocksDB", NONE);
pub const FLUSHED_BYTES: MetricDesc = MetricDesc::counter(
    "flushed_bytes_total",
    "The total number of flushed bytes in RocksDB",
    NONE,
);
pub const WAL_OPERATIONS: MetricDesc = MetricDesc::counter(
    "write_ahead_log_operations_total",
    "The total number of Write-Ahead-Log operations in RocksDB",
    TYPE,
);
pub const WAL_BYTES: MetricDesc = MetricDesc::counter(
    "write_ahead_log_bytes_total",
    "The total number of bytes written to the Write-Ahead-Log in RocksDB",
    NONE,
);
pub const STALLED_SECONDS: MetricDesc = MetricDesc::counter(
    "stalled_seconds_total",
    "The total number of seconds RocksDB has spent stalled",
    NONE,
);
pub const STALLS: MetricDesc =
    MetricDesc::counter("stalls_total", "The total number of stalls in RocksDB", TYPE);

// Per-level cumulative values.
pub const COMPACTION_BYTES: MetricDesc = MetricDesc::counter(
    "compaction_bytes_total",
    "Total bytes processed during compaction between levels N and N+1 in RocksDB",
    LEVEL_TYPE,
);
pub const COMPACTION_SECONDS: MetricDesc = MetricDesc::counter(
    "compaction_seconds_total",
    "The time spent doing compactions between levels N and N+1 in RocksDB",
    LEVEL,
);
pub const COMPACTIONS: MetricDesc = MetricDesc::counter(
    "compactions_total",
    "The total number of compactions between levels N and N+1 in RocksDB",
    LEVEL,
);
pub const COMPACTION_KEYS: MetricDesc = MetricDesc::counter(
    "compaction_keys_total",
    "The number of keys compared during compactions in RocksDB",
    LEVEL_TYPE,
);

// DB-wide instantaneous values.
pub const IMMUTABLE_MEMTABLES: MetricDesc = MetricDesc::gauge(
    "immutable_memtables",
    "The total number of immutable MemTables in RocksDB",
    NONE,
);
pub const PENDING_MEMTABLE_FLUSHES: MetricDesc = MetricDesc::gauge(
    "pending_memtable_flushes",
    "The total number of MemTable flushes pending in RocksDB",
    NONE,
);
pub const PENDING_COMPACTIONS: MetricDesc = MetricDesc::gauge(
    "pending_compactions",
    "The total number of compactions pending in RocksDB",
    NONE,
);
pub const BACKGROUND_ERRORS: MetricDesc = MetricDesc::gauge(
    "background_errors",
    "The total number of background errors in RocksDB",
    NONE,
);
pub const MEMTABLE_BYTES: MetricDesc =
    MetricDesc::gauge("memtable_bytes", "The current number of MemTable bytes in RocksDB", TYPE);
pub const MEMTABLE_ACTIVE_ENTRIES: MetricDesc = MetricDesc::gauge(
    "memtable_active_entries",
    "The current number of active MemTable entries in RocksDB",
    NONE,
);
pub const IMMUTABLE_MEMTABLE_ENTRIES: MetricDesc = MetricDesc::gauge(
    "immutable_memtable_entries",
    "The current number of immutable MemTable entries in RocksDB",
    NONE,
);
pub const TABLE_READERS_MEMORY_BYTES: MetricDesc = MetricDesc::gauge(
    "estimate_table_readers_memory_bytes",
    "The estimate RocksDB table-reader memory bytes",
    NONE,
);
pub const SNAPSHOTS: MetricDesc =
    MetricDesc::gauge("snapshots", "The current number of snapshots in RocksDB", NONE);
pub const OLDEST_SNAPSHOT_TIMESTAMP: MetricDesc = MetricDesc::gauge(
    "oldest_snapshot_timestamp",
    "The timestamp of the oldest snapshot in RocksDB",
    NONE,
);
pub const LIVE_VERSIONS: MetricDesc =
    MetricDesc::gauge("live_versions", "The current number of live versions in RocksDB", NONE);
pub const TOTAL_LIVE_RECOVERY_UNITS: MetricDesc = MetricDesc::gauge(
    "total_live_recovery_units",
    "The total number of live recovery units in RocksDB",
    NONE,
);
pub const BLOCK_CACHE_BYTES: MetricDesc =
    MetricDesc::gauge("block_cache_bytes", "The bytes used in the RocksDB Block Cache", NONE);
pub const TRANSACTION_ENGINE_KEYS: MetricDesc = MetricDesc::gauge(
    "transaction_engine_keys",
    "The current number of transaction engine keys in RocksDB",
    NONE,
);
pub const TRANSACTION_ENGINE_SNAPSHOTS: MetricDesc = MetricDesc::gauge(
    "transaction_engine_snapshots",
    "The current number of transaction engine snapshots in RocksDB",
    NONE,
);
pub const WRITES_PER_BATCH: MetricDesc =
    MetricDesc::gauge("writes_per_batch", "The number of writes per batch in RocksDB", NONE);
pub const WRITES_PER_SECOND: MetricDesc =
    MetricDesc::gauge("writes_per_second", "The number of writes per second in RocksDB", NONE);
pub const STALL_PERCENT: MetricDesc =
    MetricDesc::gauge("stall_percent", "The percentage of time RocksDB has been stalled", NONE);
pub const WAL_WRITES_PER_SYNC: MetricDesc = MetricDesc::gauge(
    "write_ahead_log_writes_per_sync",
    "The number of writes per Write-Ahead-Log sync in RocksDB",
    NONE,
);
pub const WAL_BYTES_PER_SECOND: MetricDesc = MetricDesc::gauge(
    "write_ahead_log_bytes_per_second",
    "The number of bytes written per second by the Write-Ahead-Log in RocksDB",
    NONE,
);

// Per-level instantaneous values.
pub const NUM_LEVELS: MetricDesc =
    MetricDesc::gauge("num_levels", "The number of compaction levels in RocksDB", NONE);
pub const LEVEL_FILES: MetricDesc =
    MetricDesc::gauge("num_files", "The number of files in a RocksDB level", LEVEL);
pub const COMPACTION_THREADS: MetricDesc = MetricDesc::gauge(
    "compaction_file_threads",
    "The number of threads currently doing compaction for levels in RocksDB",
    LEVEL,
);
pub const LEVEL_SCORE: MetricDesc =
    MetricDesc::gauge("compaction_score", "The compaction score of RocksDB levels", LEVEL);
pub const LEVEL_SIZE_BYTES: MetricDesc =
    MetricDesc::gauge("size_bytes", "The total byte size of levels in RocksDB", LEVEL);
pub const COMPACTION_BYTES_PER_SECOND: MetricDesc = MetricDesc::gauge(
    "compaction_bytes_per_second",
    "The rate at which data is processed during compaction between levels N and N+1 in RocksDB",
    LEVEL_TYPE,
);
pub const COMPACTION_WRITE_AMPLIFICATION: MetricDesc = MetricDesc::gauge(
    "compaction_write_amplification",
    "The write amplification factor from compaction between levels N and N+1 in RocksDB",
    LEVEL,
);
pub const COMPACTION_AVG_SECONDS: MetricDesc = MetricDesc::gauge(
    "compaction_avg_seconds",
    "The average time per compaction between levels N and N+1 in RocksDB",
    LEVEL,
);

/// Every family, in publishing order.
pub const ALL: &[&MetricDesc] = &[
    &WRITES,
    &WRITE_KEYS,
    &WRITE_BATCHES,
    &WRITE_BYTES,
    &WRITES_PER_BATCH,
    &WRITES_PER_SECOND,
    &FLUSHED_BYTES,
    &WAL_OPERATIONS,
    &WAL_BYTES,
    &WAL_BYTES_PER_SECOND,
    &WAL_WRITES_PER_SYNC,
    &STALL_PERCENT,
    &STALLED_SECONDS,
    &NUM_LEVELS,
    &LEVEL_FILES,
    &COMPACTION_THREADS,
    &LEVEL_SIZE_BYTES,
    &LEVEL_SCORE,
    &COMPACTION_BYTES,
    &COMPACTION_BYTES_PER_SECOND,
    &COMPACTION_WRITE_AMPLIFICATION,
    &COMPACTION_SECONDS,
    &COMPACTION_AVG_SECONDS,
    &COMPACTIONS,
    &COMPACTION_KEYS,
    &IMMUTABLE_MEMTABLES,
    &PENDING_MEMTABLE_FLUSHES,
    &PENDING_COMPACTIONS,
    &BACKGROUND_ERRORS,
    &MEMTABLE_BYTES,
    &MEMTABLE_ACTIVE_ENTRIES,
    &IMMUTABLE_MEMTABLE_ENTRIES,
    &TABLE_READERS_MEMORY_BYTES,
    &SNAPSHOTS,
    &OLDEST_SNAPSHOT_TIMESTAMP,
    &LIVE_VERSIONS,
    &TOTAL_LIVE_RECOVERY_UNITS,
    &BLOCK_CACHE_BYTES,
    &TRANSACTION_ENGINE_KEYS,
    &TRANSACTION_ENGINE_SNAPSHOTS,
    &STALLS,
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_names_are_unique() {
        let names: HashSet<&str> = ALL.iter().map(|m| m.name).collect();
        assert_eq!(names.len(), ALL.len());
    }

    #[test]
    fn test_counters_end_in_total() {
        for metric in ALL.iter().filter(|m| m.kind == MetricKind::Counter) {
            assert!(metric.name.ends_with("_total"), "{}", metric.name);
        }
    }

    #[test]
    fn test_full_name() {
        assert_eq!(WRITES.full_name("mongodb"), "mongodb_rocksdb_writes_total");
        assert_eq!(WRITES.full_name(""), "rocksdb_writes_total");
    }
}
