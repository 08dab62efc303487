//! Structured result of one parse pass over a stats document.

use std::collections::BTreeMap;

use serde::Serialize;

use super::{LevelRecord, Reading};

/// Cumulative DB-wide values read from the `** DB Stats **` section and the
/// compaction section's flush line.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DbCounters {
    pub write_ops: Reading,
    pub write_keys: Reading,
    pub write_batches: Reading,
    pub writes_per_batch: Reading,
    pub write_bytes: Reading,
    pub writes_per_sec: Reading,
    pub wal_writes: Reading,
    pub wal_syncs: Reading,
    pub wal_writes_per_sync: Reading,
    pub wal_bytes: Reading,
    pub wal_bytes_per_sec: Reading,
    pub stall_seconds: Reading,
    pub stall_percent: Reading,
    pub flushed_bytes: Reading,
}

/// Instantaneous values taken from the status document scalars.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DbGauges {
    pub immutable_memtables: Reading,
    pub pending_memtable_flushes: Reading,
    pub pending_compactions: Reading,
    pub background_errors: Reading,
    pub memtable_active_bytes: Reading,
    pub memtable_total_bytes: Reading,
    pub memtable_active_entries: Reading,
    pub immutable_memtable_entries: Reading,
    pub estimate_table_readers_bytes: Reading,
    pub snapshots: Reading,
    pub oldest_snapshot_timestamp: Reading,
    pub live_versions: Reading,
    pub block_cache_bytes: Reading,
    pub total_live_recovery_units: Reading,
    pub transaction_engine_keys: Reading,
    pub transaction_engine_snapshots: Reading,
}

/// Everything one pass extracts from a stats document.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StatsReport {
    pub counters: DbCounters,
    pub gauges: DbGauges,
    pub levels: Vec<LevelRecord>,
    /// `1 + highest numeric level id`, or 0 when the table has none.
    pub num_levels: usize,
    /// Stall cause -> count. Ordered so repeated passes serialize identically.
    pub stalls: BTreeMap<String, f64>,
}
