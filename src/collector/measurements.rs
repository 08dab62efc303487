//! Flattens a [`StatsReport`] into named measurements.

use tracing::debug;

use crate::metrics::DerivedMeasurement;
use crate::metrics::MetricDesc;
use crate::metrics::catalog::*;
use crate::model::{LevelRecord, Reading, StatsReport};

/// Accumulates measurements, dropping readings that carry no value.
#[derive(Default)]
struct MeasurementSet {
    out: Vec<DerivedMeasurement>,
}

impl MeasurementSet {
    fn push(
        &mut self,
        metric: &'static MetricDesc,
        labels: &[(&'static str, &str)],
        reading: Reading,
    ) {
        match reading {
            Reading::Value(v) => self.out.push(DerivedMeasurement::new(metric, labels, v)),
            Reading::Malformed => {
                debug!(metric = metric.name, ?labels, "malformed reading skipped")
            }
            Reading::Missing => {}
        }
    }

    fn counters(&mut self, report: &StatsReport) {
        let c = &report.counters;
        self.push(&WRITES, &[], c.write_ops);
        self.push(&WRITE_KEYS, &[], c.write_keys);
        self.push(&WRITE_BATCHES, &[], c.write_batches);
        self.push(&WRITES_PER_BATCH, &[], c.writes_per_batch);
        self.push(&WRITE_BYTES, &[], c.write_bytes);
        self.push(&WRITES_PER_SECOND, &[], c.writes_per_sec);
        self.push(&WAL_OPERATIONS, &[("type", "write")], c.wal_writes);
        self.push(&WAL_OPERATIONS, &[("type", "sync")], c.wal_syncs);
        self.push(&WAL_WRITES_PER_SYNC, &[], c.wal_writes_per_sync);
        self.push(&WAL_BYTES, &[], c.wal_bytes);
        self.push(&WAL_BYTES_PER_SECOND, &[], c.wal_bytes_per_sec);
        self.push(&STALLED_SECONDS, &[], c.stall_seconds);
        self.push(&STALL_PERCENT, &[], c.stall_percent);
        self.push(&FLUSHED_BYTES, &[], c.flushed_bytes);
    }

    fn gauges(&mut self, report: &StatsReport) {
        let g = &report.gauges;
        self.push(&IMMUTABLE_MEMTABLES, &[], g.immutable_memtables);
        self.push(&PENDING_MEMTABLE_FLUSHES, &[], g.pending_memtable_flushes);
        self.push(&PENDING_COMPACTIONS, &[], g.pending_compactions);
        self.push(&BACKGROUND_ERRORS, &[], g.background_errors);
        self.push(&MEMTABLE_BYTES, &[("type", "active")], g.memtable_active_bytes);
        self.push(&MEMTABLE_BYTES, &[("type", "total")], g.memtable_total_bytes);
        self.push(&MEMTABLE_ACTIVE_ENTRIES, &[], g.memtable_active_entries);
        self.push(&IMMUTABLE_MEMTABLE_ENTRIES, &[], g.immutable_memtable_entries);
        self.push(&TABLE_READERS_MEMORY_BYTES, &[], g.estimate_table_readers_bytes);
        self.push(&SNAPSHOTS, &[], g.snapshots);
        self.push(&OLDEST_SNAPSHOT_TIMESTAMP, &[], g.oldest_snapshot_timestamp);
        self.push(&LIVE_VERSIONS, &[], g.live_versions);
        self.push(&BLOCK_CACHE_BYTES, &[], g.block_cache_bytes);
        self.push(&TOTAL_LIVE_RECOVERY_UNITS, &[], g.total_live_recovery_units);
        self.push(&TRANSACTION_ENGINE_KEYS, &[], g.transaction_engine_keys);
        self.push(&TRANSACTION_ENGINE_SNAPSHOTS, &[], g.transaction_engine_snapshots);
    }

    fn level(&mut self, record: &LevelRecord) {
        let level = record.level.as_str();
        let at = [("level", level)];
        let typed = |kind: &'static str| [("level", level), ("type", kind)];

        // L0 has no inter-level read side.
        if !record.is_memtable_level() {
            self.push(&COMPACTION_BYTES, &typed("read"), record.read_bytes);
            self.push(&COMPACTION_BYTES, &typed("read_n"), record.read_n_bytes);
            self.push(&COMPACTION_BYTES, &typed("read_np1"), record.read_np1_bytes);
            self.push(&COMPACTION_BYTES, &typed("moved"), record.moved_bytes);
            self.push(&COMPACTION_BYTES_PER_SECOND, &typed("read"), record.read_bytes_per_sec);
            self.push(&COMPACTION_WRITE_AMPLIFICATION, &at, record.write_amp);
            self.push(&COMPACTION_KEYS, &typed("in"), record.keys_in);
            self.push(&COMPACTION_KEYS, &typed("drop"), record.keys_dropped);
        }

        self.push(&LEVEL_SCORE, &at, record.score);
        match record.files {
            Some(files) => {
                self.push(&LEVEL_FILES, &at, Reading::Value(files.num));
                self.push(&COMPACTION_THREADS, &at, Reading::Value(files.comp_threads));
            }
            None => debug!(level, "no files/threads for level, gauges omitted"),
        }
        self.push(&LEVEL_SIZE_BYTES, &at, record.size_bytes);
        self.push(&COMPACTION_SECONDS, &at, record.comp_seconds);
        self.push(&COMPACTION_AVG_SECONDS, &at, record.avg_seconds);
        self.push(&COMPACTION_BYTES, &typed("write"), record.write_bytes);
        self.push(&COMPACTION_BYTES, &typed("write_new_np1"), record.write_new_bytes);
        self.push(&COMPACTION_BYTES_PER_SECOND, &typed("write"), record.write_bytes_per_sec);
        self.push(&COMPACTIONS, &at, record.comp_count);
    }
}

/// Every measurement a report yields, in catalog order per section:
/// DB-wide counters, status gauges, per-level values, level count, stalls.
pub fn measurements(report: &StatsReport) -> Vec<DerivedMeasurement> {
    let mut set = MeasurementSet::default();

    set.counters(report);
    set.gauges(report);
    for record in &report.levels {
        set.level(record);
    }
    if !report.levels.is_empty() {
        set.push(&NUM_LEVELS, &[], Reading::Value(report.num_levels as f64));
    }
    for (cause, count) in &report.stalls {
        set.push(&STALLS, &[("type", cause.as_str())], Reading::Value(*count));
    }

    set.out
}
