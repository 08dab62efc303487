//! Stats document: the raw dump plus status scalars, and the parse pass
//! that turns them into a [`StatsReport`].

use std::collections::BTreeMap;

use tracing::debug;

use crate::collector::rocksdb::{
    DB_STATS_SECTION, GIGABYTE, labeled_field, level_count, parse_level_table, section_lines,
    stall_counts,
};
use crate::config::CollectorConfig;
use crate::model::{DbCounters, DbGauges, EngineStatus, LevelRecord, Reading, StatsReport};

const CUMULATIVE_WRITES: &str = "Cumulative writes: ";
const CUMULATIVE_WAL: &str = "Cumulative WAL: ";
const CUMULATIVE_STALL: &str = "Cumulative stall: ";
const FLUSH: &str = "Flush(GB): ";

/// One collection cycle's input.
///
/// Stateless: every accessor re-parses the lines it needs, so repeated
/// calls on the same document always agree.
#[derive(Debug, Clone)]
pub struct StatsDocument {
    status: EngineStatus,
    compaction_section: String,
}

impl StatsDocument {
    pub fn new(status: EngineStatus, config: &CollectorConfig) -> Self {
        Self {
            status,
            compaction_section: config.compaction_section(),
        }
    }

    /// Document from a bare text dump, with no status scalars.
    pub fn from_text(text: &str, config: &CollectorConfig) -> Self {
        Self::new(EngineStatus::from_stats_text(text), config)
    }

    pub fn status(&self) -> &EngineStatus {
        &self.status
    }

    pub fn lines(&self) -> &[String] {
        &self.status.stats
    }

    /// Header of the compaction section this document reads.
    pub fn compaction_section(&self) -> &str {
        &self.compaction_section
    }

    pub fn stats_line_field(&self, header: &str, label: &str, idx: usize) -> Reading {
        labeled_field(self.lines(), header, label, idx)
    }

    /// Bytes flushed from memtables, from the compaction section.
    pub fn flushed_bytes(&self) -> Reading {
        self.stats_line_field(&self.compaction_section, FLUSH, 0)
            .scale(GIGABYTE)
    }

    /// Cumulative write, WAL and stall values from `** DB Stats **`.
    pub fn counters(&self) -> DbCounters {
        let writes = |idx| self.stats_line_field(DB_STATS_SECTION, CUMULATIVE_WRITES, idx);
        let wal = |idx| self.stats_line_field(DB_STATS_SECTION, CUMULATIVE_WAL, idx);
        let stall = |idx| self.stats_line_field(DB_STATS_SECTION, CUMULATIVE_STALL, idx);

        DbCounters {
            write_ops: writes(0),
            write_keys: writes(1),
            write_batches: writes(2),
            writes_per_batch: writes(3),
            write_bytes: writes(4),
            writes_per_sec: writes(5),
            wal_writes: wal(0),
            wal_syncs: wal(1),
            wal_writes_per_sync: wal(2),
            wal_bytes: wal(3),
            wal_bytes_per_sec: wal(4),
            stall_seconds: stall(0),
            stall_percent: stall(1),
            flushed_bytes: self.flushed_bytes(),
        }
    }

    /// Status scalars, passed through as already normalized readings.
    pub fn gauges(&self) -> DbGauges {
        let s = &self.status;
        DbGauges {
            immutable_memtables: s.num_immutable_mem_table,
            pending_memtable_flushes: s.mem_table_flush_pending,
            pending_compactions: s.compaction_pending,
            background_errors: s.background_errors,
            memtable_active_bytes: s.cur_size_mem_table_active,
            memtable_total_bytes: s.cur_size_all_mem_tables,
            memtable_active_entries: s.num_entries_mem_table_active,
            immutable_memtable_entries: s.num_entries_imm_mem_tables,
            estimate_table_readers_bytes: s.estimate_table_readers_mem,
            snapshots: s.num_snapshots,
            oldest_snapshot_timestamp: s.oldest_snapshot_time,
            live_versions: s.num_live_versions,
            block_cache_bytes: s.block_cache_usage,
            total_live_recovery_units: s.total_live_recovery_units,
            transaction_engine_keys: s.transaction_engine_keys,
            transaction_engine_snapshots: s.transaction_engine_snapshots,
        }
    }

    /// Rows of the per-level table inside this document's compaction
    /// section. An absent section, or one without a table, has no rows.
    pub fn level_stats(&self) -> Vec<LevelRecord> {
        parse_level_table(&section_lines(self.lines(), &self.compaction_section))
    }

    pub fn stall_counts(&self) -> BTreeMap<String, f64> {
        stall_counts(self.lines(), &self.compaction_section)
    }

    /// Runs every parser once and gathers the results.
    pub fn report(&self) -> StatsReport {
        let levels = self.level_stats();
        let report = StatsReport {
            counters: self.counters(),
            gauges: self.gauges(),
            num_levels: level_count(&levels),
            levels,
            stalls: self.stall_counts(),
        };

        debug!(
            lines = self.lines().len(),
            levels = report.levels.len(),
            num_levels = report.num_levels,
            stall_causes = report.stalls.len(),
            "parsed stats document"
        );

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::fixtures::SAMPLE_DUMP;
    use crate::collector::rocksdb::MEGABYTE;

    fn sample() -> StatsDocument {
        StatsDocument::from_text(SAMPLE_DUMP, &CollectorConfig::default())
    }

    #[test]
    fn test_counters() {
        let c = sample().counters();
        assert_eq!(c.write_ops, Reading::Value(12000.0));
        assert_eq!(c.write_keys, Reading::Value(15000.0));
        assert_eq!(c.write_batches, Reading::Value(10000.0));
        assert_eq!(c.writes_per_batch, Reading::Value(1.2));
        assert_eq!(c.write_bytes, Reading::Value(1.5 * GIGABYTE));
        assert_eq!(c.writes_per_sec, Reading::Value(0.43 * MEGABYTE));
        assert_eq!(c.wal_writes, Reading::Value(12000.0));
        assert_eq!(c.wal_syncs, Reading::Value(300.0));
        assert_eq!(c.wal_writes_per_sync, Reading::Value(40.0));
        assert_eq!(c.wal_bytes, Reading::Value(1.25 * GIGABYTE));
        assert_eq!(c.wal_bytes_per_sec, Reading::Value(0.36 * MEGABYTE));
        assert_eq!(c.stall_seconds, Reading::Value(90.5));
        assert_eq!(c.stall_percent, Reading::Value(2.5));
        assert_eq!(c.flushed_bytes, Reading::Value(0.5 * GIGABYTE));
    }

    #[test]
    fn test_level_stats() {
        let doc = sample();
        let levels = doc.level_stats();
        let ids: Vec<&str> = levels.iter().map(|l| l.level.as_str()).collect();
        assert_eq!(ids, vec!["L0", "L1", "L2", "Sum"]);
        assert_eq!(levels[2].size_bytes, Reading::Value(256.0 * MEGABYTE));
        assert_eq!(levels[1].keys_in, Reading::Value(12000.0));
    }

    #[test]
    fn test_stall_counts() {
        let stalls = sample().stall_counts();
        assert_eq!(stalls.len(), 5);
        assert_eq!(stalls["level0_numfiles"], 2.0);
        assert_eq!(stalls["total"], 3.0);
    }

    #[test]
    fn test_report() {
        let report = sample().report();
        assert_eq!(report.levels.len(), 4);
        assert_eq!(report.num_levels, 3);
        assert_eq!(report.gauges.block_cache_bytes, Reading::Missing);
    }

    #[test]
    fn test_report_is_idempotent() {
        let doc = sample();
        let first = serde_json::to_string(&doc.report()).unwrap();
        let second = serde_json::to_string(&doc.report()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_other_column_family() {
        let text = "\
** Compaction Stats [oplogCF] **
Level Files Size
------
  L0  1/0  1.00 MB  0.1
 Int  0/0  0.00 KB  0.0
Flush(GB): cumulative 2.000, interval 0.000
Stalls(count): 4 total
";
        let config = CollectorConfig::default().with_column_family("oplogCF");
        let doc = StatsDocument::from_text(text, &config);
        assert_eq!(doc.flushed_bytes(), Reading::Value(2.0 * GIGABYTE));
        assert_eq!(doc.stall_counts()["total"], 4.0);
        assert_eq!(doc.level_stats().len(), 1);

        let default_doc = StatsDocument::from_text(text, &CollectorConfig::default());
        assert_eq!(default_doc.flushed_bytes(), Reading::Missing);
        assert!(default_doc.stall_counts().is_empty());
        assert!(default_doc.level_stats().is_empty());
    }

    #[test]
    fn test_absent_column_family_has_no_levels() {
        let config = CollectorConfig::default().with_column_family("missingCF");
        let report = StatsDocument::from_text(SAMPLE_DUMP, &config).report();
        assert_eq!(report.counters.flushed_bytes, Reading::Missing);
        assert!(report.levels.is_empty());
        assert_eq!(report.num_levels, 0);
        assert!(report.stalls.is_empty());
    }

    #[test]
    fn test_tableless_section_does_not_borrow_next_table() {
        let text = "\
** Compaction Stats [oplogCF] **
Flush(GB): cumulative 2.000, interval 0.000
** Compaction Stats [other] **
Level Files Size
------
  L0  1/0  1.00 MB  0.1
  L4  1/0  1.00 MB  0.1
 Int  0/0  0.00 KB  0.0
";
        let config = CollectorConfig::default().with_column_family("oplogCF");
        let report = StatsDocument::from_text(text, &config).report();
        assert_eq!(report.counters.flushed_bytes, Reading::Value(2.0 * GIGABYTE));
        assert!(report.levels.is_empty());
        assert_eq!(report.num_levels, 0);
    }

    #[test]
    fn test_empty_document() {
        let report = StatsDocument::from_text("", &CollectorConfig::default()).report();
        assert_eq!(report.counters.write_ops, Reading::Missing);
        assert!(report.levels.is_empty());
        assert_eq!(report.num_levels, 0);
        assert!(report.stalls.is_empty());
    }

    #[test]
    fn test_garbage_document() {
        let text = "** DB Stats **\nCumulative writes: lots, many\n\
                    ** Compaction Stats [default] **\n------\n L1 x/y ? ? ?\n";
        let doc = StatsDocument::from_text(text, &CollectorConfig::default());
        let counters = doc.counters();
        assert_eq!(counters.write_ops, Reading::Malformed);
        assert_eq!(counters.write_bytes, Reading::Missing);
        let levels = doc.level_stats();
        assert_eq!(levels.len(), 1);
        assert_eq!(levels[0].files, None);
        assert_eq!(levels[0].size_bytes, Reading::Malformed);
    }
}
