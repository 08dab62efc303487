//! Engine status document: scalar fields reported next to the stats dump.

use serde::Deserialize;

use super::Reading;

/// Fields of the engine's status document, already in typed form.
///
/// The engine reports most scalars as strings ("12", "1.2 GB") and a few
/// as real numbers. Both shapes are normalized into [`Reading`] during
/// deserialization, so nothing downstream has to care which one arrived.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct EngineStatus {
    pub num_immutable_mem_table: Reading,
    pub mem_table_flush_pending: Reading,
    pub compaction_pending: Reading,
    pub background_errors: Reading,
    #[serde(rename = "cur-size-active-mem-table")]
    pub cur_size_mem_table_active: Reading,
    pub cur_size_all_mem_tables: Reading,
    #[serde(rename = "num-entries-active-mem-table")]
    pub num_entries_mem_table_active: Reading,
    pub num_entries_imm_mem_tables: Reading,
    pub estimate_table_readers_mem: Reading,
    pub num_snapshots: Reading,
    pub oldest_snapshot_time: Reading,
    pub num_live_versions: Reading,
    pub block_cache_usage: Reading,
    pub total_live_recovery_units: Reading,
    pub transaction_engine_keys: Reading,
    pub transaction_engine_snapshots: Reading,
    /// The multi-line statistics dump, one entry per line.
    pub stats: Vec<String>,
    /// Background thread listing. Carried through, never parsed.
    pub thread_status: Vec<String>,
}

impl EngineStatus {
    /// Status with only the stats dump populated.
    pub fn from_stats_text(text: &str) -> Self {
        Self {
            stats: text.lines().map(str::to_string).collect(),
            ..Default::default()
        }
    }
}
