//! Loading a stats document from disk, stdin or a string.
//!
//! Two input shapes are accepted:
//! - the engine status document as JSON (`{"stats": [...], "num-snapshots": "0", ...}`)
//! - a bare text dump, as printed by the engine's stats property

use std::io::Read;
use std::path::Path;

use tracing::{debug, info};

use crate::config::CollectorConfig;
use crate::model::EngineStatus;

use super::document::StatsDocument;

/// Path that means "read standard input".
pub const STDIN_PATH: &str = "-";

/// Errors that can occur while loading a document.
#[derive(Debug)]
pub enum LoadError {
    /// I/O error reading the input.
    Io(std::io::Error),
    /// Input looked like a status document but was not valid JSON.
    Json(serde_json::Error),
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadError::Io(e) => write!(f, "I/O error: {}", e),
            LoadError::Json(e) => write!(f, "invalid status document: {}", e),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io(e) => Some(e),
            LoadError::Json(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for LoadError {
    fn from(e: std::io::Error) -> Self {
        LoadError::Io(e)
    }
}

impl From<serde_json::Error> for LoadError {
    fn from(e: serde_json::Error) -> Self {
        LoadError::Json(e)
    }
}

/// Builds a document from input text, detecting its shape by the first
/// non-blank character.
pub fn document_from_str(
    input: &str,
    config: &CollectorConfig,
) -> Result<StatsDocument, LoadError> {
    let status = if input.trim_start().starts_with('{') {
        let status: EngineStatus = serde_json::from_str(input)?;
        debug!(lines = status.stats.len(), "parsed status document");
        status
    } else {
        EngineStatus::from_stats_text(input)
    };
    Ok(StatsDocument::new(status, config))
}

/// Reads `path` (or stdin for `-`) and builds a document from it.
pub fn load_document(
    path: impl AsRef<Path>,
    config: &CollectorConfig,
) -> Result<StatsDocument, LoadError> {
    let path = path.as_ref();
    let input = if path.as_os_str() == STDIN_PATH {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(path)?
    };

    info!(path = %path.display(), bytes = input.len(), "loaded stats input");
    document_from_str(&input, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::fixtures::SAMPLE_DUMP;
    use crate::model::Reading;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_text_dump() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(SAMPLE_DUMP.as_bytes()).unwrap();

        let doc = load_document(file.path(), &CollectorConfig::default()).unwrap();
        assert_eq!(doc.counters().write_ops, Reading::Value(12000.0));
        assert_eq!(doc.status().block_cache_usage, Reading::Missing);
    }

    #[test]
    fn test_load_status_document() {
        let status = serde_json::json!({
            "num-immutable-mem-table": "1",
            "cur-size-all-mem-tables": "2 MB",
            "num-snapshots": 4,
            "stats": SAMPLE_DUMP.lines().collect::<Vec<_>>(),
        });
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "  {}", status).unwrap();

        let doc = load_document(file.path(), &CollectorConfig::default()).unwrap();
        let gauges = doc.gauges();
        assert_eq!(gauges.immutable_memtables, Reading::Value(1.0));
        assert_eq!(gauges.memtable_total_bytes, Reading::Value(2.0 * 1024.0 * 1024.0));
        assert_eq!(gauges.snapshots, Reading::Value(4.0));
        assert_eq!(doc.report().num_levels, 3);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err =
            load_document(dir.path().join("absent"), &CollectorConfig::default()).unwrap_err();
        assert!(matches!(err, LoadError::Io(_)));
    }

    #[test]
    fn test_bad_json() {
        let err = document_from_str("{\"stats\": [", &CollectorConfig::default()).unwrap_err();
        assert!(matches!(err, LoadError::Json(_)));
        assert!(err.to_string().starts_with("invalid status document"));
    }

    #[test]
    fn test_empty_input_is_empty_document() {
        let doc = document_from_str("", &CollectorConfig::default()).unwrap();
        assert!(doc.lines().is_empty());
        assert!(doc.report().levels.is_empty());
    }
}
