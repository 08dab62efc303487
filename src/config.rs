//! Collector configuration.

/// Settings for turning a stats dump into named measurements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectorConfig {
    /// Metric name prefix, e.g. `mongodb` -> `mongodb_rocksdb_writes_total`.
    pub namespace: String,
    /// Column family whose `** Compaction Stats [..] **` section is read.
    pub column_family: String,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            namespace: "mongodb".to_string(),
            column_family: "default".to_string(),
        }
    }
}

impl CollectorConfig {
    pub fn new(namespace: impl Into<String>, column_family: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            column_family: column_family.into(),
        }
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    pub fn with_column_family(mut self, column_family: impl Into<String>) -> Self {
        self.column_family = column_family.into();
        self
    }

    /// Header line of the configured column family's compaction section.
    pub fn compaction_section(&self) -> String {
        crate::collector::rocksdb::compaction_section(&self.column_family)
    }
}
