//! rdbstat - RocksDB statistics dump parser.
//!
//! Reads the text statistics dump a MongoRocks node reports (plus the
//! status scalars that come with it) and turns it into typed readings and
//! named measurements.
//!
//! Provides:
//! - `collector`: dump parsers, the `StatsDocument` orchestrator, loading
//! - `model`: `Reading`, level rows, status document, parse report
//! - `metrics`: metric catalog and the caller-owned `Registry`
//! - `config`: namespace and column family selection
//! - `fmt`: human-readable formatting helpers
//!
//! ```
//! use rdbstat::collector::{StatsDocument, fixtures::SAMPLE_DUMP};
//! use rdbstat::config::CollectorConfig;
//! use rdbstat::model::Reading;
//!
//! let doc = StatsDocument::from_text(SAMPLE_DUMP, &CollectorConfig::default());
//! let report = doc.report();
//!
//! assert_eq!(report.counters.write_ops, Reading::Value(12000.0));
//! assert_eq!(report.num_levels, 3);
//! assert_eq!(report.stalls["total"], 3.0);
//! ```

pub mod collector;
pub mod config;
pub mod fmt;
pub mod metrics;
pub mod model;
