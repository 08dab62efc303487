//! RocksDB statistics collector.
//!
//! Turns the engine's statistics dump (and the status scalars reported next
//! to it) into typed readings and named measurements.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                       load_document                        │
//! │            (path / stdin, JSON status or raw text)         │
//! └─────────────────────────────┬──────────────────────────────┘
//!                               │
//!                        ┌──────▼───────┐
//!                        │ StatsDocument│
//!                        └──────┬───────┘
//!          ┌────────────────────┼────────────────────┐
//!          │                    │                    │
//!   ┌──────▼──────┐      ┌──────▼──────┐      ┌──────▼──────┐
//!   │  section /  │      │   levels    │      │   stalls    │
//!   │  labeled    │      │ (table rows)│      │ (cause map) │
//!   └──────┬──────┘      └──────┬──────┘      └──────┬──────┘
//!          └────────────────────┼────────────────────┘
//!                        ┌──────▼───────┐
//!                        │ StatsReport  │──► measurements ──► Registry
//!                        └──────────────┘
//! ```
//!
//! # Usage
//!
//! ```
//! use rdbstat::collector::{StatsDocument, fixtures::SAMPLE_DUMP, measurements};
//! use rdbstat::config::CollectorConfig;
//! use rdbstat::metrics::Registry;
//!
//! let config = CollectorConfig::default();
//! let doc = StatsDocument::from_text(SAMPLE_DUMP, &config);
//!
//! let mut registry = Registry::new(&config.namespace).unwrap();
//! registry.publish(&measurements(&doc.report())).unwrap();
//! assert!(registry.render().unwrap().contains("mongodb_rocksdb_writes_total 12000"));
//! ```

mod document;
pub mod fixtures;
mod measurements;
pub mod rocksdb;
mod source;

pub use document::StatsDocument;
pub use measurements::measurements;
pub use source::{LoadError, STDIN_PATH, document_from_str, load_document};
