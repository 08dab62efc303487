//! Metric catalog, derived measurements and the caller-owned registry.

pub mod catalog;
mod measurement;
mod registry;

pub use catalog::{MetricDesc, MetricKind};
pub use measurement::DerivedMeasurement;
pub use registry::{Registry, Series};
