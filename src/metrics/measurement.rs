//! The unit handed from the parser to whoever publishes metrics.

use std::collections::BTreeMap;

use serde::Serialize;

use super::catalog::MetricDesc;

/// A named value with its labels, e.g. `size_bytes{level="L3"} 105381888`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivedMeasurement {
    pub metric: &'static MetricDesc,
    pub labels: BTreeMap<&'static str, String>,
    pub value: f64,
}

impl DerivedMeasurement {
    pub fn new(metric: &'static MetricDesc, labels: &[(&'static str, &str)], value: f64) -> Self {
        Self {
            metric,
            labels: labels
                .iter()
                .map(|&(key, value)| (key, value.to_string()))
                .collect(),
            value,
        }
    }
}
