//! Caller-owned store of published series.
//!
//! A [`Registry`] is an ordinary value: the caller creates one, publishes
//! each collection cycle's measurements into it and reads or renders it.
//! Every catalog family is registered once, at construction, on a private
//! `prometheus::Registry`, so independent registries never interfere.

use std::collections::{BTreeMap, HashMap};

use prometheus::proto::{MetricFamily, MetricType};
use prometheus::{CounterVec, Encoder, GaugeVec, Opts, TextEncoder};
use serde::Serialize;
use tracing::debug;

use super::catalog::{self, MetricDesc, MetricKind, SUBSYSTEM};
use super::measurement::DerivedMeasurement;

/// One family's metric vector.
enum Family {
    Counter(CounterVec),
    Gauge(GaugeVec),
}

/// Latest value of one series, as read back from the registry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    /// Full name, `<namespace>_rocksdb_<name>`.
    pub name: String,
    pub kind: MetricKind,
    pub labels: BTreeMap<String, String>,
    pub value: f64,
}

pub struct Registry {
    namespace: String,
    inner: prometheus::Registry,
    families: HashMap<&'static str, Family>,
}

impl Registry {
    /// Registers every catalog family under `namespace`. Fails when the
    /// namespace makes an invalid metric name.
    pub fn new(namespace: &str) -> prometheus::Result<Self> {
        let inner = prometheus::Registry::new();
        let mut families = HashMap::with_capacity(catalog::ALL.len());

        for desc in catalog::ALL {
            let opts = Opts::new(desc.name, desc.help)
                .namespace(namespace)
                .subsystem(SUBSYSTEM);
            let family = match desc.kind {
                MetricKind::Counter => {
                    let vec = CounterVec::new(opts, desc.labels)?;
                    inner.register(Box::new(vec.clone()))?;
                    Family::Counter(vec)
                }
                MetricKind::Gauge => {
                    let vec = GaugeVec::new(opts, desc.labels)?;
                    inner.register(Box::new(vec.clone()))?;
                    Family::Gauge(vec)
                }
            };
            families.insert(desc.name, family);
        }

        Ok(Self {
            namespace: namespace.to_string(),
            inner,
            families,
        })
    }

    /// Sets every measured series to its new value. Series absent from
    /// `measurements` keep their previous value.
    ///
    /// Counters are cumulative in the dump, so they are reset and
    /// re-incremented to the measured total. Non-finite values and negative
    /// counter totals are skipped.
    pub fn publish(&mut self, measurements: &[DerivedMeasurement]) -> prometheus::Result<()> {
        for m in measurements {
            let Some(family) = self.families.get(m.metric.name) else {
                debug!(metric = m.metric.name, "metric not in catalog, skipped");
                continue;
            };
            if !m.value.is_finite() {
                debug!(metric = m.metric.name, value = m.value, "non-finite value skipped");
                continue;
            }
            let labels: HashMap<&str, &str> =
                m.labels.iter().map(|(k, v)| (*k, v.as_str())).collect();

            match family {
                Family::Counter(vec) => {
                    if m.value < 0.0 {
                        debug!(metric = m.metric.name, value = m.value, "negative counter total");
                        continue;
                    }
                    let counter = vec.get_metric_with(&labels)?;
                    counter.reset();
                    counter.inc_by(m.value);
                }
                Family::Gauge(vec) => vec.get_metric_with(&labels)?.set(m.value),
            }
        }
        Ok(())
    }

    /// Looks up a published series by metric and labels.
    pub fn get(&self, metric: &MetricDesc, labels: &[(&str, &str)]) -> Option<f64> {
        let name = metric.full_name(&self.namespace);
        let wanted: BTreeMap<String, String> = labels
            .iter()
            .map(|&(k, v)| (k.to_string(), v.to_string()))
            .collect();
        self.series()
            .into_iter()
            .find(|s| s.name == name && s.labels == wanted)
            .map(|s| s.value)
    }

    /// Every published series, ordered by family name.
    pub fn series(&self) -> Vec<Series> {
        self.inner.gather().iter().flat_map(family_series).collect()
    }

    pub fn len(&self) -> usize {
        self.inner
            .gather()
            .iter()
            .map(|mf| mf.get_metric().len())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Prometheus text exposition of every published series:
    ///
    /// ```text
    /// # HELP mongodb_rocksdb_size_bytes The total byte size of levels in RocksDB
    /// # TYPE mongodb_rocksdb_size_bytes gauge
    /// mongodb_rocksdb_size_bytes{level="L0"} 13107200
    /// ```
    pub fn render(&self) -> prometheus::Result<String> {
        let mut buf = Vec::new();
        TextEncoder::new().encode(&self.inner.gather(), &mut buf)?;
        String::from_utf8(buf).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}

fn family_series(mf: &MetricFamily) -> Vec<Series> {
    let kind = match mf.get_field_type() {
        MetricType::COUNTER => MetricKind::Counter,
        _ => MetricKind::Gauge,
    };
    mf.get_metric()
        .iter()
        .map(|m| Series {
            name: mf.get_name().to_string(),
            kind,
            labels: m
                .get_label()
                .iter()
                .map(|l| (l.get_name().to_string(), l.get_value().to_string()))
                .collect(),
            value: match kind {
                MetricKind::Counter => m.get_counter().get_value(),
                MetricKind::Gauge => m.get_gauge().get_value(),
            },
        })
        .collect()
}
