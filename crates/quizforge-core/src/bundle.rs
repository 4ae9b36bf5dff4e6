//! Named metric values produced by the quality scorer.
//!
//! A metric is either a scalar, a per-item series, or a text label. Only
//! scalars take part in batch aggregation; the kind is part of the type so
//! aggregation never has to inspect values at runtime.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A single metric value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum MetricValue {
    /// A number: a score in [0, 1], a count, or a length.
    Scalar(f64),
    /// One number per item (per distractor, per option pair).
    Series(Vec<f64>),
    /// A categorical label such as a readability band.
    Label(String),
}

impl MetricValue {
    /// The scalar value, if this metric is one.
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            MetricValue::Scalar(v) => Some(*v),
            MetricValue::Series(_) | MetricValue::Label(_) => None,
        }
    }
}

/// An ordered map of metric name to value for one question.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetricBundle {
    metrics: BTreeMap<String, MetricValue>,
}

impl MetricBundle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a scalar metric, replacing any previous value.
    pub fn scalar(&mut self, name: &str, value: f64) -> &mut Self {
        self.metrics.insert(name.to_string(), MetricValue::Scalar(value));
        self
    }

    /// Insert a series metric, replacing any previous value.
    pub fn series(&mut self, name: &str, values: Vec<f64>) -> &mut Self {
        self.metrics.insert(name.to_string(), MetricValue::Series(values));
        self
    }

    /// Insert a label metric, replacing any previous value.
    pub fn label(&mut self, name: &str, value: impl Into<String>) -> &mut Self {
        self.metrics.insert(name.to_string(), MetricValue::Label(value.into()));
        self
    }

    /// Merge another bundle into this one; keys in `other` win.
    pub fn extend(&mut self, other: MetricBundle) {
        self.metrics.extend(other.metrics);
    }

    pub fn get(&self, name: &str) -> Option<&MetricValue> {
        self.metrics.get(name)
    }

    /// Convenience lookup for scalar metrics.
    pub fn get_scalar(&self, name: &str) -> Option<f64> {
        self.metrics.get(name).and_then(MetricValue::as_scalar)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.metrics.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.metrics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &MetricValue)> {
        self.metrics.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Only the scalar metrics.
    pub fn scalars(&self) -> impl Iterator<Item = (&str, f64)> {
        self.metrics
            .iter()
            .filter_map(|(k, v)| v.as_scalar().map(|s| (k.as_str(), s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalars_skip_series_and_labels() {
        let mut bundle = MetricBundle::new();
        bundle
            .scalar("clarity", 0.9)
            .series("pairwise_similarities", vec![0.1, 0.2])
            .label("readability_level", "College (Undergraduate)");

        let scalars: Vec<_> = bundle.scalars().collect();
        assert_eq!(scalars, vec![("clarity", 0.9)]);
        assert_eq!(bundle.len(), 3);
    }

    #[test]
    fn extend_overwrites() {
        let mut a = MetricBundle::new();
        a.scalar("x", 1.0);
        let mut b = MetricBundle::new();
        b.scalar("x", 2.0).scalar("y", 3.0);
        a.extend(b);
        assert_eq!(a.get_scalar("x"), Some(2.0));
        assert_eq!(a.get_scalar("y"), Some(3.0));
    }

    #[test]
    fn serde_keeps_kind() {
        let mut bundle = MetricBundle::new();
        bundle.scalar("SOS", 0.25).series("DPS_per_distractor", vec![0.5]);
        let json = serde_json::to_string(&bundle).unwrap();
        assert!(json.contains("\"kind\":\"scalar\""));
        let back: MetricBundle = serde_json::from_str(&json).unwrap();
        assert_eq!(back, bundle);
    }
}
