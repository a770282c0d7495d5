use crate::value::CellValue;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Body of `POST /classify`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifyRequest {
    pub feat1: String,
    pub feat2: String,
}

/// A data point with its assigned cluster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledPoint {
    /// Index into [`ClusterResult::centroids`].
    pub cluster: usize,
    /// Feature name to value, for the two requested features.
    #[serde(flatten)]
    pub features: HashMap<String, CellValue>,
}

impl LabeledPoint {
    pub fn feature(&self, name: &str) -> Option<f64> {
        self.features.get(name).and_then(CellValue::as_number)
    }
}

/// Response of `POST /classify`: k-means centroids over the two requested
/// features and every input point tagged with its cluster.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ClusterResult {
    #[serde(default)]
    pub centroids: Vec<Vec<f64>>,
    #[serde(default)]
    pub labeled_data: Vec<LabeledPoint>,
}

impl ClusterResult {
    /// Index of the first point whose cluster is not a valid centroid index.
    pub fn first_invalid_label(&self) -> Option<usize> {
        self.labeled_data
            .iter()
            .position(|p| p.cluster >= self.centroids.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_classifier_output() {
        let json = r#"{
            "centroids": [[10.0, 2.0], [40.0, 6.5]],
            "labeled_data": [
                {"energy_consumed_kwh": 9.5, "charging_duration_hours": 1.8, "cluster": 0},
                {"energy_consumed_kwh": 41.0, "charging_duration_hours": 6.0, "cluster": 1}
            ]
        }"#;
        let result: ClusterResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.centroids.len(), 2);
        assert_eq!(result.labeled_data[1].cluster, 1);
        assert_eq!(result.labeled_data[1].feature("energy_consumed_kwh"), Some(41.0));
        assert_eq!(result.first_invalid_label(), None);
    }

    #[test]
    fn detects_out_of_range_labels() {
        let json = r#"{
            "centroids": [[1.0, 1.0]],
            "labeled_data": [{"a": 1, "b": 2, "cluster": 0}, {"a": 3, "b": 4, "cluster": 3}]
        }"#;
        let result: ClusterResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.first_invalid_label(), Some(1));
    }

    #[test]
    fn request_serializes_feature_names() {
        let body = serde_json::to_value(ClassifyRequest {
            feat1: "energy_consumed_kwh".into(),
            feat2: "charging_rate_kw".into(),
        })
        .unwrap();
        assert_eq!(
            body,
            serde_json::json!({"feat1": "energy_consumed_kwh", "feat2": "charging_rate_kw"})
        );
    }
}
