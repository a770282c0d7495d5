//! Cluster view: feature selection and partitioning of classifier output.

use crate::chart::ScatterPoint;
use evcs_model::{ApiError, ClassifyRequest, ClusterResult};
use thiserror::Error;

/// Why a pair of feature selections cannot be classified.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    /// At least one selector is still empty. Not shown to the user.
    #[error("two features must be selected")]
    Incomplete,

    /// Both selectors hold the same feature.
    #[error("Please select two different features (both are set to {0}).")]
    SameFeature(String),
}

impl SelectionError {
    /// Whether the user should get a blocking notice for this error.
    pub fn is_user_facing(&self) -> bool {
        matches!(self, SelectionError::SameFeature(_))
    }
}

/// Build the classify request for two selector values.
pub fn validate_selection(feat1: &str, feat2: &str) -> Result<ClassifyRequest, SelectionError> {
    let (feat1, feat2) = (feat1.trim(), feat2.trim());
    if feat1.is_empty() || feat2.is_empty() {
        return Err(SelectionError::Incomplete);
    }
    if feat1 == feat2 {
        return Err(SelectionError::SameFeature(feat1.to_string()));
    }
    Ok(ClassifyRequest {
        feat1: feat1.to_string(),
        feat2: feat2.to_string(),
    })
}

/// The points assigned to one cluster.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterPartition {
    pub cluster: usize,
    pub points: Vec<ScatterPoint>,
}

/// Split labeled points by cluster, one partition per centroid in centroid
/// order. Points missing either feature value are left out.
///
/// A label outside the centroid range means the response is corrupt and the
/// whole result is rejected.
pub fn partition(
    result: &ClusterResult,
    feat1: &str,
    feat2: &str,
) -> Result<Vec<ClusterPartition>, ApiError> {
    if let Some(index) = result.first_invalid_label() {
        return Err(ApiError::InvalidResponse(format!(
            "labeled point {} has cluster {} but only {} centroids were returned",
            index,
            result.labeled_data[index].cluster,
            result.centroids.len()
        )));
    }

    let mut partitions: Vec<ClusterPartition> = (0..result.centroids.len())
        .map(|cluster| ClusterPartition {
            cluster,
            points: Vec::new(),
        })
        .collect();

    let mut skipped = 0usize;
    for point in &result.labeled_data {
        match (point.feature(feat1), point.feature(feat2)) {
            (Some(x), Some(y)) => partitions[point.cluster].points.push(ScatterPoint { x, y }),
            _ => skipped += 1,
        }
    }
    if skipped > 0 {
        log::warn!("cluster view: skipped {} points without {}/{}", skipped, feat1, feat2);
    }

    Ok(partitions)
}

/// Centroids as scatter points; centroids with fewer than two coordinates
/// are dropped.
pub fn centroid_points(result: &ClusterResult) -> Vec<ScatterPoint> {
    result
        .centroids
        .iter()
        .filter_map(|c| match c.as_slice() {
            [x, y, ..] => Some(ScatterPoint { x: *x, y: *y }),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(json: &str) -> ClusterResult {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn same_feature_is_rejected_with_notice() {
        let err = validate_selection("energy_consumed_kwh", "energy_consumed_kwh").unwrap_err();
        assert_eq!(err, SelectionError::SameFeature("energy_consumed_kwh".into()));
        assert!(err.is_user_facing());
    }

    #[test]
    fn incomplete_selection_is_silent() {
        let err = validate_selection("", "charging_rate_kw").unwrap_err();
        assert_eq!(err, SelectionError::Incomplete);
        assert!(!err.is_user_facing());
    }

    #[test]
    fn distinct_features_build_a_request() {
        let req = validate_selection("energy_consumed_kwh", "charging_rate_kw").unwrap();
        assert_eq!(req.feat1, "energy_consumed_kwh");
        assert_eq!(req.feat2, "charging_rate_kw");
    }

    #[test]
    fn partitions_follow_centroid_order() {
        let r = result(
            r#"{
            "centroids": [[1, 1], [10, 10], [20, 20]],
            "labeled_data": [
                {"a": 9, "b": 11, "cluster": 1},
                {"a": 1, "b": 2, "cluster": 0},
                {"a": 11, "b": 10, "cluster": 1},
                {"a": "x", "b": 10, "cluster": 0}
            ]
        }"#,
        );
        let parts = partition(&r, "a", "b").unwrap();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0].points, vec![ScatterPoint { x: 1.0, y: 2.0 }]);
        assert_eq!(parts[1].points.len(), 2);
        assert!(parts[2].points.is_empty());
        assert_eq!(centroid_points(&r).len(), 3);
    }

    #[test]
    fn out_of_range_label_rejects_result() {
        let r = result(r#"{"centroids": [[1, 1]], "labeled_data": [{"a": 1, "b": 1, "cluster": 2}]}"#);
        assert!(matches!(
            partition(&r, "a", "b"),
            Err(ApiError::InvalidResponse(_))
        ));
    }

    #[test]
    fn empty_result_gives_no_partitions() {
        let parts = partition(&ClusterResult::default(), "a", "b").unwrap();
        assert!(parts.is_empty());
    }
}
