// src/model/mod.rs — Trained binary classifier
//
// Artifacts are plain JSON documents loaded once at start-up. Scoring
// checks the incoming row against the training schema before touching any
// weights, so a column drift fails loudly instead of scoring garbage.

pub mod logistic;
mod math;
pub mod trees;

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::features::FeatureVector;
use crate::infra::errors::ServiceError;

pub use logistic::LogisticModel;
pub use trees::{Tree, TreeEnsemble, TreeNode};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum InferenceError {
    #[error("Feature schema mismatch: expected {expected} columns, got {got} ({detail})")]
    SchemaMismatch {
        expected: usize,
        got: usize,
        detail: String,
    },

    #[error("Model produced an invalid probability: {0}")]
    InvalidProbability(f64),
}

/// Anything that can score a feature row.
#[cfg_attr(test, mockall::automock)]
pub trait Classifier: Send + Sync {
    /// `[p(class 0), p(class 1)]`.
    fn predict_proba(&self, features: &FeatureVector) -> Result<[f64; 2], InferenceError>;
}

/// Every model format the service can load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelArtifact {
    Logistic(LogisticModel),
    TreeEnsemble(TreeEnsemble),
}

impl ModelArtifact {
    pub fn kind(&self) -> &'static str {
        match self {
            ModelArtifact::Logistic(_) => "logistic",
            ModelArtifact::TreeEnsemble(_) => "tree_ensemble",
        }
    }

    /// Column names the model was trained on, in order.
    pub fn feature_names(&self) -> &[String] {
        match self {
            ModelArtifact::Logistic(m) => &m.feature_names,
            ModelArtifact::TreeEnsemble(m) => &m.feature_names,
        }
    }

    pub fn validate(&self) -> Result<(), ServiceError> {
        let result = match self {
            ModelArtifact::Logistic(m) => m.validate(),
            ModelArtifact::TreeEnsemble(m) => m.validate(),
        };
        result.map_err(|e| ServiceError::Artifact(format!("invalid {} model: {e}", self.kind())))
    }

    pub fn from_json(json: &str) -> Result<Self, ServiceError> {
        let model: Self = serde_json::from_str(json)
            .map_err(|e| ServiceError::Artifact(format!("cannot parse model artifact: {e}")))?;
        model.validate()?;
        Ok(model)
    }

    pub fn load(path: &Path) -> Result<Self, ServiceError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ServiceError::Artifact(format!("cannot read model {}: {e}", path.display()))
        })?;
        Self::from_json(&content)
    }

    fn check_schema(&self, features: &FeatureVector) -> Result<(), InferenceError> {
        let expected = self.feature_names();
        let got = features.names();
        if expected == got {
            return Ok(());
        }
        let detail = match expected.iter().zip(got).position(|(e, g)| e != g) {
            Some(i) => format!("column {i} is '{}', expected '{}'", got[i], expected[i]),
            None => "column count differs".to_string(),
        };
        Err(InferenceError::SchemaMismatch {
            expected: expected.len(),
            got: got.len(),
            detail,
        })
    }
}

impl Classifier for ModelArtifact {
    fn predict_proba(&self, features: &FeatureVector) -> Result<[f64; 2], InferenceError> {
        self.check_schema(features)?;
        let values = features.values();
        let p1 = match self {
            ModelArtifact::Logistic(m) => m.positive_probability(values),
            ModelArtifact::TreeEnsemble(m) => m.positive_probability(values),
        };
        if !p1.is_finite() {
            return Err(InferenceError::InvalidProbability(p1));
        }
        Ok([1.0 - p1, p1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn logistic() -> ModelArtifact {
        ModelArtifact::Logistic(LogisticModel {
            feature_names: vec!["hour".into(), "visit_number_1".into()],
            weights: vec![0.1, -1.0],
            intercept: -1.0,
        })
    }

    fn row(names: &[&str], values: &[f64]) -> FeatureVector {
        let mut v = FeatureVector::new();
        for (n, x) in names.iter().zip(values) {
            v.push(*n, *x);
        }
        v
    }

    #[test]
    fn test_predict_proba_sums_to_one() {
        let p = logistic()
            .predict_proba(&row(&["hour", "visit_number_1"], &[10.0, 0.0]))
            .unwrap();
        assert!((p[0] + p[1] - 1.0).abs() < 1e-12);
        assert!((p[1] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_column_order_mismatch() {
        let err = logistic()
            .predict_proba(&row(&["visit_number_1", "hour"], &[0.0, 10.0]))
            .unwrap_err();
        match err {
            InferenceError::SchemaMismatch { detail, .. } => {
                assert!(detail.contains("column 0"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_extra_column_mismatch() {
        let err = logistic()
            .predict_proba(&row(&["hour", "visit_number_1", "x"], &[1.0, 0.0, 0.0]))
            .unwrap_err();
        assert_eq!(
            err,
            InferenceError::SchemaMismatch {
                expected: 2,
                got: 3,
                detail: "column count differs".into()
            }
        );
    }

    #[test]
    fn test_parse_tagged_artifact() {
        let json = r#"{"kind": "logistic", "feature_names": ["hour"], "weights": [0.5], "intercept": 0.0}"#;
        let model = ModelArtifact::from_json(json).unwrap();
        assert_eq!(model.kind(), "logistic");
        assert_eq!(model.feature_names(), &["hour"]);
    }

    #[test]
    fn test_parse_tree_ensemble_artifact() {
        let json = r#"{"kind": "tree_ensemble", "feature_names": ["hour"], "base_score": 0.0,
            "trees": [{"nodes": [{"value": 0.0}]}]}"#;
        let model = ModelArtifact::from_json(json).unwrap();
        assert_eq!(model.kind(), "tree_ensemble");
        let p = model.predict_proba(&row(&["hour"], &[3.0])).unwrap();
        assert!((p[1] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_invalid_artifact_rejected() {
        let json = r#"{"kind": "logistic", "feature_names": ["hour", "x"], "weights": [0.5], "intercept": 0.0}"#;
        let err = ModelArtifact::from_json(json).unwrap_err();
        assert!(err.to_string().contains("invalid logistic model"));
    }

    #[test]
    fn test_unknown_kind_rejected() {
        let json = r#"{"kind": "catboost", "feature_names": []}"#;
        assert!(ModelArtifact::from_json(json).is_err());
    }
}
