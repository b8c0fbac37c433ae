// src/model/logistic.rs — Logistic regression over named features

use serde::{Deserialize, Serialize};

use super::math::{dot, sigmoid};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticModel {
    /// Training schema, one name per weight.
    pub feature_names: Vec<String>,
    pub weights: Vec<f64>,
    pub intercept: f64,
}

impl LogisticModel {
    /// Positive-class probability for a row already aligned with `feature_names`.
    pub fn positive_probability(&self, values: &[f64]) -> f64 {
        sigmoid(dot(&self.weights, values) + self.intercept)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.weights.len() != self.feature_names.len() {
            return Err(format!(
                "logistic model has {} weights for {} features",
                self.weights.len(),
                self.feature_names.len()
            ));
        }
        if let Some((i, w)) = self.weights.iter().enumerate().find(|(_, w)| !w.is_finite()) {
            return Err(format!("non-finite weight at index {i}: {w}"));
        }
        if !self.intercept.is_finite() {
            return Err(format!("non-finite intercept: {}", self.intercept));
        }
        Ok(())
    }
}
