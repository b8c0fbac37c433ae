// src/core/predictor.rs — Session scoring

use serde::{Deserialize, Serialize};

use crate::core::context::AppContext;
use crate::features::{FeatureVector, SessionRecord};
use crate::infra::errors::ServiceError;
use crate::model::InferenceError;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    /// Probability of the target action, in [0, 1].
    pub probability: f64,
    /// 1 when `probability >= threshold`.
    pub target_class: u8,
}

impl PredictionResult {
    pub fn from_probability(probability: f64, threshold: f64) -> Self {
        Self {
            probability,
            target_class: u8::from(probability >= threshold),
        }
    }
}

/// Single-shot scoring over a shared [`AppContext`]. No retries: the
/// computation is deterministic, so a failure repeats for the same input.
#[derive(Debug, Clone, Copy)]
pub struct PredictionService<'a> {
    ctx: &'a AppContext,
}

impl<'a> PredictionService<'a> {
    pub fn new(ctx: &'a AppContext) -> Self {
        Self { ctx }
    }

    pub fn predict(&self, record: &SessionRecord) -> Result<PredictionResult, ServiceError> {
        self.predict_explained(record).map(|(result, _)| result)
    }

    /// Like [`predict`](Self::predict) but also returns the feature row that was scored.
    pub fn predict_explained(
        &self,
        record: &SessionRecord,
    ) -> Result<(PredictionResult, FeatureVector), ServiceError> {
        record.validate()?;
        let features = self.ctx.transformer().transform(record)?;
        let [_, positive] = self.ctx.classifier().predict_proba(&features)?;
        if !(0.0..=1.0).contains(&positive) {
            return Err(InferenceError::InvalidProbability(positive).into());
        }

        let result = PredictionResult::from_probability(positive, self.ctx.threshold());
        tracing::debug!(
            probability = result.probability,
            target_class = result.target_class,
            "Scored session"
        );
        Ok((result, features))
    }
}
