// src/api/types.rs

use serde::{Deserialize, Serialize};

use crate::core::PredictionResult;

/// Response body for `POST /predict`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionResponse {
    pub probability: f64,
    pub target_class: u8,
}

impl From<PredictionResult> for PredictionResponse {
    fn from(result: PredictionResult) -> Self {
        Self {
            probability: result.probability,
            target_class: result.target_class,
        }
    }
}

/// Static description served at `GET /`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ServiceInfo {
    pub name: String,
    pub description: String,
    pub version: String,
}

/// Error response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
