// src/infra/errors.rs — Error types for the scoring service

use thiserror::Error;

use crate::features::TransformError;
use crate::model::InferenceError;

#[derive(Error, Debug)]
pub enum ServiceError {
    // Caller errors
    #[error("Invalid input: {0}")]
    InputShape(String),

    // Pipeline errors (client or system fault depending on cause)
    #[error("Feature transformation failed: {0}")]
    Transform(#[from] TransformError),

    #[error("Inference failed: {0}")]
    Inference(#[from] InferenceError),

    // Infra
    #[error("Artifact error: {0}")]
    Artifact(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ServiceError {
    /// True when retrying with corrected input could succeed; everything
    /// else is an artifact or service problem.
    pub fn is_client_fault(&self) -> bool {
        match self {
            ServiceError::InputShape(_) => true,
            ServiceError::Transform(e) => e.is_input_fault(),
            _ => false,
        }
    }
}
