// src/core/mod.rs — Scoring core

pub mod context;
pub mod predictor;

pub use context::AppContext;
pub use predictor::{PredictionResult, PredictionService};
