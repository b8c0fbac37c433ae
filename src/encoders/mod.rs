// src/encoders/mod.rs — Categorical encoders fitted at training time
//
// The registry is loaded once from JSON and never mutated afterwards. Entry
// order is the order encoded columns appear in the feature vector.

pub mod one_hot;

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::features::session::CategoricalField;
use crate::features::transform::TransformError;
use crate::infra::errors::ServiceError;

pub use one_hot::{OneHotEncoder, UnknownPolicy};

/// Every encoder kind the service knows how to apply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Encoder {
    OneHot(OneHotEncoder),
}

impl Encoder {
    /// Input column this encoder consumes.
    pub fn column(&self) -> CategoricalField {
        match self {
            Encoder::OneHot(e) => e.column,
        }
    }

    pub fn output_feature_names(&self) -> Vec<String> {
        match self {
            Encoder::OneHot(e) => e.output_feature_names(),
        }
    }

    pub fn encode(&self, value: &str) -> Result<Vec<f64>, TransformError> {
        match self {
            Encoder::OneHot(e) => e.encode(value),
        }
    }

    fn validate(&self) -> Result<(), String> {
        match self {
            Encoder::OneHot(e) => e.validate(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EncoderRegistry {
    encoders: Vec<Encoder>,
}

impl EncoderRegistry {
    pub fn new(encoders: Vec<Encoder>) -> Result<Self, ServiceError> {
        let registry = Self { encoders };
        registry.validate()?;
        Ok(registry)
    }

    pub fn from_json(json: &str) -> Result<Self, ServiceError> {
        let registry: Self = serde_json::from_str(json)
            .map_err(|e| ServiceError::Artifact(format!("invalid encoder registry: {e}")))?;
        registry.validate()?;
        Ok(registry)
    }

    pub fn load(path: &Path) -> Result<Self, ServiceError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ServiceError::Artifact(format!(
                "cannot read encoder registry {}: {e}",
                path.display()
            ))
        })?;
        Self::from_json(&content)
    }

    /// Structural checks: each field encoded at most once, every encoder well formed.
    pub fn validate(&self) -> Result<(), ServiceError> {
        for (i, encoder) in self.encoders.iter().enumerate() {
            encoder.validate().map_err(ServiceError::Artifact)?;
            if self.encoders[..i]
                .iter()
                .any(|e| e.column() == encoder.column())
            {
                return Err(ServiceError::Artifact(format!(
                    "column '{}' is encoded more than once",
                    encoder.column()
                )));
            }
        }
        Ok(())
    }

    pub fn get(&self, field: CategoricalField) -> Option<&Encoder> {
        self.encoders.iter().find(|e| e.column() == field)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Encoder> {
        self.encoders.iter()
    }

    pub fn len(&self) -> usize {
        self.encoders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.encoders.is_empty()
    }

    /// Categorical fields that no encoder consumes.
    pub fn unencoded_fields(&self) -> Vec<CategoricalField> {
        CategoricalField::ALL
            .into_iter()
            .filter(|f| self.get(*f).is_none())
            .collect()
    }

    /// All encoded column names in application order.
    pub fn output_feature_names(&self) -> Vec<String> {
        self.encoders
            .iter()
            .flat_map(Encoder::output_feature_names)
            .collect()
    }
}
