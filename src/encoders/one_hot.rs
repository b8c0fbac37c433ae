// src/encoders/one_hot.rs — One-hot encoder fitted at training time

use serde::{Deserialize, Serialize};

use crate::features::session::CategoricalField;
use crate::features::transform::TransformError;

/// Suffix of the extra column used by [`UnknownPolicy::Infrequent`].
pub const INFREQUENT_SUFFIX: &str = "infrequent_sklearn";

/// What to emit for a value that was not seen during fitting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownPolicy {
    /// All-zero row.
    #[default]
    Ignore,
    /// Fail the transformation.
    Error,
    /// Set a dedicated trailing "infrequent" column.
    Infrequent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OneHotEncoder {
    pub column: CategoricalField,
    pub categories: Vec<String>,
    #[serde(default)]
    pub handle_unknown: UnknownPolicy,
}

impl OneHotEncoder {
    pub fn new(column: CategoricalField, categories: Vec<String>) -> Self {
        Self {
            column,
            categories,
            handle_unknown: UnknownPolicy::default(),
        }
    }

    pub fn with_unknown_policy(mut self, policy: UnknownPolicy) -> Self {
        self.handle_unknown = policy;
        self
    }

    /// Output width, including the infrequent column when configured.
    pub fn width(&self) -> usize {
        match self.handle_unknown {
            UnknownPolicy::Infrequent => self.categories.len() + 1,
            _ => self.categories.len(),
        }
    }

    pub fn output_feature_names(&self) -> Vec<String> {
        let column = self.column.as_str();
        let mut names: Vec<String> = self
            .categories
            .iter()
            .map(|c| format!("{column}_{c}"))
            .collect();
        if self.handle_unknown == UnknownPolicy::Infrequent {
            names.push(format!("{column}_{INFREQUENT_SUFFIX}"));
        }
        names
    }

    pub fn encode(&self, value: &str) -> Result<Vec<f64>, TransformError> {
        let mut row = vec![0.0; self.width()];
        match self.categories.iter().position(|c| c == value) {
            Some(i) => row[i] = 1.0,
            None => match self.handle_unknown {
                UnknownPolicy::Ignore => {}
                UnknownPolicy::Infrequent => row[self.categories.len()] = 1.0,
                UnknownPolicy::Error => {
                    return Err(TransformError::UnknownCategory {
                        column: self.column.as_str(),
                        value: value.to_string(),
                    })
                }
            },
        }
        Ok(row)
    }

    pub(crate) fn validate(&self) -> Result<(), String> {
        if self.categories.is_empty() {
            return Err(format!("encoder for '{}' has no categories", self.column));
        }
        for (i, category) in self.categories.iter().enumerate() {
            if self.categories[..i].contains(category) {
                return Err(format!(
                    "encoder for '{}' lists category '{category}' twice",
                    self.column
                ));
            }
        }
        Ok(())
    }
}
