// src/features/transform.rs — Session record → model feature row
//
// Stage order matters and mirrors how the training data was prepared:
//   1. impute absent categoricals with "(not set)"
//   2. derive the visit hour from date + time
//   3. bucket visit_number into three indicators
//   4. collapse cities outside the allow-list into "others"
//   5. apply the fitted encoders in registry order

use chrono::{NaiveDateTime, Timelike};
use thiserror::Error;

use super::cities::normalize_city;
use super::session::{CategoricalField, SessionRecord, NOT_SET};
use super::vector::FeatureVector;
use crate::encoders::EncoderRegistry;

pub const HOUR: &str = "hour";
pub const VISIT_NUMBER_1: &str = "visit_number_1";
pub const VISIT_NUMBER_2_10: &str = "visit_number_2_10";
pub const VISIT_NUMBER_11: &str = "visit_number_11";

/// Numeric columns that precede the encoded ones, in order.
pub const DERIVED_FEATURES: [&str; 4] = [HOUR, VISIT_NUMBER_1, VISIT_NUMBER_2_10, VISIT_NUMBER_11];

const TIMESTAMP_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%d %H:%M"];

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransformError {
    #[error("visit_number must be at least 1, got {0}")]
    VisitNumberOutOfRange(i64),

    #[error("Cannot parse visit timestamp '{raw}'")]
    InvalidTimestamp { raw: String },

    #[error("No encoder registered for column '{column}'")]
    MissingEncoder { column: &'static str },

    #[error("Unknown category '{value}' for column '{column}'")]
    UnknownCategory { column: &'static str, value: String },
}

impl TransformError {
    /// True when the caller's input, not the artifacts, caused the failure.
    pub fn is_input_fault(&self) -> bool {
        !matches!(self, TransformError::MissingEncoder { .. })
    }
}

/// Which of the three visit-count buckets a session falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisitBucket {
    First,
    Returning,
    Frequent,
}

impl VisitBucket {
    pub fn from_visit_number(visit_number: i64) -> Result<Self, TransformError> {
        match visit_number {
            1 => Ok(VisitBucket::First),
            2..=10 => Ok(VisitBucket::Returning),
            n if n > 10 => Ok(VisitBucket::Frequent),
            n => Err(TransformError::VisitNumberOutOfRange(n)),
        }
    }

    /// Indicator values for `visit_number_1`, `visit_number_2_10`, `visit_number_11`.
    pub fn indicators(self) -> [f64; 3] {
        match self {
            VisitBucket::First => [1.0, 0.0, 0.0],
            VisitBucket::Returning => [0.0, 1.0, 0.0],
            VisitBucket::Frequent => [0.0, 0.0, 1.0],
        }
    }
}

/// Categorical values after imputation, indexed by field.
#[derive(Debug, Clone, PartialEq)]
pub struct Categoricals([String; 6]);

impl Categoricals {
    pub fn impute(record: &SessionRecord) -> Self {
        Self(CategoricalField::ALL.map(|f| record.categorical(f).unwrap_or(NOT_SET).to_string()))
    }

    pub fn get(&self, field: CategoricalField) -> &str {
        &self.0[field as usize]
    }

    fn set(&mut self, field: CategoricalField, value: &str) {
        self.0[field as usize] = value.to_string();
    }
}

/// Hour of day of the visit, from separate date and time strings.
pub fn visit_hour(visit_date: &str, visit_time: &str) -> Result<u32, TransformError> {
    let raw = format!("{} {}", visit_date.trim(), visit_time.trim());
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(&raw, fmt).ok())
        .map(|ts| ts.hour())
        .ok_or(TransformError::InvalidTimestamp { raw })
}

/// Builds feature rows against a fixed encoder registry.
#[derive(Debug, Clone, Copy)]
pub struct FeatureTransformer<'a> {
    encoders: &'a EncoderRegistry,
}

impl<'a> FeatureTransformer<'a> {
    pub fn new(encoders: &'a EncoderRegistry) -> Self {
        Self { encoders }
    }

    /// Column names every row produced by this transformer carries, in order.
    pub fn output_schema(&self) -> Vec<String> {
        DERIVED_FEATURES
            .iter()
            .map(|s| s.to_string())
            .chain(self.encoders.output_feature_names())
            .collect()
    }

    pub fn transform(&self, record: &SessionRecord) -> Result<FeatureVector, TransformError> {
        if let Some(field) = self.encoders.unencoded_fields().first() {
            return Err(TransformError::MissingEncoder {
                column: field.as_str(),
            });
        }

        let mut categoricals = Categoricals::impute(record);
        let hour = visit_hour(&record.visit_date, &record.visit_time)?;
        let bucket = VisitBucket::from_visit_number(record.visit_number)?;

        let city = normalize_city(categoricals.get(CategoricalField::GeoCity)).to_string();
        categoricals.set(CategoricalField::GeoCity, &city);

        let mut features = FeatureVector::with_capacity(DERIVED_FEATURES.len() + 64);
        features.push(HOUR, f64::from(hour));
        let [first, returning, frequent] = bucket.indicators();
        features.push(VISIT_NUMBER_1, first);
        features.push(VISIT_NUMBER_2_10, returning);
        features.push(VISIT_NUMBER_11, frequent);

        for encoder in self.encoders.iter() {
            let encoded = encoder.encode(categoricals.get(encoder.column()))?;
            for (name, value) in encoder.output_feature_names().into_iter().zip(encoded) {
                features.push(name, value);
            }
        }

        Ok(features)
    }
}
