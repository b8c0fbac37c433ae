// src/features/mod.rs — Feature pipeline

pub mod cities;
pub mod session;
pub mod transform;
pub mod vector;

pub use session::{CategoricalField, SessionRecord, NOT_SET};
pub use transform::{FeatureTransformer, TransformError};
pub use vector::FeatureVector;
