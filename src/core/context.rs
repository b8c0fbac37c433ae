// src/core/context.rs — Immutable application context
//
// Built once at start-up and shared read-only (behind an Arc) by every
// request. Nothing in here is mutated after construction.

use std::fmt;

use crate::encoders::EncoderRegistry;
use crate::features::transform::DERIVED_FEATURES;
use crate::features::FeatureTransformer;
use crate::infra::artifacts;
use crate::infra::config::{self, Config};
use crate::infra::errors::ServiceError;
use crate::model::{Classifier, ModelArtifact};

pub const DEFAULT_THRESHOLD: f64 = 0.5;

pub struct AppContext {
    encoders: EncoderRegistry,
    classifier: Box<dyn Classifier>,
    threshold: f64,
    /// Training schema, when known from the artifact.
    schema: Vec<String>,
}

impl fmt::Debug for AppContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppContext")
            .field("encoders", &self.encoders.len())
            .field("threshold", &self.threshold)
            .field("schema", &self.schema.len())
            .finish()
    }
}

impl AppContext {
    /// Context around an arbitrary classifier. The schema check happens at
    /// scoring time only.
    pub fn new(
        encoders: EncoderRegistry,
        classifier: Box<dyn Classifier>,
        threshold: f64,
    ) -> Result<Self, ServiceError> {
        config::validate_threshold(threshold)?;
        let unencoded = encoders.unencoded_fields();
        if !unencoded.is_empty() {
            let names: Vec<&str> = unencoded.iter().map(|f| f.as_str()).collect();
            return Err(ServiceError::Artifact(format!(
                "no encoder for categorical column(s): {}",
                names.join(", ")
            )));
        }
        let schema = FeatureTransformer::new(&encoders).output_schema();
        Ok(Self {
            encoders,
            classifier,
            threshold,
            schema,
        })
    }

    /// Context around a model artifact. Refuses to build when the model is
    /// malformed or the transformer's output columns differ from its
    /// training schema.
    pub fn from_artifacts(
        encoders: EncoderRegistry,
        model: ModelArtifact,
        threshold: f64,
    ) -> Result<Self, ServiceError> {
        model.validate()?;
        let expected = model.feature_names().to_vec();
        let ctx = Self::new(encoders, Box::new(model), threshold)?;
        if ctx.schema != expected {
            let missing: Vec<&String> = expected.iter().filter(|n| !ctx.schema.contains(n)).collect();
            let extra: Vec<&String> = ctx.schema.iter().filter(|n| !expected.contains(n)).collect();
            return Err(ServiceError::Artifact(format!(
                "encoders produce {} columns, model expects {} (missing: {:?}, unexpected: {:?})",
                ctx.schema.len(),
                expected.len(),
                missing,
                extra
            )));
        }
        Ok(ctx)
    }

    /// Unpack (if configured) and load both artifacts named in `config`.
    pub fn load(config: &Config) -> Result<Self, ServiceError> {
        config.validate()?;
        let encoders_path = config.artifacts.encoders_path();
        let model_path = config.artifacts.model_path();

        if config.artifacts.unpack_on_start {
            artifacts::ensure_unpacked(&encoders_path);
            artifacts::ensure_unpacked(&model_path);
        }

        let encoders = EncoderRegistry::load(&encoders_path)?;
        tracing::info!(
            "Loaded {} encoders from {}",
            encoders.len(),
            encoders_path.display()
        );

        let model = ModelArtifact::load(&model_path)?;
        tracing::info!(
            "Loaded {} model with {} features from {}",
            model.kind(),
            model.feature_names().len(),
            model_path.display()
        );

        Self::from_artifacts(encoders, model, config.prediction.threshold)
    }

    pub fn encoders(&self) -> &EncoderRegistry {
        &self.encoders
    }

    pub fn classifier(&self) -> &dyn Classifier {
        self.classifier.as_ref()
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn transformer(&self) -> FeatureTransformer<'_> {
        FeatureTransformer::new(&self.encoders)
    }

    /// Ordered feature columns fed to the classifier.
    pub fn schema(&self) -> &[String] {
        &self.schema
    }

    /// Number of columns derived from non-categorical fields.
    pub fn derived_feature_count(&self) -> usize {
        DERIVED_FEATURES.len()
    }
}
