// src/infra/config.rs — Configuration loading (TOML)

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::infra::errors::ServiceError;
use crate::infra::paths;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub artifacts: ArtifactsConfig,

    #[serde(default)]
    pub prediction: PredictionConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Browser origins allowed by the CORS layer. Empty disables CORS headers.
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 8000,
            cors_origins: Vec::new(),
        }
    }
}

impl ServerConfig {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactsConfig {
    /// Base directory for relative artifact paths.
    pub dir: PathBuf,
    pub model: PathBuf,
    pub encoders: PathBuf,
    /// Decompress `<artifact>.gz` siblings before loading.
    #[serde(default = "default_true")]
    pub unpack_on_start: bool,
}

impl Default for ArtifactsConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("artifacts"),
            model: PathBuf::from("model.json"),
            encoders: PathBuf::from("encoders.json"),
            unpack_on_start: true,
        }
    }
}

impl ArtifactsConfig {
    pub fn model_path(&self) -> PathBuf {
        paths::resolve(&self.dir, &self.model)
    }

    pub fn encoders_path(&self) -> PathBuf {
        paths::resolve(&self.dir, &self.encoders)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionConfig {
    /// Positive class when probability >= threshold.
    pub threshold: f64,
}

impl Default for PredictionConfig {
    fn default() -> Self {
        Self { threshold: 0.5 }
    }
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load config from file, falling back to defaults.
    pub fn load() -> anyhow::Result<Self> {
        let path = paths::config_file_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ServiceError> {
        validate_threshold(self.prediction.threshold)
    }
}

/// Decision thresholds are probabilities.
pub fn validate_threshold(threshold: f64) -> Result<(), ServiceError> {
    if (0.0..=1.0).contains(&threshold) {
        Ok(())
    } else {
        Err(ServiceError::Config(format!(
            "prediction.threshold must be within [0, 1], got {threshold}"
        )))
    }
}
