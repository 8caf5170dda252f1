//! Configuration management for the resume matcher

use crate::error::{Result, ResumeMatcherError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub models: ModelConfig,
    pub scoring: ScoringConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    pub models_dir: PathBuf,
    /// Model id from the catalogue, a HuggingFace repo id (`owner/name`), or a local folder
    pub embedding_model: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Display limit for matched and missing keyword lists
    pub keyword_list_cap: usize,
    /// Lexical similarity (0-100) below which the phrasing tip fires
    pub lexical_tip_threshold: f32,
    /// How many missing keywords the bullet tip names
    pub missing_tip_limit: usize,
    /// How many ranked JD terms the report lists
    pub top_keyword_limit: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub color_output: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
    Html,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            keyword_list_cap: 150,
            lexical_tip_threshold: 75.0,
            missing_tip_limit: 8,
            top_keyword_limit: 30,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let models_dir = dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".resume-matcher")
            .join("models");

        Self {
            models: ModelConfig {
                models_dir,
                embedding_model: "potion-base-8M".to_string(),
            },
            scoring: ScoringConfig::default(),
            output: OutputConfig {
                format: OutputFormat::Console,
                detailed: false,
                color_output: true,
            },
        }
    }
}

impl Config {
    /// Load from `config_path`, writing defaults there on first run
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = toml::from_str(&content)
                .map_err(|e| ResumeMatcherError::Configuration(format!("Failed to parse config: {}", e)))?;
            config.validate()?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save_to(config_path)?;
            Ok(config)
        }
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| ResumeMatcherError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("resume-matcher")
            .join("config.toml")
    }

    pub fn models_dir(&self) -> &PathBuf {
        &self.models.models_dir
    }

    fn validate(&self) -> Result<()> {
        if self.scoring.keyword_list_cap == 0 {
            return Err(ResumeMatcherError::Configuration(
                "scoring.keyword_list_cap must be at least 1".to_string(),
            ));
        }
        if !(0.0..=100.0).contains(&self.scoring.lexical_tip_threshold) {
            return Err(ResumeMatcherError::Configuration(format!(
                "scoring.lexical_tip_threshold must be within 0-100, got {}",
                self.scoring.lexical_tip_threshold
            )));
        }
        if self.models.embedding_model.trim().is_empty() {
            return Err(ResumeMatcherError::Configuration(
                "models.embedding_model must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
