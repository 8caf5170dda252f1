//! Embedding model management for downloading and locating Model2Vec models

use crate::error::{Result, ResumeMatcherError};
use hf_hub::api::tokio::Api;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Files model2vec-rs needs in a local model folder
const REQUIRED_FILES: [&str; 3] = ["tokenizer.json", "model.safetensors", "config.json"];

/// Information about an available embedding model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingModelInfo {
    pub name: String,
    pub repo_id: String,
    pub size_mb: u64,
    pub description: String,
    pub dimensions: u32,
}

/// Manager for embedding models - handles download, lookup, and removal
pub struct EmbeddingModelManager {
    models_dir: PathBuf,
    available_models: BTreeMap<String, EmbeddingModelInfo>,
    downloaded_models: HashSet<String>,
}

impl EmbeddingModelManager {
    pub async fn new(models_dir: PathBuf) -> Result<Self> {
        if !models_dir.exists() {
            fs::create_dir_all(&models_dir).await.map_err(|e| {
                ResumeMatcherError::Configuration(format!("Failed to create models directory: {}", e))
            })?;
        }

        let mut manager = Self {
            models_dir,
            available_models: Self::catalogue(),
            downloaded_models: HashSet::new(),
        };

        manager.scan_downloaded_models().await?;

        Ok(manager)
    }

    fn catalogue() -> BTreeMap<String, EmbeddingModelInfo> {
        let mut models = BTreeMap::new();

        models.insert(
            "potion-base-8M".to_string(),
            EmbeddingModelInfo {
                name: "Potion Base 8M".to_string(),
                repo_id: "minishlab/potion-base-8M".to_string(),
                size_mb: 30,
                description: "Small, fast general-purpose sentence embeddings (default)".to_string(),
                dimensions: 256,
            },
        );

        models.insert(
            "potion-base-32M".to_string(),
            EmbeddingModelInfo {
                name: "Potion Base 32M".to_string(),
                repo_id: "minishlab/potion-base-32M".to_string(),
                size_mb: 130,
                description: "Larger vocabulary, higher quality sentence embeddings".to_string(),
                dimensions: 512,
            },
        );

        models.insert(
            "m2v-base".to_string(),
            EmbeddingModelInfo {
                name: "Model2Vec Base".to_string(),
                repo_id: "minishlab/M2V_base_output".to_string(),
                size_mb: 90,
                description: "Legacy Model2Vec base embeddings model".to_string(),
                dimensions: 256,
            },
        );

        models
    }

    async fn scan_downloaded_models(&mut self) -> Result<()> {
        let mut entries = fs::read_dir(&self.models_dir).await?;

        while let Some(entry) = entries.next_entry().await? {
            if entry.file_type().await?.is_dir() && Self::is_valid_model_directory(&entry.path()).await {
                self.downloaded_models
                    .insert(entry.file_name().to_string_lossy().to_string());
            }
        }

        Ok(())
    }

    /// Check if a directory holds every file model2vec-rs loads
    pub async fn is_valid_model_directory(path: &Path) -> bool {
        for file in REQUIRED_FILES {
            if fs::metadata(path.join(file)).await.is_err() {
                return false;
            }
        }
        true
    }

    /// Download a catalogue model from the Hugging Face Hub into the models directory
    pub async fn download_model(&mut self, model_id: &str, force: bool) -> Result<PathBuf> {
        let model_info = self
            .available_models
            .get(model_id)
            .ok_or_else(|| ResumeMatcherError::ModelUnavailable(format!("Unknown embedding model: {}", model_id)))?
            .clone();

        let model_dir = self.models_dir.join(model_id);

        if !force && self.downloaded_models.contains(model_id) {
            return Ok(model_dir);
        }

        info!(
            "Downloading embedding model {} ({} MB) from {}",
            model_info.name, model_info.size_mb, model_info.repo_id
        );

        fs::create_dir_all(&model_dir).await?;

        let api = Api::new()
            .map_err(|e| ResumeMatcherError::Network(format!("Failed to initialize HF API: {}", e)))?;
        let repo = api.model(model_info.repo_id.clone());

        for file in REQUIRED_FILES {
            let cached = repo.get(file).await.map_err(|e| {
                ResumeMatcherError::ModelUnavailable(format!("Failed to download {} for {}: {}", file, model_id, e))
            })?;
            fs::copy(&cached, model_dir.join(file)).await?;
            info!("  downloaded {}", file);
        }

        self.downloaded_models.insert(model_id.to_string());
        Ok(model_dir)
    }

    pub fn get_model_path(&self, model_id: &str) -> Option<PathBuf> {
        if self.downloaded_models.contains(model_id) {
            Some(self.models_dir.join(model_id))
        } else {
            None
        }
    }

    /// Return something `StaticModel::from_pretrained` can load: an existing
    /// local folder, a downloaded catalogue model, a catalogue model fetched
    /// now, or an uncatalogued `owner/name` Hub repo id passed through as is
    pub async fn ensure_model_available(&mut self, model: &str) -> Result<PathBuf> {
        let as_path = Path::new(model);
        if as_path.is_dir() {
            return Ok(as_path.to_path_buf());
        }

        let model_id = match self.resolve_model_id(model) {
            Some(id) => id,
            None if is_hub_repo_id(model) => {
                info!("{} is not in the catalogue, loading it straight from the Hugging Face Hub", model);
                return Ok(PathBuf::from(model));
            }
            None => {
                return Err(ResumeMatcherError::ModelUnavailable(format!(
                    "Unknown embedding model: {} (use a catalogue id, an owner/name repo id, or a local folder)",
                    model
                )))
            }
        };

        if let Some(path) = self.get_model_path(&model_id) {
            return Ok(path);
        }

        warn!("Embedding model {} not downloaded yet, fetching it now", model_id);
        self.download_model(&model_id, false).await
    }

    pub async fn remove_model(&mut self, model_id: &str) -> Result<PathBuf> {
        let model_dir = self.get_model_path(model_id).ok_or_else(|| {
            ResumeMatcherError::InvalidInput(format!("Model '{}' is not downloaded", model_id))
        })?;

        fs::remove_dir_all(&model_dir).await?;
        self.downloaded_models.remove(model_id);
        Ok(model_dir)
    }

    pub fn list_available_models(&self) -> Vec<(&String, &EmbeddingModelInfo)> {
        self.available_models.iter().collect()
    }

    pub fn list_downloaded_models(&self) -> Vec<String> {
        let mut models: Vec<String> = self.downloaded_models.iter().cloned().collect();
        models.sort();
        models
    }

    pub fn get_model_info(&self, model_id: &str) -> Option<&EmbeddingModelInfo> {
        self.available_models.get(model_id)
    }

    pub fn is_model_downloaded(&self, model_id: &str) -> bool {
        self.downloaded_models.contains(model_id)
    }

    /// Resolve model ID from various formats (id, repo_id, display name)
    pub fn resolve_model_id(&self, input: &str) -> Option<String> {
        if self.available_models.contains_key(input) {
            return Some(input.to_string());
        }

        for (id, info) in &self.available_models {
            if info.repo_id == input {
                return Some(id.clone());
            }
        }

        let input_lower = input.to_lowercase();
        for (id, info) in &self.available_models {
            if info.name.to_lowercase() == input_lower {
                return Some(id.clone());
            }
        }

        None
    }
}

/// `owner/name` with no empty parts or whitespace
fn is_hub_repo_id(input: &str) -> bool {
    match input.split_once('/') {
        Some((owner, name)) => {
            !owner.is_empty()
                && !name.is_empty()
                && !name.contains('/')
                && !input.chars().any(char::is_whitespace)
        }
        None => false,
    }
}
