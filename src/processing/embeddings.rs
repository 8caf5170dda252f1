//! Semantic similarity using Model2Vec static sentence embeddings

use crate::error::{Result, ResumeMatcherError};
use crate::processing::round_one_decimal;
use log::{debug, info};
use model2vec_rs::model::StaticModel;
use std::path::Path;
use std::time::Instant;

/// Maps texts to fixed-length dense vectors
pub trait Embedder: Send + Sync {
    fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;

    /// Identifier reported alongside scores
    fn model_name(&self) -> &str;
}

/// Embedder backed by a Model2Vec `StaticModel` with normalized output
pub struct StaticEmbedder {
    model: StaticModel,
    model_name: String,
}

impl StaticEmbedder {
    /// Load from a local model folder or a HuggingFace repo id
    pub fn load(source: impl AsRef<Path>) -> Result<Self> {
        let source = source.as_ref();
        let start_time = Instant::now();

        info!("Loading Model2Vec embedding model from: {}", source.display());

        let model = StaticModel::from_pretrained(
            source,
            None,       // token
            Some(true), // normalize
            None,       // subfolder
        )
        .map_err(|e| {
            ResumeMatcherError::ModelUnavailable(format!("Failed to load '{}': {}", source.display(), e))
        })?;

        info!("Model loaded successfully in {:.2?}", start_time.elapsed());

        Ok(Self {
            model,
            model_name: source.display().to_string(),
        })
    }
}

impl Embedder for StaticEmbedder {
    fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        Ok(self.model.encode(texts))
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }
}

/// Long-lived handle around a loaded embedding model.
///
/// Construct once and pass it to every evaluation; the model is never
/// reloaded per request and is read-only after construction.
pub struct SemanticScorer {
    embedder: Box<dyn Embedder>,
}

impl SemanticScorer {
    pub fn new(embedder: Box<dyn Embedder>) -> Self {
        Self { embedder }
    }

    /// Load a Model2Vec model, failing with `ModelUnavailable` if it cannot be read
    pub fn load(source: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(Box::new(StaticEmbedder::load(source)?)))
    }

    pub fn model_name(&self) -> &str {
        self.embedder.model_name()
    }

    /// Similarity as a 0-100 percentage rounded to one decimal.
    ///
    /// Texts are trimmed but not normalized. Blank input scores 0 without
    /// touching the model.
    pub fn semantic_similarity(&self, resume_text: &str, jd_text: &str) -> Result<f32> {
        let resume = resume_text.trim();
        let jd = jd_text.trim();
        if resume.is_empty() || jd.is_empty() {
            return Ok(0.0);
        }

        let start_time = Instant::now();
        let embeddings = self.embedder.embed(&[jd.to_string(), resume.to_string()])?;
        let [jd_embedding, resume_embedding]: [Vec<f32>; 2] = embeddings.try_into().map_err(|got: Vec<Vec<f32>>| {
            ResumeMatcherError::Embedding(format!("Expected 2 embeddings, model returned {}", got.len()))
        })?;

        let score = cosine_similarity(&jd_embedding, &resume_embedding)?;
        debug!(
            "Semantic similarity {:.4} ({} dims) in {:.2?}",
            score,
            jd_embedding.len(),
            start_time.elapsed()
        );

        Ok(round_one_decimal((f64::from(score) * 100.0).clamp(0.0, 100.0)))
    }
}

/// Dot product of the unit-normalized vectors
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f32> {
    if a.len() != b.len() {
        return Err(ResumeMatcherError::Embedding(format!(
            "Embedding dimensions don't match: {} vs {}",
            a.len(),
            b.len()
        )));
    }

    let a = unit_normalize(a);
    let b = unit_normalize(b);
    Ok(a.iter().zip(b.iter()).map(|(x, y)| x * y).sum())
}

fn unit_normalize(v: &[f32]) -> Vec<f32> {
    let norm = v.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm == 0.0 {
        v.to_vec()
    } else {
        v.iter().map(|x| x / norm).collect()
    }
}
