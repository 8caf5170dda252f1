//! Evaluation engine combining lexical, semantic and keyword coverage scoring

use crate::config::ScoringConfig;
use crate::error::{Result, ResumeMatcherError};
use crate::processing::coverage::CoverageAnalyzer;
use crate::processing::document::{Document, DocumentRole};
use crate::processing::embeddings::SemanticScorer;
use crate::processing::keywords::KeywordRanker;
use crate::processing::lexical::LexicalScorer;
use crate::processing::recommendations::RecommendationEngine;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Scores for one resume against one job description; all percentages 0-100
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchReport {
    pub lexical_similarity: f32,
    pub semantic_similarity: f32,
    pub keyword_coverage: f32,
    pub matched_keywords: Vec<String>,
    pub missing_keywords: Vec<String>,
    /// Heaviest JD unigrams and bigrams, stop words removed
    pub top_jd_keywords: Vec<String>,
}

/// Runs the three independent scorers over the same pair of texts
pub struct MatchEngine {
    lexical: LexicalScorer,
    semantic: SemanticScorer,
    coverage: CoverageAnalyzer,
    ranker: KeywordRanker,
    recommendations: RecommendationEngine,
}

impl MatchEngine {
    pub fn new(config: &ScoringConfig, semantic: SemanticScorer) -> Self {
        Self {
            lexical: LexicalScorer::new(),
            semantic,
            coverage: CoverageAnalyzer::new(config.keyword_list_cap),
            ranker: KeywordRanker::new(config.top_keyword_limit),
            recommendations: RecommendationEngine::from_config(config),
        }
    }

    pub fn embedding_model(&self) -> &str {
        self.semantic.model_name()
    }

    pub fn evaluate(&self, resume_text: &str, jd_text: &str) -> Result<MatchReport> {
        let start_time = Instant::now();

        let lexical_similarity = self.lexical.lexical_similarity(resume_text, jd_text);
        let semantic_similarity = self.semantic.semantic_similarity(resume_text, jd_text)?;
        let coverage = self.coverage.coverage(resume_text, jd_text);
        let top_jd_keywords = self.ranker.top_jd_keywords(jd_text);

        debug!(
            "lexical={:.1} semantic={:.1} coverage={:.1} matched={} missing={}",
            lexical_similarity,
            semantic_similarity,
            coverage.pct,
            coverage.matched.len(),
            coverage.missing.len()
        );
        info!("Evaluation completed in {:.2?}", start_time.elapsed());

        Ok(MatchReport {
            lexical_similarity,
            semantic_similarity,
            keyword_coverage: coverage.pct,
            matched_keywords: coverage.matched,
            missing_keywords: coverage.missing,
            top_jd_keywords,
        })
    }

    /// Same as `evaluate`, checking that each document plays its expected role
    pub fn evaluate_documents(&self, resume: &Document, job: &Document) -> Result<MatchReport> {
        if resume.role != DocumentRole::Resume || job.role != DocumentRole::JobDescription {
            return Err(ResumeMatcherError::InvalidInput(format!(
                "Expected a resume and a job description, got {} and {}",
                resume.role, job.role
            )));
        }
        self.evaluate(&resume.content, &job.content)
    }

    pub fn recommend(&self, report: &MatchReport, resume_text: &str) -> Vec<String> {
        self.recommendations.recommend(report, resume_text)
    }
}
