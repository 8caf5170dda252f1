//! Evaluation report handed to the formatters

use crate::processing::analyzer::MatchReport;
use serde::{Deserialize, Serialize};
use std::time::SystemTime;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationReport {
    pub match_report: MatchReport,
    /// Ordered tips, as produced by the recommendation rules
    pub recommendations: Vec<String>,
    pub metadata: ReportMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub generated_at: SystemTime,
    pub processing_time_ms: u64,
    pub embedding_model: String,
    pub resume_source: String,
    pub job_source: String,
    pub tool_version: String,
}

/// Verdict band derived from the lexical similarity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchStrength {
    Strong,
    Moderate,
    Weak,
}

impl MatchStrength {
    pub fn from_score(score: f32) -> Self {
        match score {
            s if s >= 75.0 => MatchStrength::Strong,
            s if s >= 40.0 => MatchStrength::Moderate,
            _ => MatchStrength::Weak,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MatchStrength::Strong => "STRONG MATCH",
            MatchStrength::Moderate => "PARTIAL MATCH",
            MatchStrength::Weak => "WEAK MATCH",
        }
    }
}

impl EvaluationReport {
    pub fn new(
        match_report: MatchReport,
        recommendations: Vec<String>,
        processing_time_ms: u64,
        embedding_model: &str,
        resume_source: &str,
        job_source: &str,
    ) -> Self {
        Self {
            match_report,
            recommendations,
            metadata: ReportMetadata {
                generated_at: SystemTime::now(),
                processing_time_ms,
                embedding_model: embedding_model.to_string(),
                resume_source: resume_source.to_string(),
                job_source: job_source.to_string(),
                tool_version: env!("CARGO_PKG_VERSION").to_string(),
            },
        }
    }

    pub fn strength(&self) -> MatchStrength {
        MatchStrength::from_score(self.match_report.lexical_similarity)
    }
}
