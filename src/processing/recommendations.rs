//! Rule-based improvement tips

use crate::config::ScoringConfig;
use crate::processing::analyzer::MatchReport;

pub const PHRASING_TIP: &str = "Tailor your summary to mirror high-signal JD skills/phrases.";
pub const PROJECTS_TIP: &str = "Include 2–3 quantified ML projects (data size, accuracy, deployment).";
pub const REPOSITORY_TIP: &str = "Link a GitHub repo with relevant work.";
pub const FALLBACK_TIP: &str = "Looks strong — consider adding metrics (latency, ROI, accuracy deltas).";

/// Applies the tip rules in a fixed order; each rule adds at most one tip
pub struct RecommendationEngine {
    lexical_threshold: f32,
    missing_limit: usize,
}

impl Default for RecommendationEngine {
    fn default() -> Self {
        Self::from_config(&ScoringConfig::default())
    }
}

impl RecommendationEngine {
    pub fn from_config(config: &ScoringConfig) -> Self {
        Self {
            lexical_threshold: config.lexical_tip_threshold,
            missing_limit: config.missing_tip_limit,
        }
    }

    pub fn recommend(&self, report: &MatchReport, resume_raw_text: &str) -> Vec<String> {
        let mut tips = Vec::new();
        let resume = resume_raw_text.to_lowercase();

        if report.lexical_similarity < self.lexical_threshold {
            tips.push(PHRASING_TIP.to_string());
        }

        if !report.missing_keywords.is_empty() {
            let named: Vec<&str> = report
                .missing_keywords
                .iter()
                .take(self.missing_limit)
                .map(String::as_str)
                .collect();
            tips.push(format!("Add concrete bullets featuring: {}.", named.join(", ")));
        }

        if !resume.contains("project") {
            tips.push(PROJECTS_TIP.to_string());
        }

        if !resume.contains("git") {
            tips.push(REPOSITORY_TIP.to_string());
        }

        if tips.is_empty() {
            tips.push(FALLBACK_TIP.to_string());
        }

        tips
    }
}
