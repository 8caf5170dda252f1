//! Keyword coverage of the job description by the resume

use crate::processing::round_one_decimal;
use crate::processing::text_processor::TextProcessor;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coverage {
    /// Share of JD keywords present in the resume, 0-100
    pub pct: f32,
    /// Sorted, capped
    pub matched: Vec<String>,
    /// Sorted, capped
    pub missing: Vec<String>,
}

pub struct CoverageAnalyzer {
    processor: TextProcessor,
    list_cap: usize,
}

impl Default for CoverageAnalyzer {
    fn default() -> Self {
        Self::new(150)
    }
}

impl CoverageAnalyzer {
    pub fn new(list_cap: usize) -> Self {
        Self {
            processor: TextProcessor::new(),
            list_cap,
        }
    }

    pub fn coverage(&self, resume_text: &str, jd_text: &str) -> Coverage {
        let resume_keywords = self.processor.keyword_set(resume_text);
        let jd_keywords = self.processor.keyword_set(jd_text);

        // BTreeSet iteration is already sorted
        let (matched, missing): (Vec<String>, Vec<String>) = jd_keywords
            .iter()
            .cloned()
            .partition(|keyword| resume_keywords.contains(keyword));

        let pct = if jd_keywords.is_empty() {
            0.0
        } else {
            round_one_decimal(100.0 * matched.len() as f64 / jd_keywords.len() as f64)
        };

        Coverage {
            pct,
            matched: matched.into_iter().take(self.list_cap).collect(),
            missing: missing.into_iter().take(self.list_cap).collect(),
        }
    }
}
