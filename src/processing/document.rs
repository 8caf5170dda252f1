//! Documents taking part in one comparison

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentRole {
    JobDescription,
    Resume,
}

impl fmt::Display for DocumentRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentRole::JobDescription => write!(f, "job description"),
            DocumentRole::Resume => write!(f, "resume"),
        }
    }
}

/// Raw text plus its role; lives for a single evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub content: String,
    pub role: DocumentRole,
    /// File path or "pasted text"
    pub source: String,
}

impl Document {
    pub fn new(content: String, role: DocumentRole, source: String) -> Self {
        Self { content, role, source }
    }

    pub fn resume(content: impl Into<String>) -> Self {
        Self::new(content.into(), DocumentRole::Resume, "pasted text".to_string())
    }

    pub fn job_description(content: impl Into<String>) -> Self {
        Self::new(content.into(), DocumentRole::JobDescription, "pasted text".to_string())
    }

    pub fn is_blank(&self) -> bool {
        self.content.trim().is_empty()
    }
}
