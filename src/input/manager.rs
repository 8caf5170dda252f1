//! Input manager for handling different file types and pasted text

use crate::error::{Result, ResumeMatcherError};
use crate::input::file_detector::FileType;
use crate::input::text_extractor::{
    DocxExtractor, MarkdownExtractor, PdfExtractor, PlainTextExtractor, TextExtractor,
};
use crate::processing::document::{Document, DocumentRole};
use log::{info, warn};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Where one side of a comparison comes from
#[derive(Debug, Clone, PartialEq)]
pub enum TextSource {
    Pasted(String),
    File(PathBuf),
}

impl TextSource {
    /// Pasted text wins unless it is blank; an absent source yields `None`
    pub fn choose(pasted: Option<String>, file: Option<PathBuf>) -> Option<Self> {
        match (pasted, file) {
            (Some(text), _) if !text.trim().is_empty() => Some(TextSource::Pasted(text)),
            (_, Some(path)) => Some(TextSource::File(path)),
            (Some(text), None) => Some(TextSource::Pasted(text)),
            (None, None) => None,
        }
    }

    /// Short label for reports
    pub fn label(&self) -> String {
        match self {
            TextSource::Pasted(_) => "pasted text".to_string(),
            TextSource::File(path) => path.display().to_string(),
        }
    }
}

pub struct InputManager {
    cache: HashMap<String, String>,
    enable_cache: bool,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

impl InputManager {
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
            enable_cache: true,
        }
    }

    pub fn with_cache(mut self, enable: bool) -> Self {
        self.enable_cache = enable;
        self
    }

    /// Resolve a source to scoring-ready text: whitespace collapsed and trimmed
    pub async fn resolve(&mut self, source: Option<&TextSource>) -> Result<String> {
        let raw = match source {
            Some(TextSource::Pasted(text)) => text.clone(),
            Some(TextSource::File(path)) => self.extract_text(path).await?,
            None => String::new(),
        };
        Ok(collapse_whitespace(&raw))
    }

    /// Resolve both sides of a comparison into documents.
    ///
    /// Fails with `InvalidInput` when either side is empty after resolution,
    /// so callers can stop before loading any model.
    pub async fn resolve_pair(
        &mut self,
        resume: Option<&TextSource>,
        job: Option<&TextSource>,
    ) -> Result<(Document, Document)> {
        let resume_doc = Document::new(
            self.resolve(resume).await?,
            DocumentRole::Resume,
            resume.map(TextSource::label).unwrap_or_default(),
        );
        let job_doc = Document::new(
            self.resolve(job).await?,
            DocumentRole::JobDescription,
            job.map(TextSource::label).unwrap_or_default(),
        );

        let empty: Vec<String> = [&resume_doc, &job_doc]
            .iter()
            .filter(|doc| doc.is_blank())
            .map(|doc| doc.role.to_string())
            .collect();
        if !empty.is_empty() {
            return Err(ResumeMatcherError::InvalidInput(format!(
                "No text for the {}: pass a file or paste the text",
                empty.join(" or the ")
            )));
        }

        Ok((resume_doc, job_doc))
    }

    pub async fn extract_text(&mut self, path: &Path) -> Result<String> {
        let path_str = path.to_string_lossy().to_string();

        if self.enable_cache {
            if let Some(cached_text) = self.cache.get(&path_str) {
                info!("Using cached text for: {}", path.display());
                return Ok(cached_text.clone());
            }
        }

        if !path.exists() {
            return Err(ResumeMatcherError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        let text = match self.detect_file_type(path)? {
            FileType::Pdf => {
                info!("Extracting text from PDF: {}", path.display());
                PdfExtractor.extract(path).await?
            }
            FileType::Docx => {
                info!("Extracting text from DOCX: {}", path.display());
                DocxExtractor.extract(path).await?
            }
            FileType::Text => {
                info!("Reading plain text file: {}", path.display());
                PlainTextExtractor.extract(path).await?
            }
            FileType::Markdown => {
                info!("Processing markdown file: {}", path.display());
                MarkdownExtractor.extract(path).await?
            }
            FileType::Unknown => {
                return Err(ResumeMatcherError::UnsupportedFormat(format!(
                    "Unsupported file type for: {} (expected PDF, DOCX, TXT or MD)",
                    path.display()
                )));
            }
        };

        if text.trim().is_empty() {
            warn!("No extractable text found in: {}", path.display());
        }

        if self.enable_cache {
            self.cache.insert(path_str, text.clone());
        }

        Ok(text)
    }

    fn detect_file_type(&self, path: &Path) -> Result<FileType> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| {
                ResumeMatcherError::UnsupportedFormat(format!("File has no extension: {}", path.display()))
            })?;

        Ok(FileType::from_extension(extension))
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_pasted_text_wins_over_file() {
        let source = TextSource::choose(Some("Rust dev".to_string()), Some(PathBuf::from("cv.pdf")));
        assert_eq!(source, Some(TextSource::Pasted("Rust dev".to_string())));
    }

    #[test]
    fn test_blank_paste_falls_back_to_file() {
        let source = TextSource::choose(Some("   \n".to_string()), Some(PathBuf::from("cv.pdf")));
        assert_eq!(source, Some(TextSource::File(PathBuf::from("cv.pdf"))));
    }

    #[test]
    fn test_no_source() {
        assert_eq!(TextSource::choose(None, None), None);
    }

    #[tokio::test]
    async fn test_resolve_collapses_whitespace() {
        let mut manager = InputManager::new();
        let source = TextSource::Pasted("  Python\n\n developer\t with Git ".to_string());

        let text = manager.resolve(Some(&source)).await.unwrap();
        assert_eq!(text, "Python developer with Git");
    }

    #[tokio::test]
    async fn test_resolve_missing_source_is_empty() {
        let mut manager = InputManager::new();
        assert_eq!(manager.resolve(None).await.unwrap(), "");
    }

    #[tokio::test]
    async fn test_resolve_pair_builds_labelled_documents() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("jd.txt");
        std::fs::write(&path, "Rust\n engineer").unwrap();

        let mut manager = InputManager::new();
        let resume = TextSource::Pasted("Python developer".to_string());
        let job = TextSource::File(path.clone());
        let (resume_doc, job_doc) = manager.resolve_pair(Some(&resume), Some(&job)).await.unwrap();

        assert_eq!(resume_doc.role, DocumentRole::Resume);
        assert_eq!(resume_doc.source, "pasted text");
        assert_eq!(job_doc.role, DocumentRole::JobDescription);
        assert_eq!(job_doc.content, "Rust engineer");
        assert_eq!(job_doc.source, path.display().to_string());
    }

    #[tokio::test]
    async fn test_resolve_pair_rejects_blank_paste() {
        let mut manager = InputManager::new();
        let resume = TextSource::choose(Some(" \n\t ".to_string()), None);
        let job = TextSource::Pasted("Rust engineer".to_string());

        let result = manager.resolve_pair(resume.as_ref(), Some(&job)).await;
        assert!(matches!(result, Err(ResumeMatcherError::InvalidInput(msg)) if msg.contains("resume")));
    }

    #[tokio::test]
    async fn test_resolve_pair_rejects_missing_source() {
        let mut manager = InputManager::new();
        let resume = TextSource::Pasted("Python developer".to_string());

        let result = manager.resolve_pair(Some(&resume), None).await;
        assert!(matches!(result, Err(ResumeMatcherError::InvalidInput(msg)) if msg.contains("job description")));
    }

    #[tokio::test]
    async fn test_resolve_pair_rejects_file_without_text() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("scan.txt");
        std::fs::write(&path, "  \n\n ").unwrap();

        let mut manager = InputManager::new();
        let job = TextSource::Pasted("Rust engineer".to_string());
        let result = manager
            .resolve_pair(Some(&TextSource::File(path)), Some(&job))
            .await;
        assert!(matches!(result, Err(ResumeMatcherError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_file_without_extension_is_unsupported() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("RESUME");
        std::fs::write(&path, "text").unwrap();

        let mut manager = InputManager::new();
        let result = manager.extract_text(&path).await;
        assert!(matches!(result, Err(ResumeMatcherError::UnsupportedFormat(_))));
    }

    #[tokio::test]
    async fn test_cache_can_be_disabled() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("jd.txt");
        std::fs::write(&path, "Rust engineer").unwrap();

        let mut manager = InputManager::new().with_cache(false);
        manager.extract_text(&path).await.unwrap();
        assert_eq!(manager.cache_size(), 0);
    }
}
