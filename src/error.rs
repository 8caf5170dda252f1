//! Error handling for the resume matcher

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResumeMatcherError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF extraction error: {0}")]
    PdfExtraction(String),

    #[error("DOCX extraction error: {0}")]
    DocxExtraction(String),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Embedding model unavailable: {0}")]
    ModelUnavailable(String),

    #[error("Embedding generation error: {0}")]
    Embedding(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Output formatting error: {0}")]
    OutputFormatting(String),
}

pub type Result<T> = std::result::Result<T, ResumeMatcherError>;

/// model2vec-rs reports its failures through anyhow
impl From<anyhow::Error> for ResumeMatcherError {
    fn from(err: anyhow::Error) -> Self {
        ResumeMatcherError::Embedding(err.to_string())
    }
}

impl ResumeMatcherError {
    /// Whether the failure is about the environment rather than the request.
    ///
    /// The CLI uses this to pick between "fix your setup" and "fix your input" messaging.
    pub fn is_service_error(&self) -> bool {
        matches!(
            self,
            ResumeMatcherError::ModelUnavailable(_)
                | ResumeMatcherError::Network(_)
                | ResumeMatcherError::Configuration(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_unavailable_is_service_error() {
        let err = ResumeMatcherError::ModelUnavailable("no weights".to_string());
        assert!(err.is_service_error());
        assert_eq!(err.to_string(), "Embedding model unavailable: no weights");
    }

    #[test]
    fn test_unsupported_format_is_user_error() {
        let err = ResumeMatcherError::UnsupportedFormat("resume.odt".to_string());
        assert!(!err.is_service_error());
    }

    #[test]
    fn test_anyhow_maps_to_embedding() {
        let err: ResumeMatcherError = anyhow::anyhow!("tokenizer missing").into();
        assert!(matches!(err, ResumeMatcherError::Embedding(_)));
    }
}
