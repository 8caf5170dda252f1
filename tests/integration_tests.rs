//! Integration tests for the resume matcher

use resume_matcher::config::{OutputFormat, ScoringConfig};
use resume_matcher::input::{InputManager, TextSource};
use resume_matcher::output::{EvaluationReport, ReportGenerator};
use resume_matcher::processing::recommendations::{PHRASING_TIP, PROJECTS_TIP, REPOSITORY_TIP};
use resume_matcher::{Embedder, MatchEngine, ResumeMatcherError, SemanticScorer};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};

/// Bag-of-words embedder so the pipeline runs without a downloaded model
struct WordHashEmbedder;

impl Embedder for WordHashEmbedder {
    fn embed(&self, texts: &[String]) -> resume_matcher::Result<Vec<Vec<f32>>> {
        Ok(texts
            .iter()
            .map(|text| {
                let mut vector = vec![0.0f32; 64];
                for word in text.to_lowercase().split_whitespace() {
                    let mut hasher = DefaultHasher::new();
                    word.hash(&mut hasher);
                    vector[(hasher.finish() % 64) as usize] += 1.0;
                }
                vector
            })
            .collect())
    }

    fn model_name(&self) -> &str {
        "word-hash"
    }
}

fn engine() -> MatchEngine {
    MatchEngine::new(
        &ScoringConfig::default(),
        SemanticScorer::new(Box::new(WordHashEmbedder)),
    )
}

#[tokio::test]
async fn test_text_extraction_from_txt() {
    let mut manager = InputManager::new();
    let text = manager
        .extract_text(Path::new("tests/fixtures/sample_resume.txt"))
        .await
        .unwrap();

    assert!(text.contains("Jane Smith"));
    assert!(text.contains("Machine Learning Engineer"));
    assert!(text.contains("PyTorch"));
}

#[tokio::test]
async fn test_text_extraction_from_markdown() {
    let mut manager = InputManager::new();
    let text = manager
        .extract_text(Path::new("tests/fixtures/sample_resume.md"))
        .await
        .unwrap();

    assert!(text.contains("Jane Smith"));
    assert!(text.contains("Docker"));
    assert!(text.contains("ml-toolkit"));
    assert!(!text.contains("**"));
    assert!(!text.contains("##"));
}

#[tokio::test]
async fn test_caching_functionality() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/sample_resume.txt");

    let first = manager.extract_text(path).await.unwrap();
    assert_eq!(manager.cache_size(), 1);

    let second = manager.extract_text(path).await.unwrap();
    assert_eq!(first, second);
    assert_eq!(manager.cache_size(), 1);

    manager.clear_cache();
    assert_eq!(manager.cache_size(), 0);
}

#[tokio::test]
async fn test_unsupported_file_type() {
    let mut manager = InputManager::new();
    let result = manager
        .extract_text(Path::new("tests/fixtures/unsupported.xyz"))
        .await;

    assert!(matches!(result, Err(ResumeMatcherError::UnsupportedFormat(_))));
}

#[tokio::test]
async fn test_nonexistent_file() {
    let mut manager = InputManager::new();
    let result = manager
        .extract_text(Path::new("tests/fixtures/nonexistent.txt"))
        .await;

    assert!(result.is_err());
}

#[tokio::test]
async fn test_pasted_text_wins_over_file() {
    let mut manager = InputManager::new();
    let source = TextSource::choose(
        Some("  Rust   developer\n\twith Tokio ".to_string()),
        Some(PathBuf::from("tests/fixtures/sample_resume.txt")),
    );

    let text = manager.resolve(source.as_ref()).await.unwrap();
    assert_eq!(text, "Rust developer with Tokio");
    assert_eq!(manager.cache_size(), 0);
}

#[tokio::test]
async fn test_blank_paste_falls_back_to_file() {
    let mut manager = InputManager::new();
    let source = TextSource::choose(
        Some("   ".to_string()),
        Some(PathBuf::from("tests/fixtures/sample_job.txt")),
    );

    let text = manager.resolve(source.as_ref()).await.unwrap();
    assert!(text.starts_with("Senior Machine Learning Engineer"));
    assert!(!text.contains('\n'));
}

#[tokio::test]
async fn test_evaluate_fixture_pair() {
    let mut manager = InputManager::new();
    let (resume_doc, job_doc) = manager
        .resolve_pair(
            Some(&TextSource::File(PathBuf::from("tests/fixtures/sample_resume.txt"))),
            Some(&TextSource::File(PathBuf::from("tests/fixtures/sample_job.txt"))),
        )
        .await
        .unwrap();
    let resume = resume_doc.content.clone();
    assert_eq!(job_doc.source, "tests/fixtures/sample_job.txt");

    let engine = engine();
    let report = engine.evaluate_documents(&resume_doc, &job_doc).unwrap();

    for score in [report.lexical_similarity, report.semantic_similarity, report.keyword_coverage] {
        assert!((0.0..=100.0).contains(&score));
    }
    for keyword in ["python", "pytorch", "docker", "kubernetes", "aws", "sql"] {
        assert!(report.matched_keywords.contains(&keyword.to_string()), "{} should match", keyword);
    }
    for keyword in ["mlflow", "airflow", "gcp"] {
        assert!(report.missing_keywords.contains(&keyword.to_string()), "{} should be missing", keyword);
    }

    assert!(report.top_jd_keywords.len() <= 30);
    assert!(report.top_jd_keywords.contains(&"machine learning".to_string()));
    assert!(!report.top_jd_keywords.contains(&"and".to_string()));

    let mut sorted = report.missing_keywords.clone();
    sorted.sort();
    assert_eq!(sorted, report.missing_keywords);

    let tips = engine.recommend(&report, &resume);
    assert_eq!(tips[0], PHRASING_TIP);
    assert!(tips[1].starts_with("Add concrete bullets featuring: "));
    assert!(!tips.contains(&PROJECTS_TIP.to_string()));
    assert!(!tips.contains(&REPOSITORY_TIP.to_string()));
}

#[tokio::test]
async fn test_empty_side_rejected_before_scoring() {
    let mut manager = InputManager::new();
    let resume = TextSource::choose(Some("   ".to_string()), None);
    let job = TextSource::File(PathBuf::from("tests/fixtures/sample_job.txt"));

    let result = manager.resolve_pair(resume.as_ref(), Some(&job)).await;
    assert!(matches!(result, Err(ResumeMatcherError::InvalidInput(_))));
}

#[tokio::test]
async fn test_json_report_round_trip() {
    let engine = engine();
    let resume = "Python developer shipping projects on GitHub";
    let job = "Python developer with Docker";
    let report = engine.evaluate(resume, job).unwrap();
    let tips = engine.recommend(&report, resume);

    let evaluation = EvaluationReport::new(report.clone(), tips, 3, engine.embedding_model(), "pasted text", "pasted text");
    let json = ReportGenerator::new()
        .generate_report(&evaluation, &OutputFormat::Json)
        .unwrap();

    let parsed: EvaluationReport = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed.match_report, report);
    assert_eq!(parsed.metadata.embedding_model, "word-hash");
}
