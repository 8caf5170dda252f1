//! Lexical similarity: TF-IDF weighted n-gram vectors compared by cosine

use crate::processing::round_one_decimal;
use crate::processing::text_processor::TextProcessor;
use log::debug;
use regex::Regex;
use std::collections::{HashMap, HashSet};

/// Sparse term -> weight vector
pub type TermVector = HashMap<String, f64>;

/// Bag-of-n-grams vectorizer fitted on the documents it transforms.
///
/// Weights are raw term counts times the smoothed inverse document
/// frequency `ln((1 + n) / (1 + df)) + 1`, and each row is L2-normalized.
pub struct TfIdfVectorizer {
    word_regex: Regex,
    ngram_range: (usize, usize),
    stop_words: HashSet<&'static str>,
}

impl Default for TfIdfVectorizer {
    fn default() -> Self {
        Self::new((1, 2))
    }
}

impl TfIdfVectorizer {
    pub fn new(ngram_range: (usize, usize)) -> Self {
        let word_regex = Regex::new(r"[a-z0-9]{2,}").expect("Invalid word regex");
        let (min_n, max_n) = ngram_range;

        Self {
            word_regex,
            ngram_range: (min_n.max(1), max_n.max(min_n.max(1))),
            stop_words: HashSet::new(),
        }
    }

    /// Drop these words before n-grams are built
    pub fn with_stop_words(mut self, stop_words: &[&'static str]) -> Self {
        self.stop_words = stop_words.iter().copied().collect();
        self
    }

    /// Word tokens followed by the n-grams built from them
    pub fn analyze(&self, text: &str) -> Vec<String> {
        let words: Vec<&str> = self
            .word_regex
            .find_iter(text)
            .map(|m| m.as_str())
            .filter(|word| !self.stop_words.contains(word))
            .collect();
        let (min_n, max_n) = self.ngram_range;
        let mut terms = Vec::new();

        for n in min_n..=max_n {
            if n > words.len() {
                break;
            }
            for window in words.windows(n) {
                terms.push(window.join(" "));
            }
        }

        terms
    }

    /// Fit on `documents` and return one normalized vector per document
    pub fn fit_transform(&self, documents: &[&str]) -> Vec<TermVector> {
        let counts: Vec<HashMap<String, f64>> = documents
            .iter()
            .map(|doc| {
                let mut tf = HashMap::new();
                for term in self.analyze(doc) {
                    *tf.entry(term).or_insert(0.0) += 1.0;
                }
                tf
            })
            .collect();

        let mut doc_freq: HashMap<&str, f64> = HashMap::new();
        for tf in &counts {
            for term in tf.keys() {
                *doc_freq.entry(term.as_str()).or_insert(0.0) += 1.0;
            }
        }

        let n = documents.len() as f64;
        let idf: HashMap<&str, f64> = doc_freq
            .iter()
            .map(|(term, df)| (*term, ((1.0 + n) / (1.0 + df)).ln() + 1.0))
            .collect();

        counts
            .iter()
            .map(|tf| {
                let mut vector: TermVector = tf
                    .iter()
                    .map(|(term, count)| (term.clone(), count * idf[term.as_str()]))
                    .collect();
                l2_normalize(&mut vector);
                vector
            })
            .collect()
    }
}

fn l2_normalize(vector: &mut TermVector) {
    let norm = vector.values().map(|w| w * w).sum::<f64>().sqrt();
    if norm > 0.0 {
        for weight in vector.values_mut() {
            *weight /= norm;
        }
    }
}

/// Cosine similarity of two sparse vectors; 0 when either has no weight
pub fn cosine_similarity(a: &TermVector, b: &TermVector) -> f64 {
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    let dot: f64 = small
        .iter()
        .filter_map(|(term, w)| large.get(term).map(|other| w * other))
        .sum();
    let norm_a = a.values().map(|w| w * w).sum::<f64>().sqrt();
    let norm_b = b.values().map(|w| w * w).sum::<f64>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}

pub struct LexicalScorer {
    processor: TextProcessor,
    vectorizer: TfIdfVectorizer,
}

impl Default for LexicalScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl LexicalScorer {
    pub fn new() -> Self {
        Self {
            processor: TextProcessor::new(),
            vectorizer: TfIdfVectorizer::default(),
        }
    }

    /// Similarity as a 0-100 percentage rounded to one decimal.
    ///
    /// The IDF corpus is exactly this pair of documents.
    pub fn lexical_similarity(&self, resume_text: &str, jd_text: &str) -> f32 {
        let resume = self.processor.normalize(resume_text);
        let jd = self.processor.normalize(jd_text);
        if resume.is_empty() || jd.is_empty() {
            return 0.0;
        }

        let vectors = self.vectorizer.fit_transform(&[jd.as_str(), resume.as_str()]);
        let similarity = cosine_similarity(&vectors[0], &vectors[1]);
        debug!(
            "Lexical similarity {:.4} over {} JD terms and {} resume terms",
            similarity,
            vectors[0].len(),
            vectors[1].len()
        );

        round_one_decimal((similarity * 100.0).clamp(0.0, 100.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyze_builds_unigrams_then_bigrams() {
        let vectorizer = TfIdfVectorizer::default();
        let terms = vectorizer.analyze("senior rust c++ developer");

        assert_eq!(
            terms,
            vec!["senior", "rust", "developer", "senior rust", "rust developer"]
        );
    }

    #[test]
    fn test_analyze_splits_dotted_names() {
        let vectorizer = TfIdfVectorizer::new((1, 1));
        assert_eq!(vectorizer.analyze("node.js ci-cd"), vec!["node", "js", "ci", "cd"]);
    }

    #[test]
    fn test_stop_words_removed_before_bigrams() {
        let vectorizer = TfIdfVectorizer::default().with_stop_words(&["with", "and"]);
        let terms = vectorizer.analyze("rust with tokio and axum");

        assert_eq!(
            terms,
            vec!["rust", "tokio", "axum", "rust tokio", "tokio axum"]
        );
    }

    #[test]
    fn test_shared_terms_get_lower_idf() {
        let vectorizer = TfIdfVectorizer::new((1, 1));
        let vectors = vectorizer.fit_transform(&["rust python", "rust go"]);

        // shared term has idf 1.0, unique terms ln(3/2) + 1
        assert!(vectors[0]["python"] > vectors[0]["rust"]);
        let norm: f64 = vectors[0].values().map(|w| w * w).sum();
        assert!((norm - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_identical_texts_score_100() {
        let scorer = LexicalScorer::new();
        let text = "Machine learning engineer with Python, PyTorch and Kubernetes experience.";

        assert_eq!(scorer.lexical_similarity(text, text), 100.0);
    }

    #[test]
    fn test_known_pair_value() {
        let scorer = LexicalScorer::new();
        // dot = 1 * 1 over squared norm 1 + 2 * (ln 1.5 + 1)^2
        assert_eq!(scorer.lexical_similarity("Rust Go", "Rust Python"), 20.2);
    }

    #[test]
    fn test_disjoint_texts_score_zero() {
        let scorer = LexicalScorer::new();
        assert_eq!(scorer.lexical_similarity("gardening tulips", "kernel drivers"), 0.0);
    }

    #[test]
    fn test_empty_input_scores_zero() {
        let scorer = LexicalScorer::new();
        assert_eq!(scorer.lexical_similarity("", "Python developer"), 0.0);
        assert_eq!(scorer.lexical_similarity("Python developer", "   "), 0.0);
        assert_eq!(scorer.lexical_similarity("", ""), 0.0);
    }

    #[test]
    fn test_text_without_word_terms_scores_zero() {
        let scorer = LexicalScorer::new();
        // normalizes to non-empty text with no 2+ char words
        assert_eq!(scorer.lexical_similarity("a b c", "a b c"), 0.0);
    }

    #[test]
    fn test_partial_overlap_is_bounded_and_symmetric() {
        let scorer = LexicalScorer::new();
        let jd = "Looking for a Python developer with Git experience and 2 ML projects";
        let resume = "I build Python projects and use Git daily";

        let forward = scorer.lexical_similarity(resume, jd);
        let backward = scorer.lexical_similarity(jd, resume);

        assert!(forward > 0.0 && forward < 100.0);
        assert_eq!(forward, backward);
    }

    #[test]
    fn test_case_and_punctuation_do_not_matter() {
        let scorer = LexicalScorer::new();
        assert_eq!(
            scorer.lexical_similarity("PYTHON, Docker!", "python docker"),
            100.0
        );
    }
}
