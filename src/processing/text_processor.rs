//! Text normalization and keyword tokenization

use regex::Regex;
use std::collections::BTreeSet;

/// Lowercases and cleans text, and splits it into keyword tokens.
///
/// Both operations are total: any input string, including empty text or
/// unusual unicode, produces a well-defined (possibly empty) result.
pub struct TextProcessor {
    disallowed_regex: Regex,
    whitespace_regex: Regex,
    token_split_regex: Regex,
}

impl Default for TextProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl TextProcessor {
    pub fn new() -> Self {
        // `#` survives tokenization but not normalization
        let disallowed_regex = Regex::new(r"[^a-z0-9\s\-+./]").expect("Invalid normalization regex");
        let whitespace_regex = Regex::new(r"\s+").expect("Invalid whitespace regex");
        let token_split_regex = Regex::new(r"[^a-z0-9+\-.#]+").expect("Invalid token split regex");

        Self {
            disallowed_regex,
            whitespace_regex,
            token_split_regex,
        }
    }

    /// Lowercase, replace characters outside `[a-z0-9 -+./]` with spaces, collapse whitespace
    pub fn normalize(&self, text: &str) -> String {
        if text.is_empty() {
            return String::new();
        }

        let lowered = text.to_lowercase();
        let cleaned = self.disallowed_regex.replace_all(&lowered, " ");
        self.whitespace_regex.replace_all(&cleaned, " ").trim().to_string()
    }

    /// Split into keyword tokens, keeping occurrence order and duplicates
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        self.token_split_regex
            .split(&lowered)
            .filter(|token| token.chars().count() > 1)
            .map(str::to_string)
            .collect()
    }

    /// Normalize, tokenize and de-duplicate; iteration order is sorted
    pub fn keyword_set(&self, text: &str) -> BTreeSet<String> {
        self.tokenize(&self.normalize(text)).into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_keeps_tech_punctuation() {
        let processor = TextProcessor::new();
        let text = "Senior C++ / Node.js Engineer (CI-CD), 5+ yrs!";

        assert_eq!(
            processor.normalize(text),
            "senior c++ / node.js engineer ci-cd 5+ yrs"
        );
    }

    #[test]
    fn test_normalize_drops_hash_and_unicode() {
        let processor = TextProcessor::new();

        assert_eq!(processor.normalize("C# and F#"), "c and f");
        assert_eq!(processor.normalize("Café — naïve résumé ✓"), "caf na ve r sum");
    }

    #[test]
    fn test_normalize_empty_and_blank() {
        let processor = TextProcessor::new();
        assert_eq!(processor.normalize(""), "");
        assert_eq!(processor.normalize(" \t\n "), "");
        assert_eq!(processor.normalize("!!! ???"), "");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let processor = TextProcessor::new();
        let samples = [
            "",
            "Python, SQL & Spark\n\nML/AI",
            "  --weird++ ..text// ",
            "ÀÉÎ Ünïcödé 日本語 emoji 🚀 tabs\tand\r\nnewlines",
            "a.b.c  d-e-f  g+h",
        ];

        for sample in samples {
            let once = processor.normalize(sample);
            assert_eq!(processor.normalize(&once), once, "not idempotent for {:?}", sample);
        }
    }

    #[test]
    fn test_tokenize_filters_short_tokens() {
        let processor = TextProcessor::new();
        let tokens = processor.tokenize("i build c++ and c# apps in go, r and a.i");

        assert_eq!(
            tokens,
            vec!["build", "c++", "and", "c#", "apps", "in", "go", "and", "a.i"]
        );
    }

    #[test]
    fn test_tokenize_splits_on_slash() {
        let processor = TextProcessor::new();
        assert_eq!(processor.tokenize("ml/ai ci-cd"), vec!["ml", "ai", "ci-cd"]);
    }

    #[test]
    fn test_keyword_set_dedups_and_sorts() {
        let processor = TextProcessor::new();
        let keywords: Vec<String> = processor
            .keyword_set("Rust, rust and RUST; Python")
            .into_iter()
            .collect();

        assert_eq!(keywords, vec!["and", "python", "rust"]);
    }
}
