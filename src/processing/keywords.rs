//! Highest-weighted job description terms

use crate::processing::lexical::TfIdfVectorizer;
use crate::processing::text_processor::TextProcessor;
use log::debug;

/// English function words skipped when ranking JD terms
pub const ENGLISH_STOP_WORDS: &[&str] = &[
    "a", "about", "above", "across", "after", "afterwards", "again", "against", "all", "almost",
    "alone", "along", "already", "also", "although", "always", "am", "among", "amongst", "an",
    "and", "another", "any", "anyhow", "anyone", "anything", "anyway", "anywhere", "are",
    "around", "as", "at", "back", "be", "became", "because", "become", "becomes", "becoming",
    "been", "before", "beforehand", "behind", "being", "below", "beside", "besides", "between",
    "beyond", "both", "but", "by", "can", "cannot", "could", "do", "done", "down", "due",
    "during", "each", "eg", "either", "else", "elsewhere", "enough", "etc", "even", "ever",
    "every", "everyone", "everything", "everywhere", "except", "few", "for", "former",
    "formerly", "from", "further", "get", "give", "go", "had", "has", "have", "he", "hence",
    "her", "here", "hereafter", "hereby", "herein", "hers", "herself", "him", "himself", "his",
    "how", "however", "ie", "if", "in", "inc", "indeed", "into", "is", "it", "its", "itself",
    "just", "keep", "last", "latter", "least", "less", "ltd", "made", "many", "may", "me",
    "meanwhile", "might", "mine", "more", "moreover", "most", "mostly", "much", "must", "my",
    "myself", "namely", "neither", "never", "nevertheless", "next", "no", "nobody", "none",
    "noone", "nor", "not", "nothing", "now", "nowhere", "of", "off", "often", "on", "once",
    "one", "only", "onto", "or", "other", "others", "otherwise", "our", "ours", "ourselves",
    "out", "over", "own", "part", "per", "perhaps", "please", "put", "rather", "re", "same",
    "see", "seem", "seemed", "seeming", "seems", "several", "she", "should", "since", "so",
    "some", "somehow", "someone", "something", "sometime", "sometimes", "somewhere", "still",
    "such", "than", "that", "the", "their", "them", "themselves", "then", "thence", "there",
    "thereafter", "thereby", "therefore", "therein", "thereupon", "these", "they", "this",
    "those", "though", "through", "throughout", "thru", "thus", "to", "together", "too",
    "toward", "towards", "under", "until", "up", "upon", "us", "very", "via", "was", "we",
    "well", "were", "what", "whatever", "when", "whence", "whenever", "where", "whereafter",
    "whereas", "whereby", "wherein", "whereupon", "wherever", "whether", "which", "while",
    "who", "whoever", "whole", "whom", "whose", "why", "will", "with", "within", "without",
    "would", "yet", "you", "your", "yours", "yourself", "yourselves",
];

/// Ranks the terms of a single job description by TF-IDF weight.
///
/// The vectorizer is fitted on the JD alone, so every term has the same IDF
/// and the order follows term frequency. Ties are broken alphabetically.
pub struct KeywordRanker {
    processor: TextProcessor,
    vectorizer: TfIdfVectorizer,
    limit: usize,
}

impl Default for KeywordRanker {
    fn default() -> Self {
        Self::new(30)
    }
}

impl KeywordRanker {
    pub fn new(limit: usize) -> Self {
        Self {
            processor: TextProcessor::new(),
            vectorizer: TfIdfVectorizer::new((1, 2)).with_stop_words(ENGLISH_STOP_WORDS),
            limit,
        }
    }

    /// Up to `limit` unigrams and bigrams, heaviest first
    pub fn top_jd_keywords(&self, jd_text: &str) -> Vec<String> {
        let jd = self.processor.normalize(jd_text);
        if jd.is_empty() || self.limit == 0 {
            return Vec::new();
        }

        let vectors = self.vectorizer.fit_transform(&[jd.as_str()]);
        let mut weighted: Vec<(String, f64)> = vectors
            .into_iter()
            .next()
            .unwrap_or_default()
            .into_iter()
            .collect();
        weighted.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

        debug!("Ranked {} JD terms, keeping {}", weighted.len(), self.limit);

        weighted
            .into_iter()
            .take(self.limit)
            .map(|(term, _)| term)
            .collect()
    }
}
