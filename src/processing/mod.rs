//! Scoring pipeline: normalize, vectorize, compare, diff keywords, recommend

pub mod document;
pub mod text_processor;
pub mod lexical;
pub mod embeddings;
pub mod embedding_manager;
pub mod coverage;
pub mod keywords;
pub mod recommendations;
pub mod analyzer;

/// Percentages are reported with one decimal
pub(crate) fn round_one_decimal(value: f64) -> f32 {
    ((value * 10.0).round() / 10.0) as f32
}
