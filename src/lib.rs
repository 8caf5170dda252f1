//! Resume matcher library
//!
//! Compares a resume against a job description: lexical (TF-IDF) similarity,
//! semantic (embedding) similarity, keyword coverage, and rule-based tips.

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod processing;
pub mod output;

pub use config::Config;
pub use error::{Result, ResumeMatcherError};
pub use processing::analyzer::{MatchEngine, MatchReport};
pub use processing::embeddings::{Embedder, SemanticScorer};
