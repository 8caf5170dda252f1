//! CLI interface for the resume matcher

use crate::config::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "resume-matcher")]
#[command(about = "Compare a resume with a job description")]
#[command(long_about = "Score a resume against a job description with TF-IDF and embedding similarity, keyword coverage, and improvement tips")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Evaluate a resume against a job description
    Evaluate {
        /// Path to resume file (PDF, DOCX, TXT, MD)
        #[arg(short, long)]
        resume: Option<PathBuf>,

        /// Resume text pasted directly; wins over --resume when not blank
        #[arg(long)]
        resume_text: Option<String>,

        /// Path to job description file (PDF, DOCX, TXT, MD)
        #[arg(short, long)]
        job: Option<PathBuf>,

        /// Job description text pasted directly; wins over --job when not blank
        #[arg(long)]
        job_text: Option<String>,

        /// Embedding model id, HuggingFace repo id, or local model folder
        #[arg(short, long)]
        embedding: Option<String>,

        /// Output format: console, json, markdown, html
        #[arg(short, long)]
        output: Option<String>,

        /// Save output to file
        #[arg(short, long)]
        save: Option<PathBuf>,

        /// Show full keyword lists and report details
        #[arg(short, long)]
        detailed: bool,
    },

    /// Embedding model management
    Models {
        #[command(subcommand)]
        action: ModelAction,
    },

    /// Show or reset configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ModelAction {
    /// List available embedding models
    List,

    /// Download an embedding model
    Download {
        /// Model id, name, or HuggingFace repo ID
        model: String,

        /// Force re-download if model exists
        #[arg(short, long)]
        force: bool,
    },

    /// Remove a downloaded model
    Remove {
        /// Model id to remove
        model: String,
    },

    /// Show model information
    Info {
        /// Model id
        model: String,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,

    /// Print the configuration file location
    Path,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(OutputFormat::Console),
        "json" => Ok(OutputFormat::Json),
        "markdown" | "md" => Ok(OutputFormat::Markdown),
        "html" => Ok(OutputFormat::Html),
        _ => Err(format!(
            "Invalid output format: {}. Supported: console, json, markdown, html",
            format
        )),
    }
}

/// Validate file extension
pub fn validate_file_extension(path: &Path, allowed_extensions: &[&str]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if allowed_extensions.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    allowed_extensions.join(", ")
                ))
            }
        }
        None => Err("File has no extension".to_string()),
    }
}
