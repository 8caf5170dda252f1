//! resume-matcher: score a resume against a job description

use clap::Parser;
use log::{error, info};
use resume_matcher::cli::{self, Cli, Commands, ConfigAction, ModelAction};
use resume_matcher::config::Config;
use resume_matcher::error::{Result, ResumeMatcherError};
use resume_matcher::input::file_detector::SUPPORTED_EXTENSIONS;
use resume_matcher::input::{InputManager, TextSource};
use resume_matcher::output::formatter::{save_report_to_file, suggest_filename};
use resume_matcher::output::{EvaluationReport, ReportGenerator};
use resume_matcher::processing::analyzer::MatchEngine;
use resume_matcher::processing::embedding_manager::EmbeddingModelManager;
use resume_matcher::processing::embeddings::SemanticScorer;
use std::path::PathBuf;
use std::process;
use std::time::Instant;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    let config = match Config::load_from(&config_path) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration from {}: {}", config_path.display(), e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config, config_path).await {
        error!("Command failed: {}", e);
        if e.is_service_error() {
            error!("This is an environment problem, not an input problem. Try `resume-matcher models download <id>`.");
        }
        process::exit(1);
    }
}

async fn run_command(command: Commands, config: Config, config_path: PathBuf) -> Result<()> {
    match command {
        Commands::Evaluate {
            resume,
            resume_text,
            job,
            job_text,
            embedding,
            output,
            save,
            detailed,
        } => {
            let output_format = match output {
                Some(format) => cli::parse_output_format(&format).map_err(ResumeMatcherError::InvalidInput)?,
                None => config.output.format,
            };

            let resume_source = TextSource::choose(resume_text, resume);
            let job_source = TextSource::choose(job_text, job);
            for source in [&resume_source, &job_source].into_iter().flatten() {
                if let TextSource::File(path) = source {
                    cli::validate_file_extension(path, &SUPPORTED_EXTENSIONS).map_err(|e| {
                        ResumeMatcherError::UnsupportedFormat(format!("{}: {}", path.display(), e))
                    })?;
                }
            }

            let mut input_manager = InputManager::new();
            let (resume_doc, job_doc) = input_manager
                .resolve_pair(resume_source.as_ref(), job_source.as_ref())
                .await?;
            info!(
                "Resume: {} characters, job description: {} characters",
                resume_doc.content.len(),
                job_doc.content.len()
            );

            // Loaded once and reused for the whole evaluation
            let model = embedding.unwrap_or_else(|| config.models.embedding_model.clone());
            let mut model_manager = EmbeddingModelManager::new(config.models_dir().clone()).await?;
            let model_path = model_manager.ensure_model_available(&model).await?;
            let semantic = SemanticScorer::load(&model_path)?;

            let engine = MatchEngine::new(&config.scoring, semantic);

            let start_time = Instant::now();
            let match_report = engine.evaluate_documents(&resume_doc, &job_doc)?;
            let recommendations = engine.recommend(&match_report, &resume_doc.content);
            let processing_time_ms = start_time.elapsed().as_millis() as u64;

            let report = EvaluationReport::new(
                match_report,
                recommendations,
                processing_time_ms,
                &model,
                &resume_doc.source,
                &job_doc.source,
            );

            let use_colors = config.output.color_output && save.is_none();
            let generator = ReportGenerator::with_options(use_colors, detailed || config.output.detailed);
            let content = generator.generate_report(&report, &output_format)?;

            match save {
                Some(path) => {
                    let path = if path.is_dir() {
                        path.join(suggest_filename(&output_format, &report.metadata.resume_source, true))
                    } else {
                        path
                    };
                    save_report_to_file(&content, &path)?;
                    println!("Report saved to {}", path.display());
                }
                None => println!("{}", content),
            }
        }

        Commands::Models { action } => {
            let mut model_manager = EmbeddingModelManager::new(config.models_dir().clone()).await?;

            match action {
                ModelAction::List => {
                    println!("Embedding models ({}):\n", config.models_dir().display());
                    for (id, info) in model_manager.list_available_models() {
                        let status = if model_manager.is_model_downloaded(id) {
                            "downloaded"
                        } else {
                            "available"
                        };
                        let default_marker = if *id == config.models.embedding_model { " (default)" } else { "" };
                        println!("  • {}{} - {} [{} MB, {} dims, {}]", id, default_marker, info.repo_id, info.size_mb, info.dimensions, status);
                        println!("    {}", info.description);
                    }

                    let downloaded = model_manager.list_downloaded_models();
                    if !downloaded.is_empty() {
                        println!("\nDownloaded: {}", downloaded.join(", "));
                    }
                }

                ModelAction::Download { model, force } => {
                    let model_id = model_manager
                        .resolve_model_id(&model)
                        .ok_or_else(|| ResumeMatcherError::ModelUnavailable(format!("Unknown embedding model: {}", model)))?;

                    if !force && model_manager.is_model_downloaded(&model_id) {
                        println!("Model '{}' is already downloaded (use --force to re-download)", model_id);
                        return Ok(());
                    }

                    let path = model_manager.download_model(&model_id, force).await?;
                    println!("Model '{}' downloaded to {}", model_id, path.display());
                }

                ModelAction::Remove { model } => {
                    let path = model_manager.remove_model(&model).await?;
                    println!("Removed {}", path.display());
                }

                ModelAction::Info { model } => {
                    let model_id = model_manager
                        .resolve_model_id(&model)
                        .ok_or_else(|| ResumeMatcherError::ModelUnavailable(format!("Unknown embedding model: {}", model)))?;
                    let info = model_manager
                        .get_model_info(&model_id)
                        .ok_or_else(|| ResumeMatcherError::ModelUnavailable(model_id.clone()))?;

                    println!("Name: {}", info.name);
                    println!("Repository: {}", info.repo_id);
                    println!("Size: {} MB", info.size_mb);
                    println!("Dimensions: {}", info.dimensions);
                    println!("Description: {}", info.description);
                    match model_manager.get_model_path(&model_id) {
                        Some(path) => println!("Status: downloaded ({})", path.display()),
                        None => println!("Status: available (resume-matcher models download {})", model_id),
                    }
                }
            }
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                println!("Configuration ({})\n", config_path.display());
                println!("Models directory: {}", config.models_dir().display());
                println!("Embedding model: {}", config.models.embedding_model);
                println!("Keyword list cap: {}", config.scoring.keyword_list_cap);
                println!("Lexical tip threshold: {:.1}%", config.scoring.lexical_tip_threshold);
                println!("Missing keywords named in tips: {}", config.scoring.missing_tip_limit);
                println!("Top JD keywords listed: {}", config.scoring.top_keyword_limit);
                println!("Output format: {:?}", config.output.format);
            }

            Some(ConfigAction::Reset) => {
                Config::default().save_to(&config_path)?;
                println!("Configuration reset: {}", config_path.display());
            }

            Some(ConfigAction::Path) => {
                println!("{}", config_path.display());
            }
        },
    }

    Ok(())
}
