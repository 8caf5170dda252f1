//! Output formatters: console, JSON, Markdown and HTML

use crate::config::OutputFormat;
use crate::error::{Result, ResumeMatcherError};
use crate::output::report::{EvaluationReport, MatchStrength};
use askama::Template;
use colored::{Color, Colorize};
use std::path::Path;

/// Trait for formatting evaluation reports
pub trait OutputFormatter {
    fn format_report(&self, report: &EvaluationReport) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Console formatter with optional colors
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

/// JSON formatter for scripting and integration
pub struct JsonFormatter {
    pretty: bool,
}

pub struct MarkdownFormatter {
    include_metadata: bool,
}

pub struct HtmlFormatter {
    include_styles: bool,
}

/// Report generator that coordinates different formatters
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
    html_formatter: HtmlFormatter,
}

/// How many keywords the compact console view shows per list
const CONSOLE_KEYWORD_PREVIEW: usize = 30;

fn generated_at(report: &EvaluationReport) -> String {
    chrono::DateTime::<chrono::Utc>::from(report.metadata.generated_at)
        .format("%Y-%m-%d %H:%M:%S UTC")
        .to_string()
}

fn join_or(list: &[String], empty: &str) -> String {
    if list.is_empty() {
        empty.to_string()
    } else {
        list.join(", ")
    }
}

#[derive(Template)]
#[template(source = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Resume Match Report</title>
    {% if include_styles %}
    <style>
        body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; line-height: 1.6; color: #333; max-width: 900px; margin: 0 auto; padding: 20px; background: #f8f9fa; }
        .container { background: white; padding: 30px; border-radius: 8px; box-shadow: 0 2px 10px rgba(0,0,0,0.1); }
        .scores { display: grid; grid-template-columns: repeat(auto-fit, minmax(200px, 1fr)); gap: 15px; }
        .score-item { background: #f8f9fa; padding: 15px; border-radius: 6px; border-left: 4px solid #007acc; }
        .badge { display: inline-block; padding: 6px 14px; border-radius: 20px; font-weight: bold; color: white; }
        .strong { background: #28a745; }
        .moderate { background: #ffc107; color: #000; }
        .weak { background: #dc3545; }
        .keywords { columns: 2; }
        .metadata { color: #6c757d; font-size: 0.9em; border-top: 1px solid #e9ecef; margin-top: 30px; padding-top: 10px; }
    </style>
    {% endif %}
</head>
<body>
    <div class="container">
        <h1>Resume Match Report <span class="badge {{ strength_class }}">{{ strength_label }}</span></h1>
        <p>Generated: {{ generated_at }} | Processing time: {{ processing_time }}ms</p>

        <div class="scores">
            <div class="score-item"><h4>Lexical Similarity</h4><p><strong>{{ lexical }}%</strong></p></div>
            <div class="score-item"><h4>Semantic Similarity</h4><p><strong>{{ semantic }}%</strong></p></div>
            <div class="score-item"><h4>Keyword Coverage</h4><p><strong>{{ coverage }}%</strong></p></div>
        </div>

        <h2>Top JD Keywords</h2>
        <p>{{ top_keywords }}</p>

        <h2>Covered in Resume</h2>
        {% if has_matched %}
        <ul class="keywords">{% for keyword in matched %}<li>{{ keyword }}</li>{% endfor %}</ul>
        {% else %}
        <p><em>No strong matches found.</em></p>
        {% endif %}

        <h2>Missing / Low-Signal</h2>
        {% if has_missing %}
        <ul class="keywords">{% for keyword in missing %}<li>{{ keyword }}</li>{% endfor %}</ul>
        {% else %}
        <p><em>Great coverage!</em></p>
        {% endif %}

        <h2>Recommendations</h2>
        <ol>{% for tip in recommendations %}<li>{{ tip }}</li>{% endfor %}</ol>

        <div class="metadata">
            <p>resume-matcher v{{ version }} | Embedding model: {{ embedding_model }}</p>
            <p>Resume: {{ resume_source }} | Job: {{ job_source }}</p>
        </div>
    </div>
</body>
</html>"#, ext = "html")]
struct HtmlTemplate<'a> {
    include_styles: bool,
    generated_at: String,
    processing_time: u64,
    strength_class: &'a str,
    strength_label: &'a str,
    lexical: String,
    semantic: String,
    coverage: String,
    top_keywords: String,
    has_matched: bool,
    matched: &'a [String],
    has_missing: bool,
    missing: &'a [String],
    recommendations: &'a [String],
    version: &'a str,
    embedding_model: &'a str,
    resume_source: &'a str,
    job_source: &'a str,
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let prefix = match level {
            1 => "█",
            2 => "▓",
            _ => "▒",
        };

        let color = match level {
            1 => Color::Blue,
            2 => Color::Green,
            _ => Color::Yellow,
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn format_strength_badge(&self, strength: MatchStrength) -> String {
        let color = match strength {
            MatchStrength::Strong => Color::Green,
            MatchStrength::Moderate => Color::Yellow,
            MatchStrength::Weak => Color::Red,
        };

        if self.use_colors {
            format!("[{}]", strength.label().color(color).bold())
        } else {
            format!("[{}]", strength.label())
        }
    }

    /// Text progress bar for a 0-100 score
    fn format_bar(&self, score: f32) -> String {
        let filled = ((score.clamp(0.0, 100.0) / 5.0).round()) as usize;
        format!("{}{}", "#".repeat(filled), "-".repeat(20 - filled))
    }

    fn keyword_preview<'a>(&self, keywords: &'a [String]) -> (&'a [String], usize) {
        if self.detailed || keywords.len() <= CONSOLE_KEYWORD_PREVIEW {
            (keywords, 0)
        } else {
            (&keywords[..CONSOLE_KEYWORD_PREVIEW], keywords.len() - CONSOLE_KEYWORD_PREVIEW)
        }
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &EvaluationReport) -> Result<String> {
        let scores = &report.match_report;
        let mut output = String::new();

        output.push_str(&self.format_header("RESUME MATCH", 1));
        output.push_str(&format!(
            "Generated: {} | Processing time: {}ms\n",
            generated_at(report),
            report.metadata.processing_time_ms
        ));

        output.push_str(&self.format_header("Overall Match", 2));
        output.push_str(&format!(
            "Similarity Score: {:.1}% {}\n",
            scores.lexical_similarity,
            self.format_strength_badge(report.strength())
        ));
        output.push_str(&format!("  Lexical   [{}] {:>5.1}%\n", self.format_bar(scores.lexical_similarity), scores.lexical_similarity));
        output.push_str(&format!("  Semantic  [{}] {:>5.1}%\n", self.format_bar(scores.semantic_similarity), scores.semantic_similarity));
        output.push_str(&format!("  Coverage  [{}] {:>5.1}%\n", self.format_bar(scores.keyword_coverage), scores.keyword_coverage));

        output.push_str(&self.format_header("Top JD Keywords", 3));
        output.push_str(&join_or(&scores.top_jd_keywords, "None found."));
        output.push('\n');

        output.push_str(&self.format_header("Covered in Resume", 3));
        let (shown, hidden) = self.keyword_preview(&scores.matched_keywords);
        output.push_str(&self.colorize(&join_or(shown, "No strong matches found."), Color::Green));
        output.push('\n');
        if hidden > 0 {
            output.push_str(&format!("... and {} more (use --detailed)\n", hidden));
        }

        output.push_str(&self.format_header("Missing / Low-Signal", 3));
        let (shown, hidden) = self.keyword_preview(&scores.missing_keywords);
        output.push_str(&self.colorize(&join_or(shown, "Great coverage!"), Color::Red));
        output.push('\n');
        if hidden > 0 {
            output.push_str(&format!("... and {} more (use --detailed)\n", hidden));
        }

        output.push_str(&self.format_header("Recommendations", 2));
        for tip in &report.recommendations {
            output.push_str(&format!("  - {}\n", tip));
        }

        if self.detailed {
            output.push_str(&self.format_header("Details", 3));
            output.push_str(&format!("Embedding model: {}\n", report.metadata.embedding_model));
            output.push_str(&format!("Resume: {}\n", report.metadata.resume_source));
            output.push_str(&format!("Job description: {}\n", report.metadata.job_source));
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &EvaluationReport) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(report)?)
        } else {
            Ok(serde_json::to_string(report)?)
        }
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &EvaluationReport) -> Result<String> {
        let scores = &report.match_report;
        let mut output = String::new();

        output.push_str("# Resume Match Report\n\n");

        if self.include_metadata {
            output.push_str(&format!(
                "**Generated:** {} | **Processing Time:** {}ms\n",
                generated_at(report),
                report.metadata.processing_time_ms
            ));
            output.push_str(&format!(
                "**Resume:** `{}` | **Job:** `{}` | **Model:** `{}`\n\n",
                report.metadata.resume_source, report.metadata.job_source, report.metadata.embedding_model
            ));
        }

        output.push_str(&format!("**Verdict:** {}\n\n", report.strength().label()));

        output.push_str("| Metric | Score |\n");
        output.push_str("|--------|-------|\n");
        output.push_str(&format!("| Lexical Similarity | {:.1}% |\n", scores.lexical_similarity));
        output.push_str(&format!("| Semantic Similarity | {:.1}% |\n", scores.semantic_similarity));
        output.push_str(&format!("| Keyword Coverage | {:.1}% |\n\n", scores.keyword_coverage));

        output.push_str("## Top JD Keywords\n\n");
        output.push_str(&join_or(&scores.top_jd_keywords, "_None found._"));
        output.push_str("\n\n");

        output.push_str("## Covered in Resume\n\n");
        output.push_str(&join_or(&scores.matched_keywords, "_No strong matches found._"));
        output.push_str("\n\n");

        output.push_str("## Missing / Low-Signal\n\n");
        output.push_str(&join_or(&scores.missing_keywords, "_Great coverage!_"));
        output.push_str("\n\n");

        output.push_str("## Recommendations\n\n");
        for tip in &report.recommendations {
            output.push_str(&format!("- {}\n", tip));
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

impl HtmlFormatter {
    pub fn new(include_styles: bool) -> Self {
        Self { include_styles }
    }
}

impl OutputFormatter for HtmlFormatter {
    fn format_report(&self, report: &EvaluationReport) -> Result<String> {
        let scores = &report.match_report;
        let strength = report.strength();
        let strength_class = match strength {
            MatchStrength::Strong => "strong",
            MatchStrength::Moderate => "moderate",
            MatchStrength::Weak => "weak",
        };

        let template = HtmlTemplate {
            include_styles: self.include_styles,
            generated_at: generated_at(report),
            processing_time: report.metadata.processing_time_ms,
            strength_class,
            strength_label: strength.label(),
            lexical: format!("{:.1}", scores.lexical_similarity),
            semantic: format!("{:.1}", scores.semantic_similarity),
            coverage: format!("{:.1}", scores.keyword_coverage),
            top_keywords: join_or(&scores.top_jd_keywords, "None found."),
            has_matched: !scores.matched_keywords.is_empty(),
            matched: &scores.matched_keywords,
            has_missing: !scores.missing_keywords.is_empty(),
            missing: &scores.missing_keywords,
            recommendations: &report.recommendations,
            version: &report.metadata.tool_version,
            embedding_model: &report.metadata.embedding_model,
            resume_source: &report.metadata.resume_source,
            job_source: &report.metadata.job_source,
        };

        template
            .render()
            .map_err(|e| ResumeMatcherError::OutputFormatting(format!("HTML template failed: {}", e)))
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Html
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self::with_options(true, false)
    }

    pub fn with_options(use_colors: bool, detailed: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(true),
            markdown_formatter: MarkdownFormatter::new(true),
            html_formatter: HtmlFormatter::new(true),
        }
    }

    pub fn generate_report(&self, report: &EvaluationReport, format: &OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_report(report),
            OutputFormat::Json => self.json_formatter.format_report(report),
            OutputFormat::Markdown => self.markdown_formatter.format_report(report),
            OutputFormat::Html => self.html_formatter.format_report(report),
        }
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    use std::fs;
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(file_path, content)?;
    Ok(())
}

pub fn suggest_filename(format: &OutputFormat, resume_name: &str, timestamp: bool) -> String {
    let base_name = Path::new(resume_name)
        .file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .filter(|stem| !stem.is_empty())
        .unwrap_or_else(|| "resume".to_string());

    let timestamp_suffix = if timestamp {
        format!("_{}", chrono::Utc::now().format("%Y%m%d_%H%M%S"))
    } else {
        String::new()
    };

    let extension = match format {
        OutputFormat::Console => "txt",
        OutputFormat::Json => "json",
        OutputFormat::Markdown => "md",
        OutputFormat::Html => "html",
    };

    format!("{}_match{}.{}", base_name, timestamp_suffix, extension)
}
