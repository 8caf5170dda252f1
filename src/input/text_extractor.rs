//! Text extraction from various file formats

use crate::error::{Result, ResumeMatcherError};
use pulldown_cmark::{html, Parser};
use regex::Regex;
use std::io::{Cursor, Read};
use std::path::Path;
use tokio::fs;

pub trait TextExtractor {
    fn extract(&self, path: &Path) -> impl std::future::Future<Output = Result<String>> + Send;
}

pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).await?;

        let text = pdf_extract::extract_text_from_mem(&bytes).map_err(|e| {
            ResumeMatcherError::PdfExtraction(format!("Failed to extract text from PDF '{}': {}", path.display(), e))
        })?;
        Ok(text)
    }
}

pub struct DocxExtractor;

impl TextExtractor for DocxExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).await?;
        self.extract_from_bytes(&bytes).map_err(|e| match e {
            ResumeMatcherError::DocxExtraction(msg) => {
                ResumeMatcherError::DocxExtraction(format!("'{}': {}", path.display(), msg))
            }
            other => other,
        })
    }
}

impl DocxExtractor {
    /// Pull paragraph text out of the `word/document.xml` part of a DOCX archive
    pub fn extract_from_bytes(&self, bytes: &[u8]) -> Result<String> {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes))
            .map_err(|e| ResumeMatcherError::DocxExtraction(format!("Not a DOCX archive: {}", e)))?;

        let mut xml = String::new();
        archive
            .by_name("word/document.xml")
            .map_err(|e| ResumeMatcherError::DocxExtraction(format!("Missing document body: {}", e)))?
            .read_to_string(&mut xml)?;

        Ok(Self::xml_to_text(&xml))
    }

    fn xml_to_text(xml: &str) -> String {
        let breaks = Regex::new(r"</w:p>|<w:(?:br|cr)\b[^>]*/>").expect("Invalid break regex");
        let tabs = Regex::new(r"<w:tab\b[^>]*/>").expect("Invalid tab regex");
        let tags = Regex::new(r"<[^>]*>").expect("Invalid tag regex");

        let text = breaks.replace_all(xml, "\n");
        let text = tabs.replace_all(&text, "\t");
        let text = tags.replace_all(&text, "");

        let lines: Vec<String> = unescape_entities(&text)
            .lines()
            .map(|line| line.trim().to_string())
            .filter(|line| !line.is_empty())
            .collect();

        lines.join("\n")
    }
}

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        // Undecodable bytes are dropped rather than failing the upload
        let bytes = fs::read(path).await?;
        Ok(String::from_utf8_lossy(&bytes).replace('\u{FFFD}', ""))
    }
}

pub struct MarkdownExtractor;

impl TextExtractor for MarkdownExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let markdown_content = fs::read_to_string(path).await?;

        let parser = Parser::new(&markdown_content);
        let mut html_output = String::new();
        html::push_html(&mut html_output, parser);

        Ok(self.html_to_text(&html_output))
    }
}

impl MarkdownExtractor {
    fn html_to_text(&self, html: &str) -> String {
        let text = html
            .replace("<br>", "\n")
            .replace("<br />", "\n")
            .replace("</p>", "\n\n")
            .replace("</li>", "\n");

        let re = Regex::new(r"<[^>]*>").expect("Invalid tag regex");
        let clean_text = re.replace_all(&text, "");

        let lines: Vec<String> = unescape_entities(&clean_text)
            .lines()
            .map(|line| line.trim().to_string())
            .filter(|line| !line.is_empty())
            .collect();

        lines.join("\n")
    }
}

/// Decode named and numeric character references in one pass
fn unescape_entities(text: &str) -> String {
    let entity = Regex::new(r"&(#[0-9]+|#[xX][0-9a-fA-F]+|[a-z]+);").expect("Invalid entity regex");

    entity
        .replace_all(text, |caps: &regex::Captures| {
            let name = &caps[1];
            let decoded = match name {
                "amp" => Some('&'),
                "lt" => Some('<'),
                "gt" => Some('>'),
                "quot" => Some('"'),
                "apos" => Some('\''),
                "nbsp" => Some(' '),
                _ => match name.strip_prefix("#x").or_else(|| name.strip_prefix("#X")) {
                    Some(hex) => u32::from_str_radix(hex, 16).ok().and_then(char::from_u32),
                    None => name
                        .strip_prefix('#')
                        .and_then(|dec| dec.parse::<u32>().ok())
                        .and_then(char::from_u32),
                },
            };
            decoded.map_or_else(|| caps[0].to_string(), |c| c.to_string())
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;
    use zip::write::SimpleFileOptions;

    fn build_docx(document_xml: &str) -> Vec<u8> {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file("word/document.xml", SimpleFileOptions::default())
            .unwrap();
        writer.write_all(document_xml.as_bytes()).unwrap();
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn test_docx_paragraphs_become_lines() {
        let xml = r#"<?xml version="1.0"?><w:document><w:body>
            <w:p><w:r><w:t>Jane Smith</w:t></w:r></w:p>
            <w:p><w:r><w:t>Rust &amp; Python</w:t></w:r><w:r><w:tab/><w:t>Git</w:t></w:r></w:p>
            </w:body></w:document>"#;

        let text = DocxExtractor.extract_from_bytes(&build_docx(xml)).unwrap();
        assert_eq!(text, "Jane Smith\nRust & Python\tGit");
    }

    #[test]
    fn test_docx_breaks_with_attributes_split_words() {
        let xml = r#"<w:document><w:body><w:p>
            <w:r><w:t>Kubernetes</w:t><w:br w:type="page"/><w:t>Terraform</w:t></w:r>
            <w:r><w:t>Go</w:t><w:tab w:val="left"/><w:t>Rust</w:t></w:r>
            </w:p></w:body></w:document>"#;

        let text = DocxExtractor.extract_from_bytes(&build_docx(xml)).unwrap();
        assert_eq!(text, "Kubernetes\nTerraform\nGo\tRust");
    }

    #[test]
    fn test_numeric_character_references_decoded() {
        assert_eq!(unescape_entities("Jane&#8217;s CI&#x2F;CD"), "Jane\u{2019}s CI/CD");
        assert_eq!(unescape_entities("&amp;lt; stays &unknown; &#xZZ;"), "&lt; stays &unknown; &#xZZ;");
    }

    #[test]
    fn test_docx_without_body_fails() {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        writer.start_file("other.xml", SimpleFileOptions::default()).unwrap();
        writer.write_all(b"<x/>").unwrap();
        let bytes = writer.finish().unwrap().into_inner();

        let result = DocxExtractor.extract_from_bytes(&bytes);
        assert!(matches!(result, Err(ResumeMatcherError::DocxExtraction(_))));
    }

    #[test]
    fn test_garbage_is_not_docx() {
        let result = DocxExtractor.extract_from_bytes(b"definitely not a zip");
        assert!(matches!(result, Err(ResumeMatcherError::DocxExtraction(_))));
    }

    #[tokio::test]
    async fn test_plain_text_drops_invalid_utf8() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("resume.txt");
        std::fs::write(&path, b"Rust\xff developer").unwrap();

        let text = PlainTextExtractor.extract(&path).await.unwrap();
        assert_eq!(text, "Rust developer");
    }

    #[test]
    fn test_markdown_html_is_stripped() {
        let text = MarkdownExtractor.html_to_text("<h1>Skills</h1>\n<ul>\n<li><strong>Rust</strong></li>\n<li>C &amp; C++</li>\n</ul>\n");
        assert_eq!(text, "Skills\nRust\nC & C++");
    }
}
