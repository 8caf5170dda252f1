//! File type detection

/// Every extension `FileType::from_extension` maps to a known type
pub const SUPPORTED_EXTENSIONS: [&str; 6] = ["pdf", "docx", "txt", "text", "md", "markdown"];

#[derive(Debug, Clone, PartialEq)]
pub enum FileType {
    Pdf,
    Docx,
    Text,
    Markdown,
    Unknown,
}

impl FileType {
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "pdf" => FileType::Pdf,
            "docx" => FileType::Docx,
            "txt" | "text" => FileType::Text,
            "md" | "markdown" => FileType::Markdown,
            _ => FileType::Unknown,
        }
    }
}
