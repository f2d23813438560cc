//! Document text extraction — turns an uploaded `.txt`, `.pdf` or `.docx` file
//! into raw text. The file bytes never leave this module.

pub mod docx;
pub mod pdf;

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Unsupported file type: {0}. Supported types are .txt, .docx, and .pdf")]
    UnsupportedFormat(String),

    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF extraction failed: {0}")]
    Pdf(String),

    #[error("DOCX extraction failed: {0}")]
    Docx(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Text,
    Pdf,
    Docx,
}

impl DocumentFormat {
    /// Detects the declared format from the file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self, ExtractError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "txt" => Ok(DocumentFormat::Text),
            "pdf" => Ok(DocumentFormat::Pdf),
            "docx" => Ok(DocumentFormat::Docx),
            _ => Err(ExtractError::UnsupportedFormat(if ext.is_empty() {
                "(none)".to_string()
            } else {
                format!(".{ext}")
            })),
        }
    }
}

/// Raw upload content tagged with its declared format.
struct RawDocument {
    bytes: Vec<u8>,
    format: DocumentFormat,
}

/// Reads `path` and returns its text content.
///
/// Fails with `NotFound` when the path does not exist and `UnsupportedFormat`
/// for any extension other than txt, pdf, docx.
pub async fn extract_text(path: &Path) -> Result<String, ExtractError> {
    if !tokio::fs::try_exists(path).await.unwrap_or(false) {
        return Err(ExtractError::NotFound(path.to_path_buf()));
    }
    let format = DocumentFormat::from_path(path)?;

    let raw = RawDocument {
        bytes: tokio::fs::read(path).await?,
        format,
    };
    info!(
        "Extracting text from {} ({:?}, {} bytes)",
        path.display(),
        raw.format,
        raw.bytes.len()
    );

    // PDF and DOCX decoding is CPU-bound; keep it off the async executor.
    tokio::task::spawn_blocking(move || decode(raw))
        .await
        .map_err(|e| ExtractError::Io(std::io::Error::other(e)))?
}

fn decode(raw: RawDocument) -> Result<String, ExtractError> {
    match raw.format {
        DocumentFormat::Text => Ok(String::from_utf8_lossy(&raw.bytes).into_owned()),
        DocumentFormat::Pdf => pdf::extract_pdf_text(&raw.bytes),
        DocumentFormat::Docx => docx::extract_docx_text(&raw.bytes),
    }
}
