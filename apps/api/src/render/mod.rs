//! Document rendering — record (+ optional layout plan) → HTML, and the
//! optional hand-off of that HTML to an external PDF converter.

pub mod handlers;
pub mod html;
pub mod pdf;

use thiserror::Error;

use crate::models::layout::LayoutPlan;
use crate::models::resume::ResumeRecord;

pub use html::{HtmlRenderer, RenderStyle};

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Unknown style '{0}'. Supported styles are classic and modern")]
    UnknownStyle(String),

    #[error("failed to format document: {0}")]
    Format(#[from] std::fmt::Error),

    #[error("PDF export unavailable: {0}")]
    PdfExportUnavailable(String),

    #[error("PDF export failed: {0}")]
    PdfExportFailed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Merges a record with an optional layout plan into final markup.
///
/// Without a plan the record is rendered directly in record order with no
/// page structure (legacy mode). With a plan each page is rendered in turn and
/// every block's `data_key` is resolved against the record.
pub trait DocumentRenderer: Send + Sync {
    fn render(&self, record: &ResumeRecord, plan: Option<&LayoutPlan>)
        -> Result<String, RenderError>;
}

/// Resolves a style label to its renderer.
pub fn renderer_for(style: &str) -> Result<Box<dyn DocumentRenderer>, RenderError> {
    let style = RenderStyle::parse(style)?;
    Ok(Box::new(HtmlRenderer::new(style)))
}
