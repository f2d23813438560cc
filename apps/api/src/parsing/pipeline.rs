//! Résumé parsing pipeline — orchestrates the full file → record flow.
//!
//! Flow: extract_text → normalize → segment → assemble (nine extractors,
//! concurrent) → persist `<stem>.parsed.json`.
//!
//! Only text extraction can abort a run. Every later stage degrades to
//! empty values instead of failing.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use crate::document::{extract_text, ExtractError};
use crate::llm_client::InferenceService;
use crate::models::resume::ResumeRecord;
use crate::parsing::assembler::{assemble, persist_record};
use crate::parsing::normalize::normalize;
use crate::parsing::segmenter::segment;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Extract(#[from] ExtractError),

    #[error("pipeline cancelled before {stage}")]
    Cancelled { stage: &'static str },

    #[error("failed to persist parsed record: {0}")]
    Persist(#[from] std::io::Error),
}

/// Coarse cancellation flag, checked between pipeline stages.
/// In-flight inference calls are not interrupted.
#[derive(Debug, Clone, Default)]
pub struct Cancellation(Arc<AtomicBool>);

impl Cancellation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    /// Guard that cancels this flag when dropped, e.g. with an abandoned request.
    pub fn cancel_on_drop(&self) -> CancelOnDrop {
        CancelOnDrop(self.clone())
    }

    fn check(&self, stage: &'static str) -> Result<(), PipelineError> {
        if self.is_cancelled() {
            info!("Pipeline cancelled before {stage}");
            Err(PipelineError::Cancelled { stage })
        } else {
            Ok(())
        }
    }
}

#[derive(Debug)]
pub struct CancelOnDrop(Cancellation);

impl Drop for CancelOnDrop {
    fn drop(&mut self) {
        self.0.cancel();
    }
}

#[derive(Debug, Clone)]
pub struct ParsedResume {
    pub record: ResumeRecord,
    pub record_path: PathBuf,
}

/// Parses the résumé at `source` and persists the record beside it.
///
/// Steps:
/// 1. extract_text() → raw text (fatal on NotFound / UnsupportedFormat)
/// 2. normalize() → canonical text, the ground truth for validation
/// 3. segment() → SectionSpans (all-empty on failure)
/// 4. assemble() → ResumeRecord (per-section zero-values on failure)
/// 5. persist_record() → `<stem>.parsed.json`
pub async fn parse_resume(
    llm: &dyn InferenceService,
    source: &Path,
    cancel: &Cancellation,
) -> Result<ParsedResume, PipelineError> {
    // Step 1: Text extraction
    let raw = extract_text(source).await?;

    // Step 2: Normalization
    let text = normalize(&raw);
    info!(
        "Normalized {} chars of text from {}",
        text.len(),
        source.display()
    );

    // Step 3: Segmentation
    cancel.check("segmentation")?;
    let spans = segment(llm, &text).await;

    // Step 4: Section extraction + assembly
    cancel.check("extraction")?;
    let record = assemble(llm, &spans, &text).await;

    // Step 5: Persist
    cancel.check("persistence")?;
    let record_path = persist_record(source, &record).await?;

    Ok(ParsedResume {
        record,
        record_path,
    })
}
