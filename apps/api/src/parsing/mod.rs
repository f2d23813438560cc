// Résumé parsing pipeline
// Implements: text normalization, segmentation, per-section extraction,
// anti-hallucination validation, assembly and persistence of the parsed record.
// All inference calls go through llm_client — no direct Gemini calls here.

pub mod assembler;
pub mod handlers;
pub mod normalize;
pub mod pipeline;
pub mod prompts;
pub mod schemas;
pub mod sections;
pub mod segmenter;
pub mod validation;
