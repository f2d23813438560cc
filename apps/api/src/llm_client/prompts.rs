// Shared prompt constants used by more than one pipeline stage.
// Each stage that needs LLM calls defines its own prompts.rs alongside it.

/// System instruction for every structured section extraction call.
pub const STRICT_PARSER_SYSTEM: &str = "You are a strict resume parser. Parse ONLY from the provided text. \
    Never invent facts. If data is missing, use null (or [] for arrays). \
    Dates should be 'YYYY' or 'YYYY-MM'. If a section does not exist, return an empty array/object.";
