// Parsing-stage LLM prompt templates.
// Section extraction prompts are built from each section's label in sections.rs;
// the strict parser system instruction lives in llm_client::prompts.

pub const SEGMENTATION_SYSTEM: &str = "\
You are a resume segmentation tool. Extract the main sections from the resume text. \
Return each section as a string. If a section doesn't exist, return an empty string. \
Be precise and only extract what's clearly present in the text.";

pub const SEGMENTATION_PROMPT_TEMPLATE: &str = "Segment the following resume text into sections:\n\n{text}";

pub const SUMMARY_SYSTEM: &str = "\
Extract the professional summary from the provided text. \
Return only the summary text as a string, not as JSON. \
If no summary is found, return an empty string.";

pub const SUMMARY_PROMPT_TEMPLATE: &str =
    "Extract the professional summary from this text:\n\n{chunk}";

pub const SECTION_PROMPT_TEMPLATE: &str = "Parse {label} from:\n\n{chunk}";
