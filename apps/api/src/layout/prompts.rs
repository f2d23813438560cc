//! LLM prompt constants for layout planning.
//!
//! The prompt embeds the sizing heuristics from `sizing.rs` and a content
//! summary of the record. Callers deserialize via `call_json::<LayoutPlan>()`.

pub const LAYOUT_SYSTEM: &str = "\
You are an expert graphic designer and layout architect for a resume generator. \
Your task is to create a JSON-based layout plan that arranges resume components onto one or more A4 pages. \
You must decide the best order for the components and where to place page breaks for a clean, professional look.";

pub const LAYOUT_PROMPT_TEMPLATE: &str = "\
You are an expert graphic designer and layout architect creating a professional, multi-page resume PDF from a JSON data object. \
Your task is to generate a JSON 'layout plan' that avoids awkward page breaks and content splitting.\n\
\n\
**CONSTRAINTS & HEURISTICS:**\n\
1.  **Canvas**: The target is an A4 page with margins. The usable vertical space per page is approximately **{page_units} units**.\n\
2.  **Content Estimation**: You must estimate the height of each section to decide what fits on a page. Use these heuristics:\n\
    - A section title is **{title_units} units**.\n\
    - Each line of text or bullet point is **{line_units} units**.\n\
    - Add **{padding_units} units** of padding after each major section (like work experience).\n\
3.  **Page Break Logic**: Your primary goal is to prevent content from splitting awkwardly. \
Never split a single job entry or education entry across two pages. \
If adding the next logical section (e.g., the entire 'Work Experience' block) will exceed the remaining space on the current page, \
you MUST start that section on a new page.\n\
4.  **Layout Style**: The desired style is '{style}'.\n\
5.  **Available Data**: The user has provided the following sections (summary shows number of entries/lines):\n\
    {content_summary}\n\
\n\
Every block's `data_key` MUST be one of the section names listed above.\n\
Based on your height calculations, generate the final JSON layout plan. \
Ensure the 'pages' array in your output reflects your intelligent page break decisions.";
