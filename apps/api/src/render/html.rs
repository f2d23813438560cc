//! Built-in HTML templates.
//!
//! Every value taken from the record is escaped before it reaches the markup.

use std::fmt::Write;

use html_escape::{encode_double_quoted_attribute, encode_text};

use super::{DocumentRenderer, RenderError};
use crate::models::layout::{LayoutBlock, LayoutPlan};
use crate::models::resume::{ResumeRecord, RECORD_FIELDS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderStyle {
    Classic,
    Modern,
}

impl RenderStyle {
    pub fn parse(label: &str) -> Result<Self, RenderError> {
        match label.trim().to_ascii_lowercase().as_str() {
            "classic" => Ok(RenderStyle::Classic),
            "modern" => Ok(RenderStyle::Modern),
            _ => Err(RenderError::UnknownStyle(label.to_string())),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RenderStyle::Classic => "classic",
            RenderStyle::Modern => "modern",
        }
    }

    fn stylesheet(self) -> &'static str {
        match self {
            RenderStyle::Classic => CLASSIC_CSS,
            RenderStyle::Modern => MODERN_CSS,
        }
    }
}

const BASE_CSS: &str = "\
@page { size: A4; margin: 18mm; }
* { box-sizing: border-box; }
body { margin: 0; line-height: 1.35; font-size: 10.5pt; }
.page { page-break-after: always; break-after: page; }
.page:last-child { page-break-after: auto; break-after: auto; }
.block { margin-bottom: 14px; page-break-inside: avoid; }
.entry { margin-bottom: 8px; page-break-inside: avoid; break-inside: avoid; }
.entry-head { display: flex; justify-content: space-between; }
.meta { color: #555; }
ul { margin: 4px 0 0 18px; padding: 0; }
";

const CLASSIC_CSS: &str = "\
body { font-family: Georgia, 'Times New Roman', serif; color: #111; }
header { text-align: center; border-bottom: 1px solid #111; padding-bottom: 6px; }
h1 { font-size: 22pt; margin: 0; letter-spacing: 1px; }
h2 { font-size: 12pt; text-transform: uppercase; border-bottom: 1px solid #999; margin: 0 0 6px; }
";

const MODERN_CSS: &str = "\
body { font-family: 'Helvetica Neue', Arial, sans-serif; color: #222; }
header { border-left: 6px solid #2b6cb0; padding-left: 12px; }
h1 { font-size: 24pt; margin: 0; color: #2b6cb0; }
h2 { font-size: 11pt; color: #2b6cb0; text-transform: uppercase; letter-spacing: 2px; margin: 0 0 6px; }
";

/// Renders records with one of the built-in styles.
#[derive(Debug, Clone, Copy)]
pub struct HtmlRenderer {
    style: RenderStyle,
}

impl HtmlRenderer {
    pub fn new(style: RenderStyle) -> Self {
        Self { style }
    }
}

impl DocumentRenderer for HtmlRenderer {
    fn render(
        &self,
        record: &ResumeRecord,
        plan: Option<&LayoutPlan>,
    ) -> Result<String, RenderError> {
        let mut body = String::new();
        match plan {
            None => {
                body.push_str("<main class=\"resume\">\n");
                for key in RECORD_FIELDS {
                    write_block(&mut body, record, &LayoutBlock::new(key))?;
                }
                body.push_str("</main>\n");
            }
            Some(plan) => {
                for (index, page) in plan.pages.iter().enumerate() {
                    writeln!(body, "<section class=\"page\" data-page=\"{}\">", index + 1)?;
                    for block in &page.content {
                        write_block(&mut body, record, block)?;
                    }
                    body.push_str("</section>\n");
                }
            }
        }

        let title = record
            .contact_info
            .name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or("Resume");

        let mut out = String::with_capacity(body.len() + 2048);
        writeln!(out, "<!DOCTYPE html>")?;
        writeln!(out, "<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">")?;
        writeln!(out, "<title>{}</title>", encode_text(title))?;
        writeln!(
            out,
            "<style>\n{BASE_CSS}{}</style>\n</head>",
            self.style.stylesheet()
        )?;
        writeln!(out, "<body class=\"style-{}\">", self.style.as_str())?;
        out.push_str(&body);
        out.push_str("</body>\n</html>\n");
        Ok(out)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Blocks
// ────────────────────────────────────────────────────────────────────────────

fn section_title(key: &str) -> &'static str {
    match key {
        "summary" => "Professional Summary",
        "work_experience" => "Work Experience",
        "education" => "Education",
        "skills" => "Skills",
        "certifications" => "Certifications",
        "projects" => "Projects",
        "languages" => "Languages",
        "awards" => "Awards",
        _ => "",
    }
}

/// Writes one block. Unknown keys and empty sections produce nothing.
fn write_block(out: &mut String, record: &ResumeRecord, block: &LayoutBlock) -> Result<(), RenderError> {
    let key = block.data_key.as_str();
    if record.entry_count(key).is_none() {
        tracing::debug!("Skipping block with unknown data_key '{key}'");
        return Ok(());
    }
    if record.is_section_empty(key) {
        return Ok(());
    }

    let class = encode_double_quoted_attribute(&block.component);
    if key == "contact_info" {
        writeln!(out, "<header class=\"block {class}\">")?;
        write_contact(out, record)?;
        out.push_str("</header>\n");
        return Ok(());
    }

    writeln!(out, "<div class=\"block {class}\">")?;
    writeln!(out, "<h2>{}</h2>", section_title(key))?;
    match key {
        "summary" => writeln!(out, "<p>{}</p>", encode_text(record.summary.trim()))?,
        "work_experience" => write_experience(out, record)?,
        "education" => write_education(out, record)?,
        "skills" => {
            for (label, items) in record.skills.categories() {
                writeln!(out, "<p><strong>{label}:</strong> {}</p>", join_escaped(items))?;
            }
        }
        "certifications" => {
            out.push_str("<ul>\n");
            for cert in &record.certifications {
                let line = [cert.name.as_deref(), cert.issuer.as_deref(), cert.date.as_deref()]
                    .into_iter()
                    .flatten()
                    .filter(|s| !s.trim().is_empty())
                    .collect::<Vec<_>>()
                    .join(", ");
                writeln!(out, "<li>{}</li>", encode_text(&line))?;
            }
            out.push_str("</ul>\n");
        }
        "projects" => write_projects(out, record)?,
        "languages" => writeln!(out, "<p>{}</p>", join_escaped(&record.languages))?,
        "awards" => write_list(out, &record.awards)?,
        _ => {}
    }
    out.push_str("</div>\n");
    Ok(())
}

fn write_contact(out: &mut String, record: &ResumeRecord) -> Result<(), RenderError> {
    let contact = &record.contact_info;
    if let Some(name) = contact.name.as_deref() {
        writeln!(out, "<h1>{}</h1>", encode_text(name))?;
    }
    let details: Vec<&str> = [
        contact.email.as_deref(),
        contact.phone.as_deref(),
        contact.location.as_deref(),
        contact.linkedin.as_deref(),
        contact.github.as_deref(),
        contact.website.as_deref(),
    ]
    .into_iter()
    .flatten()
    .filter(|s| !s.trim().is_empty())
    .collect();
    if !details.is_empty() {
        writeln!(out, "<p class=\"meta\">{}</p>", join_escaped_with(&details, " | "))?;
    }
    Ok(())
}

fn write_experience(out: &mut String, record: &ResumeRecord) -> Result<(), RenderError> {
    for job in &record.work_experience {
        out.push_str("<div class=\"entry\">\n<div class=\"entry-head\">");
        let heading = [job.role.as_deref(), job.company.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(", ");
        write!(out, "<strong>{}</strong>", encode_text(&heading))?;
        let end = if job.is_current {
            Some("Present")
        } else {
            job.end_date.as_deref()
        };
        if let Some(dates) = date_range(job.start_date.as_deref(), end) {
            write!(out, "<span class=\"meta\">{}</span>", encode_text(&dates))?;
        }
        out.push_str("</div>\n");
        if let Some(location) = job.location.as_deref() {
            writeln!(out, "<div class=\"meta\">{}</div>", encode_text(location))?;
        }
        write_list(out, &job.bullets)?;
        out.push_str("</div>\n");
    }
    Ok(())
}

fn write_education(out: &mut String, record: &ResumeRecord) -> Result<(), RenderError> {
    for edu in &record.education {
        out.push_str("<div class=\"entry\">\n<div class=\"entry-head\">");
        let degree = match (edu.degree.as_deref(), edu.field.as_deref()) {
            (Some(d), Some(f)) => format!("{d} in {f}"),
            (Some(d), None) => d.to_string(),
            (None, Some(f)) => f.to_string(),
            (None, None) => String::new(),
        };
        write!(out, "<strong>{}</strong>", encode_text(&degree))?;
        if let Some(dates) = date_range(edu.start_date.as_deref(), edu.end_date.as_deref()) {
            write!(out, "<span class=\"meta\">{}</span>", encode_text(&dates))?;
        }
        out.push_str("</div>\n");
        let place = [edu.institution.as_deref(), edu.location.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(", ");
        if !place.is_empty() {
            writeln!(out, "<div class=\"meta\">{}</div>", encode_text(&place))?;
        }
        if let Some(gpa) = edu.gpa.as_deref() {
            writeln!(out, "<div>GPA: {}</div>", encode_text(gpa))?;
        }
        write_list(out, &edu.honors)?;
        out.push_str("</div>\n");
    }
    Ok(())
}

fn write_projects(out: &mut String, record: &ResumeRecord) -> Result<(), RenderError> {
    for project in &record.projects {
        out.push_str("<div class=\"entry\">\n");
        let title = encode_text(project.title.as_deref().unwrap_or_default()).into_owned();
        match project.link.as_deref().map(str::trim).filter(|l| !l.is_empty()) {
            Some(link) if is_safe_link(link) => writeln!(
                out,
                "<strong><a href=\"{}\">{title}</a></strong>",
                encode_double_quoted_attribute(link)
            )?,
            Some(link) => writeln!(
                out,
                "<strong>{title}</strong> <span class=\"meta\">{}</span>",
                encode_text(link)
            )?,
            None => writeln!(out, "<strong>{title}</strong>")?,
        }
        if let Some(description) = project.description.as_deref() {
            writeln!(out, "<p>{}</p>", encode_text(description))?;
        }
        if !project.technologies.is_empty() {
            writeln!(out, "<p class=\"meta\">{}</p>", join_escaped(&project.technologies))?;
        }
        out.push_str("</div>\n");
    }
    Ok(())
}

fn write_list(out: &mut String, items: &[String]) -> Result<(), RenderError> {
    if items.is_empty() {
        return Ok(());
    }
    out.push_str("<ul>\n");
    for item in items {
        writeln!(out, "<li>{}</li>", encode_text(item))?;
    }
    out.push_str("</ul>\n");
    Ok(())
}

/// Only web and mail links become anchors; anything else is shown as text.
fn is_safe_link(link: &str) -> bool {
    let lower = link.to_ascii_lowercase();
    ["http://", "https://", "mailto:"]
        .iter()
        .any(|scheme| lower.starts_with(scheme))
}

fn date_range(start: Option<&str>, end: Option<&str>) -> Option<String> {
    match (start, end) {
        (Some(s), Some(e)) => Some(format!("{s} - {e}")),
        (Some(s), None) => Some(s.to_string()),
        (None, Some(e)) => Some(e.to_string()),
        (None, None) => None,
    }
}

fn join_escaped(items: &[String]) -> String {
    let refs: Vec<&str> = items.iter().map(String::as_str).collect();
    join_escaped_with(&refs, ", ")
}

fn join_escaped_with(items: &[&str], separator: &str) -> String {
    items
        .iter()
        .map(|s| encode_text(s).into_owned())
        .collect::<Vec<_>>()
        .join(separator)
}
