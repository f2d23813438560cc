//! File layout of a processed document and atomic JSON persistence.
//!
//! Everything derived from an upload is co-located with it and shares its stem:
//! `resume.pdf` → `resume.parsed.json` → `resume.parsed.layout.json`,
//! `resume.parsed.html`, `resume.parsed.pdf`.

use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use uuid::Uuid;

/// Stem given to every stored upload inside its document directory.
pub const UPLOAD_STEM: &str = "resume";

pub fn parsed_record_path(source: &Path) -> PathBuf {
    source.with_extension("parsed.json")
}

pub fn layout_cache_path(record: &Path) -> PathBuf {
    record.with_extension("layout.json")
}

pub fn rendered_html_path(record: &Path) -> PathBuf {
    record.with_extension("html")
}

pub fn rendered_pdf_path(record: &Path) -> PathBuf {
    record.with_extension("pdf")
}

/// Writes `bytes` to `path` via a temp file in the same directory and an
/// atomic rename, so readers never observe a partial file.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Pretty-printed UTF-8 JSON; non-ASCII characters are written literally.
pub fn to_pretty_json<T: Serialize>(value: &T) -> serde_json::Result<String> {
    serde_json::to_string_pretty(value)
}

/// Directory and file names for one uploaded document.
#[derive(Debug, Clone)]
pub struct DocumentPaths {
    pub dir: PathBuf,
}

impl DocumentPaths {
    pub fn new(workspace: &Path, id: Uuid) -> Self {
        Self {
            dir: workspace.join(id.to_string()),
        }
    }

    /// Upload path for a given lowercase extension (without dot).
    pub fn source(&self, extension: &str) -> PathBuf {
        self.dir.join(format!("{UPLOAD_STEM}.{extension}"))
    }

    pub fn record(&self) -> PathBuf {
        self.dir.join(format!("{UPLOAD_STEM}.parsed.json"))
    }

    pub fn html(&self) -> PathBuf {
        rendered_html_path(&self.record())
    }

    pub fn pdf(&self) -> PathBuf {
        rendered_pdf_path(&self.record())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derived_paths_share_the_source_stem() {
        let source = Path::new("/tmp/docs/cv.pdf");
        let record = parsed_record_path(source);
        assert_eq!(record, Path::new("/tmp/docs/cv.parsed.json"));
        assert_eq!(
            layout_cache_path(&record),
            Path::new("/tmp/docs/cv.parsed.layout.json")
        );
        assert_eq!(rendered_html_path(&record), Path::new("/tmp/docs/cv.parsed.html"));
        assert_eq!(rendered_pdf_path(&record), Path::new("/tmp/docs/cv.parsed.pdf"));
    }

    #[test]
    fn test_document_paths_agree_with_derivation() {
        let id = Uuid::new_v4();
        let paths = DocumentPaths::new(Path::new("/srv/work"), id);
        let source = paths.source("docx");
        assert_eq!(source, Path::new("/srv/work").join(id.to_string()).join("resume.docx"));
        assert_eq!(parsed_record_path(&source), paths.record());
        assert_eq!(rendered_pdf_path(&paths.record()), paths.pdf());
    }

    #[test]
    fn test_write_atomic_replaces_existing_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plan.json");
        write_atomic(&path, b"first").unwrap();
        write_atomic(&path, b"second").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "second");
        // No stray temp files left behind.
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }
}
