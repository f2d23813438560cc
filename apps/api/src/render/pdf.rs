//! HTML → PDF export through an external converter.
//!
//! The converter is configured as a command line (`PDF_EXPORT_COMMAND`) and is
//! invoked as `<command...> <in.html> <out.pdf>`.

use std::path::Path;
use std::process::Command;

use tracing::info;

use super::RenderError;

/// Converts `html_path` into `pdf_path`.
pub async fn export_pdf(
    html_path: &Path,
    pdf_path: &Path,
    command: Option<&str>,
) -> Result<(), RenderError> {
    let command = command
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .ok_or_else(|| RenderError::PdfExportUnavailable("no converter configured".to_string()))?
        .to_string();

    let input = html_path.to_path_buf();
    let output = pdf_path.to_path_buf();

    tokio::task::spawn_blocking(move || run_converter(&command, &input, &output))
        .await
        .map_err(std::io::Error::other)??;

    info!("PDF exported to {}", pdf_path.display());
    Ok(())
}

fn run_converter(command: &str, input: &Path, output: &Path) -> Result<(), RenderError> {
    let mut parts = command.split_whitespace();
    let program = parts
        .next()
        .ok_or_else(|| RenderError::PdfExportUnavailable("empty converter command".to_string()))?;

    // A PDF from an earlier export must not pass for this run's output.
    match std::fs::remove_file(output) {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => return Err(e.into()),
    }

    let result = Command::new(program)
        .args(parts)
        .arg(input)
        .arg(output)
        .output();

    let out = match result {
        Ok(out) => out,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(RenderError::PdfExportUnavailable(format!(
                "converter '{program}' not found"
            )));
        }
        Err(e) => return Err(e.into()),
    };

    if !out.status.success() {
        let stderr = String::from_utf8_lossy(&out.stderr);
        return Err(RenderError::PdfExportFailed(format!(
            "'{program}' exited with {}: {}",
            out.status,
            stderr.trim()
        )));
    }
    if !output.exists() {
        return Err(RenderError::PdfExportFailed(format!(
            "'{program}' did not produce {}",
            output.display()
        )));
    }
    Ok(())
}
