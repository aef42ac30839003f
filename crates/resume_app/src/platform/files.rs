use std::fs;
use std::path::Path;

use anyhow::Context;
use resume_core::SelectedFile;

/// Content type a file picker would declare for `path`, judged by extension alone.
pub fn declared_content_type(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("pdf") => "application/pdf",
        Some("doc") => "application/msword",
        Some("docx") => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        Some("txt") => "text/plain",
        Some("rtf") => "application/rtf",
        _ => "application/octet-stream",
    }
}

pub fn load_selected_file(path: &Path) -> anyhow::Result<SelectedFile> {
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    Ok(SelectedFile::new(name, declared_content_type(path), bytes))
}
