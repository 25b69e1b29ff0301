//! PDF extraction backed by the `pdf-extract` crate.

use crate::DocumentExtractor;
use async_trait::async_trait;
use doctalk_core::{DoctalkError, DoctalkResult, Fragment};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Extracts text from PDF documents.
///
/// Walks the staging directory recursively, keeps `.pdf` files (sorted by
/// path so output order is stable) and splits each document's text into one
/// fragment per page on form-feed boundaries.
pub struct PdfTextExtractor;

impl PdfTextExtractor {
    /// Creates a new PDF extractor.
    pub fn new() -> Self {
        Self
    }
}

impl Default for PdfTextExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentExtractor for PdfTextExtractor {
    async fn extract(&self, dir: &Path) -> DoctalkResult<Vec<Fragment>> {
        let dir = dir.to_path_buf();

        // Run the parse in a blocking task to avoid blocking the async runtime
        tokio::task::spawn_blocking(move || extract_directory(&dir))
            .await
            .map_err(|e| DoctalkError::Extraction(format!("extraction task panicked: {e}")))?
    }
}

fn extract_directory(dir: &Path) -> DoctalkResult<Vec<Fragment>> {
    let files = collect_pdfs(dir).map_err(|e| {
        DoctalkError::Extraction(format!(
            "cannot read staging directory {}: {e}",
            dir.display()
        ))
    })?;

    if files.is_empty() {
        return Err(DoctalkError::Extraction(format!(
            "no .pdf documents found under {}",
            dir.display()
        )));
    }

    let mut fragments = Vec::new();
    for path in &files {
        let source = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("document.pdf")
            .to_string();

        let text = pdf_extract::extract_text(path).map_err(|e| {
            DoctalkError::Extraction(format!("failed to extract text from {source}: {e}"))
        })?;

        let pages = split_pages(&text);
        if pages.is_empty() {
            warn!(file = %source, "document has no extractable text");
        }
        for page in pages {
            let index = fragments.len();
            fragments.push(Fragment::new(page, source.clone(), index));
        }
    }

    debug!(
        files = files.len(),
        fragments = fragments.len(),
        "pdf extraction complete"
    );
    Ok(fragments)
}

/// Collects every `.pdf` file under `dir`, recursing into subdirectories.
fn collect_pdfs(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut found = Vec::new();
    let mut stack = vec![dir.to_path_buf()];

    while let Some(current) = stack.pop() {
        for entry in std::fs::read_dir(&current)? {
            let path = entry?.path();
            if path.is_dir() {
                stack.push(path);
            } else if has_pdf_extension(&path) {
                found.push(path);
            }
        }
    }

    found.sort();
    Ok(found)
}

fn has_pdf_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("pdf"))
}

/// Splits extracted text into per-page fragments on form-feed boundaries.
/// Blank pages (common in image-only PDFs) are dropped.
fn split_pages(text: &str) -> Vec<String> {
    text.split('\x0C')
        .map(str::trim)
        .filter(|page| !page.is_empty())
        .map(str::to_string)
        .collect()
}
