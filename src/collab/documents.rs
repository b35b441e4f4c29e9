//! PDF document loading, one document per page

use crate::ui::progress::FileProgress;
use anyhow::Context;
use std::fs;
use std::path::{Path, PathBuf};

/// Text of a single PDF page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
  pub source: PathBuf,
  /// 1-based page number
  pub page: u32,
  pub text: String,
}

/// Everything loaded from the data directory
#[derive(Debug, Clone, Default)]
pub struct LoadedDocuments {
  pub files: usize,
  pub pages: Vec<Page>,
}

/// `*.pdf` files directly inside `dir`, sorted by path
pub fn find_pdfs(dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
  if !dir.is_dir() {
    anyhow::bail!("document directory not found: {}", dir.display());
  }

  let mut pdfs = Vec::new();
  for entry in fs::read_dir(dir).with_context(|| format!("Failed to read {}", dir.display()))? {
    let path = entry?.path();
    let is_pdf = path
      .extension()
      .and_then(|ext| ext.to_str())
      .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));
    if path.is_file() && is_pdf {
      pdfs.push(path);
    }
  }
  pdfs.sort();
  Ok(pdfs)
}

/// Load one PDF. A page whose text cannot be extracted is kept with empty text.
pub fn load_pdf(path: &Path) -> anyhow::Result<Vec<Page>> {
  let doc = lopdf::Document::load(path).with_context(|| format!("Failed to parse PDF {}", path.display()))?;

  let mut pages = Vec::new();
  for page_number in doc.get_pages().keys().copied() {
    let text = match doc.extract_text(&[page_number]) {
      Ok(text) => text,
      Err(err) => {
        tracing::warn!(file = %path.display(), page = page_number, error = %err, "no extractable text on page");
        String::new()
      }
    };
    pages.push(Page {
      source: path.to_path_buf(),
      page: page_number,
      text,
    });
  }

  tracing::debug!(file = %path.display(), pages = pages.len(), "loaded PDF");
  Ok(pages)
}

/// Load every PDF in `dir`
pub fn load_directory(dir: &Path) -> anyhow::Result<LoadedDocuments> {
  let files = find_pdfs(dir)?;
  let mut progress = FileProgress::for_batch(files.len(), format!("Loading {} PDF files", files.len()));

  let mut loaded = LoadedDocuments {
    files: files.len(),
    pages: Vec::new(),
  };
  for file in &files {
    loaded.pages.extend(load_pdf(file)?);
    if let Some(ref mut p) = progress {
      p.inc();
    }
  }

  Ok(loaded)
}
