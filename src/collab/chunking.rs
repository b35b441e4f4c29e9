//! Recursive character text splitting
//!
//! Text is split on the coarsest separator present (`"\n\n"`, then `"\n"`, then
//! `" "`, then individual characters). Pieces still longer than the chunk size are
//! split again with the finer separators; short pieces are merged back up to the
//! chunk size, carrying `chunk_overlap` characters into the next chunk.
//! Lengths are counted in characters.

use super::documents::Page;
use std::collections::VecDeque;
use std::path::PathBuf;

const DEFAULT_SEPARATORS: [&str; 4] = ["\n\n", "\n", " ", ""];

/// A piece of page text sized for embedding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
  pub source: PathBuf,
  pub page: u32,
  pub text: String,
}

#[derive(Debug, Clone)]
pub struct TextSplitter {
  chunk_size: usize,
  chunk_overlap: usize,
  separators: Vec<&'static str>,
}

impl TextSplitter {
  pub fn new(chunk_size: usize, chunk_overlap: usize) -> anyhow::Result<Self> {
    if chunk_size == 0 {
      anyhow::bail!("chunk size must be greater than 0");
    }
    if chunk_overlap >= chunk_size {
      anyhow::bail!(
        "chunk overlap ({}) must be smaller than chunk size ({})",
        chunk_overlap,
        chunk_size
      );
    }
    Ok(Self {
      chunk_size,
      chunk_overlap,
      separators: DEFAULT_SEPARATORS.to_vec(),
    })
  }

  /// Split every page, keeping its source and page number on each chunk
  pub fn split_pages(&self, pages: &[Page]) -> Vec<Chunk> {
    pages
      .iter()
      .flat_map(|page| {
        self.split_text(&page.text).into_iter().map(|text| Chunk {
          source: page.source.clone(),
          page: page.page,
          text,
        })
      })
      .collect()
  }

  pub fn split_text(&self, text: &str) -> Vec<String> {
    self.split_recursive(text, &self.separators)
  }

  fn split_recursive(&self, text: &str, separators: &[&'static str]) -> Vec<String> {
    let mut separator = separators.last().copied().unwrap_or("");
    let mut finer: &[&'static str] = &[];
    for (i, candidate) in separators.iter().copied().enumerate() {
      if candidate.is_empty() {
        separator = candidate;
        break;
      }
      if text.contains(candidate) {
        separator = candidate;
        finer = &separators[i + 1..];
        break;
      }
    }

    let splits: Vec<&str> = if separator.is_empty() {
      text.char_indices().map(|(i, c)| &text[i..i + c.len_utf8()]).collect()
    } else {
      text.split(separator).filter(|s| !s.is_empty()).collect()
    };

    let mut chunks = Vec::new();
    let mut fitting: Vec<&str> = Vec::new();
    for piece in splits {
      if char_len(piece) < self.chunk_size {
        fitting.push(piece);
        continue;
      }
      if !fitting.is_empty() {
        chunks.extend(self.merge(&fitting, separator));
        fitting.clear();
      }
      if finer.is_empty() {
        chunks.extend(trimmed(piece));
      } else {
        chunks.extend(self.split_recursive(piece, finer));
      }
    }
    if !fitting.is_empty() {
      chunks.extend(self.merge(&fitting, separator));
    }
    chunks
  }

  fn merge(&self, pieces: &[&str], separator: &str) -> Vec<String> {
    let sep_len = char_len(separator);
    let mut merged = Vec::new();
    let mut window: VecDeque<&str> = VecDeque::new();
    let mut total = 0usize;

    for &piece in pieces {
      let len = char_len(piece);
      let joiner = if window.is_empty() { 0 } else { sep_len };

      if total + len + joiner > self.chunk_size && !window.is_empty() {
        if let Some(chunk) = join(&window, separator) {
          merged.push(chunk);
        }
        // Drop from the front until only the overlap remains and the next piece fits.
        loop {
          let joiner = if window.is_empty() { 0 } else { sep_len };
          let too_big = total > 0 && total + len + joiner > self.chunk_size;
          if total <= self.chunk_overlap && !too_big {
            break;
          }
          let Some(front) = window.pop_front() else {
            break;
          };
          let joined = if window.is_empty() { 0 } else { sep_len };
          total -= char_len(front) + joined;
        }
      }

      window.push_back(piece);
      let joined = if window.len() > 1 { sep_len } else { 0 };
      total += len + joined;
    }

    if let Some(chunk) = join(&window, separator) {
      merged.push(chunk);
    }
    merged
  }
}

fn char_len(s: &str) -> usize {
  s.chars().count()
}

fn join(window: &VecDeque<&str>, separator: &str) -> Option<String> {
  trimmed(&window.iter().copied().collect::<Vec<_>>().join(separator))
}

/// Trimmed text, or `None` when nothing but whitespace is left
fn trimmed(text: &str) -> Option<String> {
  let text = text.trim();
  (!text.is_empty()).then(|| text.to_string())
}
