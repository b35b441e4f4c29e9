//! Small text helpers for one-line check summaries

/// First `max_chars` characters of `text` on a single line, with "..." when cut
pub fn preview(text: &str, max_chars: usize) -> String {
  let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
  if flat.chars().count() <= max_chars {
    return flat;
  }
  let head: String = flat.chars().take(max_chars).collect();
  format!("{}...", head.trim_end())
}

/// Render names the way the checks print them: `[a, b]`
pub fn bracket_list<S: AsRef<str>>(items: &[S]) -> String {
  let joined = items.iter().map(|s| s.as_ref()).collect::<Vec<_>>().join(", ");
  format!("[{}]", joined)
}

/// `1 page`, `3 pages`
pub fn plural(count: usize, noun: &str) -> String {
  if count == 1 {
    format!("{} {}", count, noun)
  } else {
    format!("{} {}s", count, noun)
  }
}
