//! Canonical forms of free-text names, used for storage and for uniqueness
//! comparisons. Case folding is ASCII-only.

/// Trim surrounding whitespace.
pub fn normalize(raw: &str) -> String { raw.trim().to_owned() }

/// Storage form of a category name: trimmed, each whitespace-separated word
/// title-cased, inner whitespace runs collapsed to one space.
pub fn normalize_category_name(raw: &str) -> String {
  raw
    .split_whitespace()
    .map(title_case_word)
    .collect::<Vec<_>>()
    .join(" ")
}

/// Comparison key for a category name. Two names collide iff their keys are
/// equal.
pub fn category_name_key(raw: &str) -> String {
  normalize_category_name(raw).to_ascii_lowercase()
}

/// Tag names keep their case and are compared exactly; only surrounding
/// whitespace is removed.
pub fn normalize_tag_name(raw: &str) -> String { normalize(raw) }

fn title_case_word(word: &str) -> String {
  let mut chars = word.chars();
  match chars.next() {
    Some(first) => {
      let mut out = String::with_capacity(word.len());
      out.push(first.to_ascii_uppercase());
      out.extend(chars.map(|c| c.to_ascii_lowercase()));
      out
    }
    None => String::new(),
  }
}
