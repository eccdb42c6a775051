//! Deterministic, collision-resolving slugs.
//!
//! `slugify` lowercases ASCII letters and digits and collapses every other
//! run of characters into a single hyphen. Collisions are resolved by
//! probing `base-1`, `base-2`, … in order.

use std::convert::Infallible;

/// Maximum slug length, suffix included.
pub const SLUG_MAX: usize = 100;

/// Base used when a name has no ASCII letters or digits at all.
pub const PLACEHOLDER: &str = "tag";

pub fn slugify(name: &str) -> String {
  let mut slug = String::with_capacity(name.len());
  let mut pending_hyphen = false;

  for c in name.chars() {
    if c.is_ascii_alphanumeric() {
      if pending_hyphen && !slug.is_empty() {
        slug.push('-');
      }
      pending_hyphen = false;
      slug.push(c.to_ascii_lowercase());
    } else {
      pending_hyphen = true;
    }
  }

  truncate(&slug, SLUG_MAX).to_owned()
}

/// The first candidate accepted by `is_unique`.
pub fn generate_slug(name: &str, mut is_unique: impl FnMut(&str) -> bool) -> String {
  match try_generate_slug(name, |candidate| Ok::<_, Infallible>(is_unique(candidate))) {
    Ok(slug) => slug,
    Err(never) => match never {},
  }
}

/// Like [`generate_slug`], but the uniqueness probe may fail (e.g. a store
/// lookup); the first error aborts generation.
pub fn try_generate_slug<E>(
  name: &str,
  mut is_unique: impl FnMut(&str) -> Result<bool, E>,
) -> Result<String, E> {
  let mut base = slugify(name);
  if base.is_empty() {
    base = PLACEHOLDER.to_owned();
  }

  if is_unique(&base)? {
    return Ok(base);
  }

  let mut counter: u64 = 1;
  loop {
    let suffix = format!("-{counter}");
    let stem = truncate(&base, SLUG_MAX - suffix.len());
    let candidate = format!("{stem}{suffix}");
    if is_unique(&candidate)? {
      return Ok(candidate);
    }
    counter += 1;
  }
}

/// Cut `slug` to at most `max` bytes without leaving a trailing hyphen.
/// Slugs are pure ASCII, so every byte index is a char boundary.
fn truncate(slug: &str, max: usize) -> &str {
  let cut = if slug.len() > max { &slug[..max] } else { slug };
  cut.trim_end_matches('-')
}

#[cfg(test)]
mod tests {
  use std::collections::HashSet;

  use super::*;

  #[test]
  fn slugify_collapses_separators() {
    assert_eq!(slugify("Python"), "python");
    assert_eq!(slugify("  Rust & WebAssembly!! "), "rust-webassembly");
    assert_eq!(slugify("C++ / C#"), "c-c");
    assert_eq!(slugify("a---b"), "a-b");
    assert_eq!(slugify("!!!"), "");
  }

  #[test]
  fn repeated_names_get_numbered_suffixes() {
    let mut taken = HashSet::new();
    let mut next = |name: &str| {
      let slug = generate_slug(name, |c| !taken.contains(c));
      taken.insert(slug.clone());
      slug
    };

    assert_eq!(next("Python"), "python");
    assert_eq!(next("Python"), "python-1");
    assert_eq!(next("Python"), "python-2");
  }

  #[test]
  fn empty_slug_uses_placeholder() {
    let taken: HashSet<String> = ["tag".to_owned()].into();
    assert_eq!(generate_slug("???", |_| true), "tag");
    assert_eq!(generate_slug("???", |c| !taken.contains(c)), "tag-1");
  }

  #[test]
  fn long_names_stay_within_limit() {
    let name = "x".repeat(150);
    let base = generate_slug(&name, |_| true);
    assert_eq!(base.len(), SLUG_MAX);

    let suffixed = generate_slug(&name, |c| c != base);
    assert_eq!(suffixed.len(), SLUG_MAX);
    assert!(suffixed.ends_with("-1"));
  }

  #[test]
  fn probe_errors_propagate() {
    let result: Result<String, &str> = try_generate_slug("Python", |_| Err("store down"));
    assert_eq!(result, Err("store down"));
  }
}
