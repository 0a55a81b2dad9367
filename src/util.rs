//! Small utility helpers used across modules.

/// Trim surrounding whitespace and case-fold, the form all keyword matching uses.
pub fn normalize_message(s: &str) -> String {
  s.trim().to_lowercase()
}

/// First keyword that occurs anywhere in `haystack` (plain substring search, so
/// "beach" also matches inside "beaches"). Keywords are expected pre-folded.
pub fn find_keyword<'a, I>(haystack: &str, keywords: I) -> Option<&'a str>
where
  I: IntoIterator<Item = &'a String>,
{
  keywords.into_iter().map(String::as_str).find(|k| !k.is_empty() && haystack.contains(k))
}

/// Log-safe truncation for user text.
/// Cuts on a char boundary so multibyte input never panics.
pub fn trunc_for_log(s: &str, max: usize) -> String {
  if s.len() <= max {
    return s.to_string();
  }
  let mut end = max;
  while !s.is_char_boundary(end) { end -= 1; }
  format!("{}… ({} bytes total)", &s[..end], s.len())
}
