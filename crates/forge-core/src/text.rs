//! UTF-8–safe string truncation utilities.
//!
//! Rust `&str[..n]` panics when `n` falls inside a multi-byte character.
//! These helpers find the nearest char boundary so truncation is always
//! safe, and [`truncate_at_word`] additionally snaps back to whitespace so
//! rendered context never ends mid-word.

/// Truncate a string to at most `max_bytes` bytes at a char boundary.
///
/// Returns the longest prefix of `s` whose byte length is ≤ `max_bytes`
/// and that does not split a multi-byte character.
#[inline]
#[must_use]
pub fn truncate_str(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }
    // `floor_char_boundary` is nightly-only, so implement it ourselves.
    let mut end = max_bytes;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

/// Truncate a string to at most `max_bytes` bytes without splitting a word.
///
/// Finds the char-boundary cut, then walks back to the last whitespace
/// character so the result never ends in a partial word. If the prefix
/// contains no whitespace at all, falls back to the char-boundary cut
/// (a single oversized token still has to be cut somewhere). Trailing
/// whitespace is trimmed from the result.
#[must_use]
pub fn truncate_at_word(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }
    let prefix = truncate_str(s, max_bytes);
    // The char right after the cut: if it is whitespace, no word was split.
    let split_mid_word = !s[prefix.len()..]
        .chars()
        .next()
        .is_some_and(char::is_whitespace);
    let kept = if split_mid_word {
        match prefix.rfind(char::is_whitespace) {
            Some(idx) => &prefix[..idx],
            None => prefix,
        }
    } else {
        prefix
    };
    kept.trim_end()
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
