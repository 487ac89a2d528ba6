//! URL slugification.
//!
//! Converts heading text and tag names to URL-safe fragments and path segments.

use deunicode::deunicode;
use std::collections::HashMap;

/// Fallback when text has no slug-able characters at all.
const EMPTY_SLUG: &str = "section";

/// Lowercase ASCII slug: "Hello, Wörld!" → "hello-world".
///
/// Non-ASCII text is transliterated first, so "Tiếng Việt" → "tieng-viet".
pub fn slugify(text: &str) -> String {
    let ascii = deunicode(text);
    let mut slug = String::with_capacity(ascii.len());
    let mut pending_dash = false;

    for c in ascii.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }

    slug
}

/// Hands out unique anchor ids within one document.
///
/// Repeated headings get a numeric suffix: `intro`, `intro-1`, `intro-2`.
#[derive(Debug, Default)]
pub struct AnchorSlugger {
    seen: HashMap<String, usize>,
}

impl AnchorSlugger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Slug for `text`, unique among all ids issued so far.
    pub fn slug(&mut self, text: &str) -> String {
        let base = slugify(text);
        let base = if base.is_empty() { EMPTY_SLUG.to_owned() } else { base };
        self.claim(base)
    }

    /// Reserve an explicit id (e.g. `{#custom}`), suffixing it if taken.
    pub fn claim(&mut self, base: String) -> String {
        let mut candidate = base.clone();
        while self.seen.contains_key(&candidate) {
            let count = self.seen.entry(base.clone()).or_insert(0);
            *count += 1;
            candidate = format!("{base}-{count}");
        }
        self.seen.insert(candidate.clone(), 0);
        candidate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify("Hello World"), "hello-world");
        assert_eq!(slugify("Hello, World!"), "hello-world");
    }

    #[test]
    fn test_slugify_collapses_separators() {
        assert_eq!(slugify("  a -- b__c  "), "a-b-c");
    }

    #[test]
    fn test_slugify_transliterates() {
        assert_eq!(slugify("Tiếng Việt"), "tieng-viet");
        assert_eq!(slugify("Café Crème"), "cafe-creme");
    }

    #[test]
    fn test_slugify_keeps_digits() {
        assert_eq!(slugify("Part 2: Rust 1.80"), "part-2-rust-1-80");
    }

    #[test]
    fn test_slugify_empty() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("?!"), "");
    }

    #[test]
    fn test_anchor_slugger_dedupes() {
        let mut slugger = AnchorSlugger::new();
        assert_eq!(slugger.slug("Intro"), "intro");
        assert_eq!(slugger.slug("Intro"), "intro-1");
        assert_eq!(slugger.slug("intro"), "intro-2");
        assert_eq!(slugger.slug("Setup"), "setup");
    }

    #[test]
    fn test_anchor_slugger_suffix_collision() {
        let mut slugger = AnchorSlugger::new();
        assert_eq!(slugger.slug("Intro 1"), "intro-1");
        assert_eq!(slugger.slug("Intro"), "intro");
        // "intro-1" is taken by the first heading
        assert_eq!(slugger.slug("Intro"), "intro-2");
    }

    #[test]
    fn test_anchor_slugger_empty_text() {
        let mut slugger = AnchorSlugger::new();
        assert_eq!(slugger.slug("???"), "section");
        assert_eq!(slugger.slug(""), "section-1");
    }

    #[test]
    fn test_claim_explicit_id() {
        let mut slugger = AnchorSlugger::new();
        assert_eq!(slugger.claim("custom".into()), "custom");
        assert_eq!(slugger.slug("Custom"), "custom-1");
    }
}
