//! Minification of generated output.
//!
//! HTML goes through `minify_html`; XML (the sitemap) only loses the
//! indentation and blank lines that the generators emit for readability.

use std::borrow::Cow;

/// Kind of generated file, decides how it is minified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputKind {
    Html,
    Xml,
    /// Written as-is (stylesheets, JSON).
    Raw,
}

/// Minify `content` if `enabled`, borrowing when nothing changes.
pub fn minify(content: &[u8], kind: OutputKind, enabled: bool) -> Cow<'_, [u8]> {
    match (enabled, kind) {
        (false, _) | (true, OutputKind::Raw) => Cow::Borrowed(content),
        (true, OutputKind::Html) => Cow::Owned(minify_html_bytes(content)),
        (true, OutputKind::Xml) => Cow::Owned(minify_xml_bytes(content)),
    }
}

fn minify_html_bytes(html: &[u8]) -> Vec<u8> {
    let mut cfg = minify_html::Cfg::new();
    cfg.keep_closing_tags = true;
    cfg.keep_html_and_head_opening_tags = true;
    cfg.keep_comments = false;
    cfg.minify_css = true;
    cfg.minify_js = true;
    minify_html::minify(html, &cfg)
}

fn minify_xml_bytes(xml: &[u8]) -> Vec<u8> {
    String::from_utf8_lossy(xml)
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<String>()
        .into_bytes()
}
