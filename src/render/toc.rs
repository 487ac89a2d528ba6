//! Table of contents rendering.
//!
//! The heading tree is rendered as nested `<ul>` lists. Only the first
//! levels are rendered; deeper headings stay in the tree but never reach
//! the markup.

use crate::{content::HeadingNode, utils::html::escape_html};
use std::fmt::Write;

/// Lists are rendered while `level < TOC_DEPTH_LIMIT`; levels start at 1.
pub const TOC_DEPTH_LIMIT: usize = 3;

const TOC_HEADING: &str = "On This Page";
const HIDE_LABEL: &str = "Hide table of contents";
const SHOW_LABEL: &str = "Show table of contents";

/// Render `nodes` at `level` as a nested list.
///
/// Returns an empty string when there is nothing to show at this level.
pub fn render_tree(nodes: &[HeadingNode], level: usize) -> String {
    if nodes.is_empty() || level >= TOC_DEPTH_LIMIT {
        return String::new();
    }

    let list_class = if level == 1 { "toc-list" } else { "toc-list toc-nested" };
    let link_class = if level == 1 { "toc-link toc-link-top" } else { "toc-link" };

    let mut html = format!(r#"<ul class="{list_class}">"#);
    for node in nodes {
        let _ = write!(
            html,
            r#"<li><a class="{link_class}" href="{}">{}</a>{}</li>"#,
            escape_html(&node.url),
            escape_html(&node.title),
            render_tree(&node.items, level + 1),
        );
    }
    html.push_str("</ul>");
    html
}

/// Heading plus list, or `None` for an empty tree.
fn table_of_contents(toc: &[HeadingNode]) -> Option<String> {
    if toc.is_empty() {
        return None;
    }
    Some(format!(
        r#"<div class="toc"><p class="toc-title">{TOC_HEADING}</p>{}</div>"#,
        render_tree(toc, 1)
    ))
}

/// Inline table of contents shown before the article body.
pub fn inline(toc: &[HeadingNode]) -> Option<String> {
    let body = table_of_contents(toc)?;
    Some(format!(r#"<nav class="toc-inline" aria-label="Table of contents">{body}</nav>"#))
}

/// Persistent side panel state. Open by default, never saved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TocPanel {
    pub open: bool,
}

impl Default for TocPanel {
    fn default() -> Self {
        Self { open: true }
    }
}

impl TocPanel {
    #[must_use]
    pub const fn toggle(self) -> Self {
        Self { open: !self.open }
    }

    /// Accessible label of the toggle button in this state.
    pub const fn toggle_label(self) -> &'static str {
        if self.open { HIDE_LABEL } else { SHOW_LABEL }
    }

    /// Side panel markup, or `None` for an empty tree.
    ///
    /// A closed panel keeps its list in the markup, hidden and narrowed.
    pub fn sidebar(self, toc: &[HeadingNode]) -> Option<String> {
        let body = table_of_contents(toc)?;
        let (aside_class, hidden) = if self.open {
            ("toc-sidebar", "false")
        } else {
            ("toc-sidebar is-collapsed", "true")
        };

        Some(format!(
            concat!(
                r#"<aside class="{aside}" data-toc-sidebar>"#,
                r#"<button type="button" class="toc-toggle" aria-expanded="{open}" aria-label="{label}" "#,
                r#"data-hide-label="{hide}" data-show-label="{show}">"#,
                r#"<span class="toc-chevron" aria-hidden="true"></span></button>"#,
                r#"<div class="toc-panel" aria-hidden="{hidden}">{body}</div>"#,
                r#"</aside>"#,
            ),
            aside = aside_class,
            open = self.open,
            label = self.toggle_label(),
            hide = HIDE_LABEL,
            show = SHOW_LABEL,
            hidden = hidden,
            body = body,
        ))
    }
}

/// Client-side toggle for [`TocPanel::sidebar`], mirroring [`TocPanel::toggle`].
pub const SIDEBAR_SCRIPT: &str = r#"<script>
document.querySelectorAll("[data-toc-sidebar]").forEach(function (aside) {
  var button = aside.querySelector(".toc-toggle");
  var panel = aside.querySelector(".toc-panel");
  button.addEventListener("click", function () {
    var open = aside.classList.toggle("is-collapsed") === false;
    button.setAttribute("aria-expanded", String(open));
    button.setAttribute("aria-label", open ? button.dataset.hideLabel : button.dataset.showLabel);
    panel.setAttribute("aria-hidden", String(!open));
  });
});
</script>"#;

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> Vec<HeadingNode> {
        vec![
            HeadingNode::new("A", "#a").with_items(vec![
                HeadingNode::new("A1", "#a1").with_items(vec![HeadingNode::new("A1a", "#a1a")]),
            ]),
            HeadingNode::new("B", "#b"),
        ]
    }

    #[test]
    fn test_depth_cutoff() {
        let html = render_tree(&sample_tree(), 1);

        assert!(html.contains(">A</a>"));
        assert!(html.contains(">A1</a>"));
        assert!(html.contains(">B</a>"));
        assert!(!html.contains("A1a"));
        assert_eq!(html.matches("<ul").count(), 2);
    }

    #[test]
    fn test_level_classes() {
        let html = render_tree(&sample_tree(), 1);

        assert!(html.contains(r##"<a class="toc-link toc-link-top" href="#a">A</a>"##));
        assert!(html.contains(r##"<a class="toc-link" href="#a1">A1</a>"##));
        assert!(html.contains(r#"<ul class="toc-list toc-nested">"#));
    }

    #[test]
    fn test_base_cases() {
        assert_eq!(render_tree(&[], 1), "");
        assert_eq!(render_tree(&sample_tree(), TOC_DEPTH_LIMIT), "");
    }

    #[test]
    fn test_empty_renders_nothing() {
        assert!(inline(&[]).is_none());
        assert!(TocPanel::default().sidebar(&[]).is_none());
        assert!(TocPanel::default().toggle().sidebar(&[]).is_none());
    }

    #[test]
    fn test_escapes_titles() {
        let html = render_tree(&[HeadingNode::new("<T> & U", "#t")], 1);
        assert!(html.contains("&lt;T&gt; &amp; U"));
    }

    #[test]
    fn test_panel_toggle() {
        let panel = TocPanel::default();
        assert!(panel.open);
        assert_eq!(panel.toggle_label(), "Hide table of contents");

        let closed = panel.toggle();
        assert!(!closed.open);
        assert_eq!(closed.toggle_label(), "Show table of contents");
        assert_eq!(closed.toggle(), panel);
    }

    #[test]
    fn test_closed_sidebar_keeps_content() {
        let html = TocPanel { open: false }.sidebar(&sample_tree()).unwrap();

        assert!(html.contains("toc-sidebar is-collapsed"));
        assert!(html.contains(r#"<div class="toc-panel" aria-hidden="true">"#));
        assert!(html.contains(">A1</a>"));
    }

    #[test]
    fn test_inline_has_no_toggle() {
        let html = inline(&sample_tree()).unwrap();

        assert!(html.contains("On This Page"));
        assert!(!html.contains("toc-toggle"));
    }
}
