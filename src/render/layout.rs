//! HTML document shell shared by every page.

use super::toc::SIDEBAR_SCRIPT;
use crate::{
    config::SiteConfig,
    content::Page,
    seo::HeadMeta,
    theme::AppState,
    utils::{css::STYLESHEET, html::escape_html},
};
use std::fmt::Write;

/// On-demand diagram loader, only included on pages with diagrams.
const DIAGRAM_LOADER: &str = r#"<script type="module">
import mermaid from "https://cdn.jsdelivr.net/npm/mermaid@11/dist/mermaid.esm.min.mjs";
mermaid.initialize({
  startOnLoad: true,
  theme: document.documentElement.classList.contains("dark") ? "dark" : "default",
  securityLevel: "loose",
  fontFamily: "inherit",
});
</script>"#;

/// Applies a theme saved in the browser before first paint.
const THEME_BOOT_SCRIPT: &str = r#"<script>
(function () {
  var saved = localStorage.getItem("isDarkMode");
  if (saved === null) return;
  var dark = JSON.parse(saved);
  document.documentElement.classList.toggle("dark", dark);
  document.documentElement.classList.toggle("light", !dark);
})();
</script>"#;

/// Header theme button: toggles the root class and saves the flag.
const THEME_TOGGLE_SCRIPT: &str = r#"<script>
document.querySelectorAll("[data-theme-toggle]").forEach(function (button) {
  button.addEventListener("click", function () {
    var root = document.documentElement;
    var dark = !root.classList.contains("dark");
    root.classList.toggle("dark", dark);
    root.classList.toggle("light", !dark);
    localStorage.setItem("isDarkMode", JSON.stringify(dark));
  });
});
</script>"#;

/// Optional scripts a page needs.
#[derive(Debug, Clone, Copy, Default)]
pub struct Scripts {
    pub diagrams: bool,
    pub toc_sidebar: bool,
}

/// Shared rendering context: site config, app state and navigation.
#[derive(Debug, Clone)]
pub struct Renderer<'a> {
    pub config: &'a SiteConfig,
    pub state: AppState,
    nav: Vec<(String, String)>,
}

impl<'a> Renderer<'a> {
    pub fn new(config: &'a SiteConfig, state: AppState, pages: &[Page]) -> Self {
        let mut nav = vec![("Blog".to_owned(), "/blog/".to_owned())];
        nav.extend(pages.iter().map(|page| (page.title.clone(), page.url_path())));
        Self { config, state, nav }
    }

    /// Wrap `main` in a complete HTML document.
    pub fn document(&self, head: &HeadMeta, main: &str, scripts: Scripts) -> String {
        let mut html = String::with_capacity(main.len() + 4096);

        let _ = write!(
            html,
            r#"<!DOCTYPE html><html lang="{lang}" class="{class}"><head><meta charset="utf-8"><meta name="viewport" content="width=device-width, initial-scale=1">"#,
            lang = escape_html(&self.config.base.language),
            class = self.state.theme.html_class(),
        );
        html.push_str(&head.render());
        let _ = write!(html, r#"<link rel="stylesheet" href="/{STYLESHEET}">"#);
        html.push_str(THEME_BOOT_SCRIPT);
        html.push_str("</head><body>");

        html.push_str(&self.header());
        html.push_str("<main>");
        html.push_str(main);
        html.push_str("</main>");
        html.push_str(&self.footer());

        html.push_str(THEME_TOGGLE_SCRIPT);
        if scripts.toc_sidebar {
            html.push_str(SIDEBAR_SCRIPT);
        }
        if scripts.diagrams {
            html.push_str(DIAGRAM_LOADER);
        }
        html.push_str("</body></html>\n");
        html
    }

    fn header(&self) -> String {
        let mut html = format!(
            r#"<header class="site-header"><a class="site-name" href="/">{}</a><nav>"#,
            escape_html(&self.config.base.title)
        );
        for (label, href) in &self.nav {
            let _ = write!(
                html,
                r#"<a href="{}">{}</a>"#,
                escape_html(href),
                escape_html(label)
            );
        }
        let pressed = self.state.theme.is_dark();
        let _ = write!(
            html,
            concat!(
                r#"<button type="button" class="theme-toggle" data-theme-toggle aria-pressed="{}" aria-label="Toggle dark mode">"#,
                r#"<span class="icon-dark">🌙</span><span class="icon-light">🔆</span></button>"#,
            ),
            pressed
        );
        html.push_str("</nav></header>");
        html
    }

    fn footer(&self) -> String {
        format!(
            r#"<footer class="site-footer">© {}</footer>"#,
            escape_html(&self.config.base.author)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::Theme;
    use std::path::PathBuf;

    fn config() -> SiteConfig {
        let mut config = SiteConfig::default();
        config.base.title = "Alice".into();
        config.base.url = Some("https://alice.dev".into());
        config
    }

    fn about() -> Page {
        Page {
            name: "about".into(),
            title: "About".into(),
            description: String::new(),
            date: None,
            toc: Vec::new(),
            body: String::new(),
            has_diagram: false,
            source: PathBuf::from("about.md"),
        }
    }

    #[test]
    fn test_theme_class_on_root() {
        let config = config();
        let head = HeadMeta::page(&config, None, "", "/");

        let light = Renderer::new(&config, AppState::new(Theme::Light), &[]).document(&head, "", Scripts::default());
        assert!(light.contains(r#"<html lang="en-US" class="light">"#));

        let dark = Renderer::new(&config, AppState::new(Theme::Dark), &[]).document(&head, "", Scripts::default());
        assert!(dark.contains(r#"<html lang="en-US" class="dark">"#));
        assert!(dark.contains(r#"aria-pressed="true""#));
    }

    #[test]
    fn test_diagram_loader_only_when_needed() {
        let config = config();
        let head = HeadMeta::page(&config, None, "", "/");
        let renderer = Renderer::new(&config, AppState::default(), &[]);

        let plain = renderer.document(&head, "<p>x</p>", Scripts::default());
        assert!(!plain.contains("mermaid"));

        let with = renderer.document(
            &head,
            "<p>x</p>",
            Scripts {
                diagrams: true,
                ..Scripts::default()
            },
        );
        assert!(with.contains("mermaid.initialize"));
    }

    #[test]
    fn test_navigation_includes_pages() {
        let config = config();
        let head = HeadMeta::page(&config, None, "", "/");
        let html = Renderer::new(&config, AppState::default(), &[about()]).document(&head, "", Scripts::default());

        assert!(html.contains(r#"<a href="/blog/">Blog</a>"#));
        assert!(html.contains(r#"<a href="/about/">About</a>"#));
        assert!(html.contains(r#"<link rel="stylesheet" href="/style.css">"#));
    }
}
