//! Markdown compilation.
//!
//! One pass over the `pulldown-cmark` event stream produces the body HTML,
//! the heading tree and whether the body needs the diagram loader.

use super::heading::{FlatHeading, HeadingNode, build_tree};
use crate::utils::slug::AnchorSlugger;
use pulldown_cmark::{CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd, html};

/// Fenced code blocks with this info string are rendered as diagrams.
const DIAGRAM_LANG: &str = "mermaid";

/// Output of [`compile`].
#[derive(Debug, Clone, Default)]
pub struct Compiled {
    pub html: String,
    pub toc: Vec<HeadingNode>,
    pub has_diagram: bool,
}

fn options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_HEADING_ATTRIBUTES
}

/// Compile a Markdown body to HTML.
pub fn compile(source: &str) -> Compiled {
    let mut events: Vec<Event<'_>> = Parser::new_ext(source, options()).collect();

    let headings = assign_heading_ids(&mut events);
    let has_diagram = rewrite_diagrams(&mut events);

    let mut body = String::with_capacity(source.len() * 3 / 2);
    html::push_html(&mut body, events.into_iter());

    Compiled {
        html: body,
        toc: build_tree(headings),
        has_diagram,
    }
}

/// Give every heading a unique id and collect them in document order.
///
/// Explicit ids (`## Title {#custom}`) are kept unless already taken.
fn assign_heading_ids(events: &mut [Event<'_>]) -> Vec<FlatHeading> {
    let mut slugger = AnchorSlugger::new();
    let mut headings = Vec::new();

    for start in 0..events.len() {
        let (level, explicit) = match &events[start] {
            Event::Start(Tag::Heading { level, id, .. }) => {
                (*level as u8, id.as_ref().map(|id| id.to_string()))
            }
            _ => continue,
        };

        let title = heading_text(&events[start + 1..]);
        let anchor = match explicit {
            Some(id) => slugger.claim(id),
            None => slugger.slug(&title),
        };

        if let Event::Start(Tag::Heading { id, .. }) = &mut events[start] {
            *id = Some(CowStr::from(anchor.clone()));
        }
        headings.push(FlatHeading {
            level,
            title,
            anchor,
        });
    }

    headings
}

/// Plain text of a heading, up to its end tag.
fn heading_text(events: &[Event<'_>]) -> String {
    let mut text = String::new();
    for event in events {
        match event {
            Event::End(TagEnd::Heading(_)) => break,
            Event::Text(t) | Event::Code(t) => text.push_str(t),
            Event::SoftBreak | Event::HardBreak => text.push(' '),
            _ => {}
        }
    }
    text.trim().to_owned()
}

/// Replace diagram code blocks with `<pre class="mermaid">` containers.
///
/// Returns whether any diagram was found.
fn rewrite_diagrams(events: &mut [Event<'_>]) -> bool {
    let mut found = false;
    let mut inside = false;

    for event in events.iter_mut() {
        let replacement = match &*event {
            Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(lang)))
                if lang.split_whitespace().next() == Some(DIAGRAM_LANG) =>
            {
                inside = true;
                found = true;
                r#"<pre class="mermaid">"#
            }
            Event::End(TagEnd::CodeBlock) if inside => {
                inside = false;
                "</pre>\n"
            }
            _ => continue,
        };
        *event = Event::Html(CowStr::Borrowed(replacement));
    }

    found
}
