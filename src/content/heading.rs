//! Heading tree of a document.
//!
//! Headings are collected flat, in document order, while the Markdown is
//! compiled, then nested by level into a tree of [`HeadingNode`]s. The tree
//! is immutable once built.

use serde::Serialize;
use std::iter::Peekable;

/// One table-of-contents entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeadingNode {
    pub title: String,
    /// Anchor fragment, e.g. `#getting-started`. Unique within a document.
    pub url: String,
    /// Sub-headings in document order.
    pub items: Vec<HeadingNode>,
}

impl HeadingNode {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            items: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_items(mut self, items: Vec<HeadingNode>) -> Self {
        self.items = items;
        self
    }

    /// Levels below and including this node (a leaf has depth 1).
    pub fn depth(&self) -> usize {
        1 + self.items.iter().map(Self::depth).max().unwrap_or(0)
    }

    /// Number of nodes in this subtree.
    pub fn count(&self) -> usize {
        1 + self.items.iter().map(Self::count).sum::<usize>()
    }
}

/// A heading as it appears in the source, before nesting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatHeading {
    /// 1 for `#`, 6 for `######`.
    pub level: u8,
    pub title: String,
    /// Anchor id without the leading `#`.
    pub anchor: String,
}

/// Nest document-order headings into a tree.
///
/// The shallowest level present becomes the top level. A heading becomes a
/// child of the nearest preceding heading with a smaller level, so skipped
/// levels (`##` then `####`) still nest directly.
pub fn build_tree(headings: Vec<FlatHeading>) -> Vec<HeadingNode> {
    let Some(top) = headings.iter().map(|h| h.level).min() else {
        return Vec::new();
    };
    nest(&mut headings.into_iter().peekable(), top)
}

fn nest<I>(headings: &mut Peekable<I>, min_level: u8) -> Vec<HeadingNode>
where
    I: Iterator<Item = FlatHeading>,
{
    let mut nodes = Vec::new();
    while let Some(heading) = headings.next_if(|h| h.level >= min_level) {
        let items = nest(headings, heading.level + 1);
        nodes.push(HeadingNode {
            title: heading.title,
            url: format!("#{}", heading.anchor),
            items,
        });
    }
    nodes
}
