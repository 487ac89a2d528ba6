//! HTML rendering of every generated page.
//!
//! Renderers are pure: each takes the shared [`Renderer`] context and
//! immutable content, and returns a complete document.

mod layout;
mod listing;
mod pages;
mod post;
mod toc;

pub use layout::Renderer;
pub use listing::listing_page;
pub use pages::{home_page, not_found_page, standalone_page};
pub use post::post_page;
