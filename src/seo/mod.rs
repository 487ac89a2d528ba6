//! Search engine metadata: sitemap, head tags and structured data.

mod meta;
mod sitemap;
mod structured;

pub use meta::HeadMeta;
pub use sitemap::build_sitemap;
