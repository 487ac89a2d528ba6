pub mod css;
pub mod date;
pub mod html;
pub mod minify;
pub mod slug;
