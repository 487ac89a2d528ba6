//! Post listing: filtering, pagination and grouping by year.

mod routes;
mod state;
mod view;

pub use routes::ListingRoutes;
pub use state::{ListingState, Pagination};
pub use view::{ListingView, YearGroup, compute_view, visible_posts};
