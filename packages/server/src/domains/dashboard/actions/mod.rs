//! Dashboard actions - cached, creator-only reads

mod cached_read;
mod overview;

pub use cached_read::cached_read;
pub use overview::{dashboard_overview, DashboardOverview, DashboardStats};
