//! Dashboard domain - cached views of a community for its creator
//!
//! Reads go through [`cache::DashboardCache`]; every mutating action in the
//! other domains invalidates the keys it affects (see [`cache::Mutation`]).

pub mod actions;
pub mod cache;

pub use cache::{CacheKey, DashboardCache, DashboardResource, Mutation};
