// Community Review Server - API Core
//
// Communities, membership, contributor requests, posts and the contributor
// review workflow, served as a JSON API over Postgres.
//
// Business logic lives per-domain in domains/*/actions/.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
