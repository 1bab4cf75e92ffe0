//! Users domain - read-only mirror of session provider accounts

pub mod models;

pub use models::User;
