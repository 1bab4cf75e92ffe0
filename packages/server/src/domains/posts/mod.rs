//! Posts domain - community posts and their review status

pub mod actions;
pub mod models;

pub use models::{Post, PostStatus, PostWithAuthor};
