//! Post actions

mod create_post;
mod queries;

pub use create_post::{create_post, NewPost};
pub use queries::{list_posts, review_queue};
