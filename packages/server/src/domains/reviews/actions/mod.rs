//! Review actions

mod queries;
mod submit_review;

pub use queries::{review_count, review_tally};
pub use submit_review::{submit_review, ReviewInput, SubmittedReview};
