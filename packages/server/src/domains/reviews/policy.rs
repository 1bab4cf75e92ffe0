//! Turning a running tally into a publication decision.

use super::tally::ReviewTally;
use crate::domains::posts::models::PostStatus;

/// Decides when a post under review is finished.
///
/// Returns the final status, or `None` while the post should stay in review.
pub trait FinalizationPolicy: Send + Sync {
    fn decide(&self, tally: &ReviewTally) -> Option<PostStatus>;
}

/// Strict majority of the eligible voters.
///
/// The caller passes a tally whose `contributors` counts only those who may
/// vote (see [`ReviewTally::excluding_author`]). Published once approvals
/// exceed half of them; rejected once rejections reach half, so a tie
/// rejects. With no eligible voters a post never finalizes.
#[derive(Debug, Clone, Copy, Default)]
pub struct MajorityPolicy;

impl FinalizationPolicy for MajorityPolicy {
    fn decide(&self, tally: &ReviewTally) -> Option<PostStatus> {
        if tally.contributors == 0 {
            return None;
        }
        if tally.approvals * 2 > tally.contributors {
            Some(PostStatus::Published)
        } else if tally.rejections * 2 >= tally.contributors {
            Some(PostStatus::Rejected)
        } else {
            None
        }
    }
}
