//! Running vote tally for a post under contributor review.
//!
//! This module only counts. Whether a post is published or rejected is
//! decided by [`super::policy`].

use serde::Serialize;

use super::models::ReviewDecision;

/// How many votes separate a crucial vote from the majority threshold.
pub const CRUCIAL_VOTE_MARGIN: u64 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ReviewTally {
    /// Eligible voters (contributors of the community).
    pub contributors: u64,
    /// Votes cast so far.
    pub votes: u64,
    pub approvals: u64,
    pub rejections: u64,
}

impl ReviewTally {
    pub fn new(contributors: u64, approvals: u64, rejections: u64) -> Self {
        Self {
            contributors,
            votes: approvals + rejections,
            approvals,
            rejections,
        }
    }

    pub fn from_decisions<I>(contributors: u64, decisions: I) -> Self
    where
        I: IntoIterator<Item = ReviewDecision>,
    {
        let (approvals, rejections) =
            decisions
                .into_iter()
                .fold((0, 0), |(approved, rejected), decision| match decision {
                    ReviewDecision::Approved => (approved + 1, rejected),
                    ReviewDecision::Rejected => (approved, rejected + 1),
                });
        Self::new(contributors, approvals, rejections)
    }

    /// The same votes counted against one fewer eligible voter, for posts
    /// whose author is a contributor and so cannot vote on them.
    pub fn excluding_author(&self) -> Self {
        Self {
            contributors: self.contributors.saturating_sub(1),
            ..*self
        }
    }

    /// Share of contributors who have voted, as a whole percentage.
    ///
    /// `round(100 * votes / contributors)`, halves rounded up; 0 with no
    /// contributors. Not clamped: contributors demoted after voting can
    /// push it past 100.
    pub fn quorum_percentage(&self) -> u64 {
        if self.contributors == 0 {
            return 0;
        }
        (200 * self.votes + self.contributors) / (2 * self.contributors)
    }

    /// Votes needed for a simple majority of contributors: `ceil(C / 2)`.
    pub fn majority_threshold(&self) -> u64 {
        self.contributors.div_ceil(2)
    }

    /// True when the vote count sits within two votes of the majority threshold.
    pub fn is_crucial_vote(&self) -> bool {
        self.contributors > 0
            && self.votes.abs_diff(self.majority_threshold()) <= CRUCIAL_VOTE_MARGIN
    }

    pub fn view(&self) -> TallyView {
        TallyView {
            contributors: self.contributors,
            votes: self.votes,
            approvals: self.approvals,
            rejections: self.rejections,
            quorum_percentage: self.quorum_percentage(),
            majority_threshold: self.majority_threshold(),
            crucial_vote: self.is_crucial_vote(),
        }
    }
}

/// Serialized tally including the derived signals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TallyView {
    pub contributors: u64,
    pub votes: u64,
    pub approvals: u64,
    pub rejections: u64,
    pub quorum_percentage: u64,
    pub majority_threshold: u64,
    pub crucial_vote: bool,
}
