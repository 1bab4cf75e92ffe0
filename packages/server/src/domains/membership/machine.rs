//! Membership state machine.
//!
//! ```text
//!   (none) --join--> Learner --promote--> Contributor
//!                       ^                     |
//!                       +------demote---------+
//!   (none) | Learner | Contributor --ban--> Banned   (terminal)
//! ```
//!
//! Pure: decides the next state or refuses. Persisting the move is the
//! caller's job (see `actions`).

use serde::Serialize;
use thiserror::Error;

use crate::common::ApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberState {
    Learner,
    Contributor,
    Banned,
}

impl MemberState {
    pub fn as_str(&self) -> &'static str {
        match self {
            MemberState::Learner => "learner",
            MemberState::Contributor => "contributor",
            MemberState::Banned => "banned",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "learner" => Some(MemberState::Learner),
            "contributor" => Some(MemberState::Contributor),
            "banned" => Some(MemberState::Banned),
            _ => None,
        }
    }

    pub fn promote(self) -> Result<Self, TransitionError> {
        Transition::Promote.apply(Some(self))
    }

    pub fn demote(self) -> Result<Self, TransitionError> {
        Transition::Demote.apply(Some(self))
    }

    pub fn ban(self) -> Result<Self, TransitionError> {
        Transition::Ban.apply(Some(self))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Join,
    Promote,
    Demote,
    Ban,
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionError {
    #[error("user is banned from this community")]
    Banned,

    #[error("user is not a member of this community")]
    NotMember,

    #[error("user is already a member of this community")]
    AlreadyMember,

    #[error("member is already a contributor")]
    AlreadyContributor,

    #[error("member is not a contributor")]
    NotContributor,

    #[error("user is already banned")]
    AlreadyBanned,
}

impl From<TransitionError> for ApiError {
    fn from(err: TransitionError) -> Self {
        match err {
            TransitionError::Banned => ApiError::forbidden(err.to_string()),
            TransitionError::NotMember => ApiError::NotFound("Member"),
            TransitionError::AlreadyMember
            | TransitionError::AlreadyContributor
            | TransitionError::NotContributor
            | TransitionError::AlreadyBanned => ApiError::conflict(err.to_string()),
        }
    }
}

impl Transition {
    /// Next state for `current` (`None` = not a member), or why the move is refused.
    pub fn apply(self, current: Option<MemberState>) -> Result<MemberState, TransitionError> {
        use MemberState::*;

        match (self, current) {
            (Transition::Ban, Some(Banned)) => Err(TransitionError::AlreadyBanned),
            (Transition::Ban, _) => Ok(Banned),

            (_, Some(Banned)) => Err(TransitionError::Banned),

            (Transition::Join, None) => Ok(Learner),
            (Transition::Join, Some(_)) => Err(TransitionError::AlreadyMember),

            (Transition::Promote | Transition::Demote, None) => Err(TransitionError::NotMember),

            (Transition::Promote, Some(Learner)) => Ok(Contributor),
            (Transition::Promote, Some(Contributor)) => Err(TransitionError::AlreadyContributor),

            (Transition::Demote, Some(Contributor)) => Ok(Learner),
            (Transition::Demote, Some(Learner)) => Err(TransitionError::NotContributor),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use MemberState::*;

    const STATES: [Option<MemberState>; 4] = [None, Some(Learner), Some(Contributor), Some(Banned)];

    #[test]
    fn join_makes_learners() {
        assert_eq!(Transition::Join.apply(None), Ok(Learner));
        assert_eq!(
            Transition::Join.apply(Some(Contributor)),
            Err(TransitionError::AlreadyMember)
        );
    }

    #[test]
    fn promote_and_demote_are_inverse() {
        let promoted = Transition::Promote.apply(Some(Learner)).unwrap();
        assert_eq!(promoted, Contributor);
        assert_eq!(Transition::Demote.apply(Some(promoted)), Ok(Learner));
    }

    #[test]
    fn promote_requires_learner() {
        assert_eq!(
            Transition::Promote.apply(Some(Contributor)),
            Err(TransitionError::AlreadyContributor)
        );
        assert_eq!(Transition::Promote.apply(None), Err(TransitionError::NotMember));
    }

    #[test]
    fn demote_requires_contributor() {
        assert_eq!(
            Transition::Demote.apply(Some(Learner)),
            Err(TransitionError::NotContributor)
        );
        assert_eq!(Transition::Demote.apply(None), Err(TransitionError::NotMember));
    }

    #[test]
    fn anyone_not_yet_banned_can_be_banned() {
        for state in [None, Some(Learner), Some(Contributor)] {
            assert_eq!(Transition::Ban.apply(state), Ok(Banned), "{:?}", state);
        }
        assert_eq!(
            Transition::Ban.apply(Some(Banned)),
            Err(TransitionError::AlreadyBanned)
        );
    }

    #[test]
    fn banned_is_terminal() {
        for transition in [Transition::Join, Transition::Promote, Transition::Demote, Transition::Ban] {
            assert!(transition.apply(Some(Banned)).is_err(), "{:?}", transition);
        }
    }

    #[test]
    fn every_successful_transition_lands_in_exactly_one_state() {
        for transition in [Transition::Join, Transition::Promote, Transition::Demote, Transition::Ban] {
            for state in STATES {
                if let Ok(next) = transition.apply(state) {
                    assert!(matches!(next, Learner | Contributor | Banned));
                    assert_ne!(Some(next), state, "{:?} from {:?} must move", transition, state);
                }
            }
        }
    }

    #[test]
    fn state_shorthands_match_transitions() {
        assert_eq!(Learner.promote(), Ok(Contributor));
        assert_eq!(Contributor.demote(), Ok(Learner));
        assert_eq!(Learner.demote(), Err(TransitionError::NotContributor));
        assert_eq!(Contributor.ban(), Ok(Banned));
        assert_eq!(Banned.promote(), Err(TransitionError::Banned));
    }

    #[test]
    fn state_names_roundtrip() {
        for state in [Learner, Contributor, Banned] {
            assert_eq!(MemberState::parse(state.as_str()), Some(state));
        }
        assert_eq!(MemberState::parse("admin"), None);
    }
}
