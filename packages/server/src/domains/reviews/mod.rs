//! Reviews domain - contributor votes on posts under review
//!
//! [`tally`] counts votes, [`policy`] decides when counting is over.

pub mod actions;
pub mod models;
pub mod policy;
pub mod tally;

pub use models::{Review, ReviewDecision};
pub use policy::{FinalizationPolicy, MajorityPolicy};
pub use tally::{ReviewTally, TallyView, CRUCIAL_VOTE_MARGIN};
