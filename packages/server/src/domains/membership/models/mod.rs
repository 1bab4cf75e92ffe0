pub mod ban;
pub mod member;

pub use ban::CommunityBan;
pub use member::{Member, MemberRole, Membership};
