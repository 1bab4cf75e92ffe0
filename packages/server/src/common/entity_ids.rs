//! Typed IDs for every persisted entity.

pub use super::id::Id;

// ============================================================================
// Entity marker types
// ============================================================================

/// Marker for users (accounts owned by the session provider).
pub struct User;

/// Marker for communities.
pub struct Community;

/// Marker for community posts.
pub struct Post;

/// Marker for contributor votes on a post.
pub struct Review;

/// Marker for learner requests to become contributors.
pub struct ContributorRequest;

// ============================================================================
// Type aliases
// ============================================================================

/// A user; also identifies the user's membership inside a community.
pub type UserId = Id<User>;

pub type CommunityId = Id<Community>;

pub type PostId = Id<Post>;

pub type ReviewId = Id<Review>;

pub type ContributorRequestId = Id<ContributorRequest>;
