/// Things only a community's creator may do.
///
/// Every capability currently resolves to the same rule (the actor must be
/// the creator); keeping them distinct keeps denial messages and logs specific.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommunityCapability {
    /// Promote learners and demote contributors
    ManageMembers,

    /// Ban any member of the community
    BanMembers,

    /// Approve or reject contributor requests
    ReviewContributorRequests,

    /// Read the moderation dashboard (stats, member list, requests)
    ViewDashboard,
}

impl CommunityCapability {
    /// Human-readable description used in permission-denied messages
    pub fn describe(&self) -> &'static str {
        match self {
            CommunityCapability::ManageMembers => "manage members",
            CommunityCapability::BanMembers => "ban members",
            CommunityCapability::ReviewContributorRequests => "review contributor requests",
            CommunityCapability::ViewDashboard => "view the dashboard",
        }
    }
}
