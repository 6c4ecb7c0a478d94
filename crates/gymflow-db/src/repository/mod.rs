//! SurrealDB repository implementations.

mod activity;
mod admin;
mod membership;
mod organization;
mod role;

pub use activity::SurrealActivityLogRepository;
pub use admin::SurrealAdminRepository;
pub use membership::SurrealMembershipRepository;
pub use organization::SurrealOrganizationRepository;
pub use role::SurrealRoleRepository;
