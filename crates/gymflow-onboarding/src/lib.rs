//! Gymflow Onboarding — organization provisioning and membership
//! consistency repair.
//!
//! Both workflows run against elevated repository handles and preserve
//! the cross-table invariant between `organization_member` and `admin`
//! rows: provisioning establishes it, repair restores it.

pub mod error;
pub mod provisioning;
pub mod repair;

pub use error::OnboardingError;
pub use provisioning::{
    DASHBOARD_PATH, ProvisionInput, ProvisionOutcome, Provisioned, ProvisioningService,
};
pub use repair::{RepairOutcome, RepairReport, RepairService};
