//! Gymflow Directory — tenant-scoped role, admin, and settings
//! management with membership synchronization and activity logging.

pub mod error;
pub mod service;

pub use error::DirectoryError;
pub use service::{CallerPermissions, CreateAdminInput, CreateRoleInput, DirectoryService};
