//! Gymflow Core — domain models, repository traits, and shared error
//! types for the multi-tenant gym management backend.
//!
//! This crate does no I/O. Storage lives behind the traits in
//! [`repository`]; workflows live in the service crates.

pub mod access;
pub mod error;
pub mod identity;
pub mod models;
pub mod permissions;
pub mod repository;

pub use access::{AccessContext, resolve_access};
pub use error::{GymflowError, GymflowResult};
pub use identity::Identity;
