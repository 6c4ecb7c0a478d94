//! Domain models for Gymflow.
//!
//! These are the core types shared across all crates.

pub mod activity;
pub mod admin;
pub mod membership;
pub mod organization;
pub mod role;
