//! `nexus-auth` — role-based authorization boundary.
//!
//! Decoupled from HTTP, sessions and storage: callers resolve a [`Principal`]
//! and ask whether it may perform an operation. The domain use-cases never
//! consult this crate.

pub mod authorize;
pub mod permissions;
pub mod principal;
pub mod roles;

pub use authorize::{authorize, require_write};
pub use permissions::Permission;
pub use principal::Principal;
pub use roles::Role;
