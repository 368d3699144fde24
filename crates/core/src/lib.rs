//! `nexus-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives shared by every bounded
//! context: the error taxonomy, value objects and identity traits. No IO, no
//! logging, no storage.

pub mod entity;
pub mod error;
pub mod id;
pub mod page;
pub mod value_object;
pub mod value_objects;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{InventarioId, UserId};
pub use page::{DEFAULT_PAGE_LIMIT, Page};
pub use value_object::ValueObject;
pub use value_objects::{Email, Nit, Phone, ProductCode, Quantity};
