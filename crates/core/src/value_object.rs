//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by (normalized) value**. The
/// only way to obtain one is a validating constructor returning
/// [`DomainResult`](crate::DomainResult), so an invalid instance can never be
/// held. To "modify" a value object, build a new one.
///
/// ```ignore
/// let a = Quantity::new(20)?;
/// let b = a.subtract(Quantity::new(5)?)?; // `a` is untouched
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
