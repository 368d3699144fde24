//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Entities compare equal when their identities match, whatever the state of
/// their other attributes. Cross-entity links are always held as identities,
/// never as live references to another entity instance.
pub trait Entity {
    /// Natural (or composite) identity of the entity.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identity.
    fn id(&self) -> Self::Id;

    /// Identity equality, independent of mutable attributes.
    fn same_identity_as(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}
