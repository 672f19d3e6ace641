//! Entity trait: identity across reloads.

/// Anything listed by the console carries a server-assigned identifier.
///
/// Used to compare reloaded lists as sets and to exclude already-related
/// entities from candidate lists.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Copy + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> Self::Id;
}
