//! Tag Collection
//!
//! The set operations rule matching relies on.

use std::{
    fmt,
    ops::{BitOr, BitOrAssign},
};

/// Trait for tag collections used as rule constraints and cart attributes.
pub trait TagCollection: Clone + fmt::Debug + PartialEq + BitOr<Output = Self> + BitOrAssign {
    /// Check if this collection intersects with another collection.
    /// Returns true if they have at least one tag in common.
    fn intersects(&self, other: &Self) -> bool;

    /// Check if this collection contains a specific tag.
    fn contains(&self, tag: &str) -> bool;

    /// Check if this collection is empty.
    fn is_empty(&self) -> bool;

    /// Get the number of tags in this collection.
    fn len(&self) -> usize;

    /// Create an empty collection.
    fn empty() -> Self;

    /// Add a tag to this collection.
    fn add(&mut self, tag: &str);

    /// Whether this collection, used as a constraint, admits `other`.
    ///
    /// An empty constraint is unrestricted. A non-empty constraint needs at
    /// least one tag in common, so it never admits an empty `other`.
    fn admits(&self, other: &Self) -> bool {
        self.is_empty() || self.intersects(other)
    }
}
