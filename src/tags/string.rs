//! String-based Tag Collection
//!
//! A sorted, de-duplicated `SmallVec<[String; 5]>` implementation of [`TagCollection`].

use std::{
    cmp::Ordering,
    fmt,
    ops::{BitOr, BitOrAssign},
    string::ToString,
};

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::tags::collection::TagCollection;

/// A string-based tag collection.
///
/// Tags are compared byte-for-byte: `"Books"` and `"books"` are different tags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct StringTagCollection {
    tags: SmallVec<[String; 5]>,
}

impl StringTagCollection {
    /// Create a new string tag collection from a vector of strings.
    #[must_use]
    pub fn new(tags: SmallVec<[String; 5]>) -> Self {
        let mut collection = Self { tags };

        collection.tags.sort();
        collection.tags.dedup();

        collection
    }

    /// Create a new string tag collection from string slices.
    pub fn from_strs(tags: &[&str]) -> Self {
        tags.iter().map(ToString::to_string).collect()
    }

    /// Iterate the tags in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(String::as_str)
    }

    /// Convert the tag collection to a vector of strings.
    #[must_use]
    pub fn to_strs(&self) -> SmallVec<[String; 5]> {
        self.tags.clone()
    }
}

impl TagCollection for StringTagCollection {
    fn empty() -> Self {
        Self {
            tags: SmallVec::with_capacity(0),
        }
    }

    fn intersects(&self, other: &Self) -> bool {
        // Both sides are sorted, so a single merge pass is enough.
        let mut left = self.tags.iter();
        let mut right = other.tags.iter();
        let mut left_tag = left.next();
        let mut right_tag = right.next();

        while let (Some(left_tag_ref), Some(right_tag_ref)) = (left_tag, right_tag) {
            match left_tag_ref.cmp(right_tag_ref) {
                Ordering::Equal => return true,
                Ordering::Less => left_tag = left.next(),
                Ordering::Greater => right_tag = right.next(),
            }
        }

        false
    }

    fn contains(&self, tag: &str) -> bool {
        self.tags
            .binary_search_by(|probe| probe.as_str().cmp(tag))
            .is_ok()
    }

    fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    fn len(&self) -> usize {
        self.tags.len()
    }

    fn add(&mut self, tag: &str) {
        if let Err(pos) = self.tags.binary_search_by(|probe| probe.as_str().cmp(tag)) {
            self.tags.insert(pos, tag.to_string());
        }
    }
}

impl FromIterator<String> for StringTagCollection {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl From<Vec<String>> for StringTagCollection {
    fn from(tags: Vec<String>) -> Self {
        tags.into_iter().collect()
    }
}

impl From<StringTagCollection> for Vec<String> {
    fn from(collection: StringTagCollection) -> Self {
        collection.tags.into_vec()
    }
}

impl fmt::Display for StringTagCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;

        for tag in &self.tags {
            if !first {
                f.write_str(", ")?;
            }

            f.write_str(tag)?;
            first = false;
        }

        Ok(())
    }
}

impl BitOr for StringTagCollection {
    type Output = Self;

    fn bitor(mut self, rhs: Self) -> Self::Output {
        self |= rhs;
        self
    }
}

impl BitOrAssign for StringTagCollection {
    fn bitor_assign(&mut self, rhs: Self) {
        let capacity = self.tags.len().saturating_add(rhs.tags.len());
        let mut result = SmallVec::with_capacity(capacity);
        let mut left = std::mem::take(&mut self.tags).into_iter().peekable();
        let mut right = rhs.tags.into_iter().peekable();

        // Merge two sorted vectors (union).
        while let (Some(left_tag), Some(right_tag)) = (left.peek(), right.peek()) {
            match left_tag.cmp(right_tag) {
                Ordering::Less => {
                    if let Some(tag) = left.next() {
                        result.push(tag);
                    }
                }
                Ordering::Greater => {
                    if let Some(tag) = right.next() {
                        result.push(tag);
                    }
                }
                Ordering::Equal => {
                    if let Some(tag) = left.next() {
                        result.push(tag);
                    }
                    right.next();
                }
            }
        }

        result.extend(left);
        result.extend(right);

        self.tags = result;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intersects_requires_a_shared_tag() {
        let books = StringTagCollection::from_strs(&["books", "paper"]);
        let stationery = StringTagCollection::from_strs(&["paper", "pens"]);
        let electronics = StringTagCollection::from_strs(&["electronics"]);

        assert!(books.intersects(&stationery));
        assert!(!books.intersects(&electronics));
        assert!(!books.intersects(&StringTagCollection::empty()));
    }

    #[test]
    fn tags_are_case_sensitive() {
        let tags = StringTagCollection::from_strs(&["Books"]);

        assert!(tags.contains("Books"));
        assert!(!tags.contains("books"));
    }

    #[test]
    fn admits_treats_empty_constraint_as_unrestricted() {
        let unrestricted = StringTagCollection::empty();
        let restricted = StringTagCollection::from_strs(&["books"]);
        let cart = StringTagCollection::from_strs(&["books", "toys"]);

        assert!(unrestricted.admits(&cart));
        assert!(unrestricted.admits(&StringTagCollection::empty()));
        assert!(restricted.admits(&cart));
        assert!(!restricted.admits(&StringTagCollection::empty()));
    }

    #[test]
    fn add_keeps_sorted_order_and_ignores_duplicates() {
        let mut tags = StringTagCollection::from_strs(&["toys"]);

        tags.add("books");
        tags.add("toys");
        tags.add("garden");

        assert_eq!(tags.len(), 3);
        assert_eq!(tags.iter().collect::<Vec<_>>(), ["books", "garden", "toys"]);
    }

    #[test]
    fn from_strs_deduplicates_tags() {
        let tags = StringTagCollection::from_strs(&["toys", "books", "toys"]);

        assert_eq!(tags.len(), 2);
        assert_eq!(tags.iter().collect::<Vec<_>>(), ["books", "toys"]);
    }

    #[test]
    fn union_merges_sorted_tags() {
        let mut tags = StringTagCollection::from_strs(&["books", "toys"]);
        tags |= StringTagCollection::from_strs(&["garden", "toys"]);

        assert_eq!(tags.iter().collect::<Vec<_>>(), ["books", "garden", "toys"]);

        let merged = StringTagCollection::from_strs(&["b"]) | StringTagCollection::from_strs(&["a"]);

        assert_eq!(merged.iter().collect::<Vec<_>>(), ["a", "b"]);
    }

    #[test]
    fn display_joins_with_commas() {
        let tags = StringTagCollection::from_strs(&["toys", "books"]);

        assert_eq!(tags.to_string(), "books, toys");
        assert_eq!(StringTagCollection::empty().to_string(), "");
    }

    #[test]
    fn yaml_round_trip_uses_plain_sequences() -> Result<(), serde_norway::Error> {
        let tags: StringTagCollection = serde_norway::from_str("[toys, books]")?;

        assert_eq!(tags, StringTagCollection::from_strs(&["books", "toys"]));
        assert_eq!(serde_norway::to_string(&tags)?, "- books\n- toys\n");

        Ok(())
    }
}
