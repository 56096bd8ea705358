//! Field paths: ordered sequences of keys addressing one field.
//!
//! Besides conversion to and from masks, a path answers the two membership questions
//! the request layer asks about a mask:
//!
//! - **reset masks** list the fields a partial update overwrites; a path matches when it
//!   is reachable in the mask and is *final* when it lands on an empty leaf
//! - **select masks** restrict a read projection; an absent or empty mask selects
//!   everything below it
//!
//! ```rust
//! use fieldmask::{parse, FieldPath};
//!
//! let mask = parse("a.*").unwrap();
//! assert!(FieldPath::from(["a", "b"]).matches_reset_mask_final(&mask));
//! assert!(!FieldPath::from(["a"]).matches_reset_mask_final(&mask));
//! ```
//!
//! ## Absent masks
//!
//! The matching methods take a mask that exists. A request without a mask is not the
//! same as one with an empty mask: no reset mask resets nothing, while an empty reset
//! mask still matches the empty path. No select mask selects everything, exactly like
//! an empty one. Callers holding an `Option<&Mask>` decide the absent case themselves:
//!
//! ```rust
//! use fieldmask::{FieldPath, Mask};
//!
//! let root = FieldPath::new();
//! let absent: Option<&Mask> = None;
//!
//! assert!(!absent.map_or(false, |mask| root.matches_reset_mask(mask)));
//! assert!(root.matches_reset_mask(&Mask::new()));
//!
//! assert!(absent.map_or(true, |mask| root.matches_select_mask(mask)));
//! ```

use std::fmt;
use std::ops::{Add, AddAssign, Deref};

use serde::{Deserialize, Serialize};

use crate::{FieldKey, Mask, Result};

/// An ordered sequence of [`FieldKey`]s. Repeated keys are kept as given.
#[derive(Clone, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldPath(Vec<FieldKey>);

impl FieldPath {
    /// Creates an empty path.
    #[must_use]
    pub fn new() -> Self {
        FieldPath(Vec::new())
    }

    /// Appends a key.
    pub fn push(&mut self, key: impl Into<FieldKey>) {
        self.0.push(key.into());
    }

    /// Returns the keys of the path.
    #[must_use]
    pub fn keys(&self) -> &[FieldKey] {
        &self.0
    }

    /// Returns the path without its last key, or `None` for the empty path.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fieldmask::FieldPath;
    ///
    /// assert_eq!(FieldPath::from(["a", "b"]).parent(), Some(FieldPath::from(["a"])));
    /// assert_eq!(FieldPath::from(["a"]).parent(), Some(FieldPath::new()));
    /// assert_eq!(FieldPath::new().parent(), None);
    /// ```
    #[must_use]
    pub fn parent(&self) -> Option<FieldPath> {
        let (_, init) = self.0.split_last()?;
        Some(FieldPath(init.to_vec()))
    }

    /// Builds a single-chain mask ending in an empty leaf.
    #[must_use]
    pub fn to_mask(&self) -> Mask {
        self.join_mask(&Mask::new())
    }

    /// Builds a mask that places `mask` under this path.
    ///
    /// An empty path returns a copy of `mask` itself.
    #[must_use]
    pub fn join_mask(&self, mask: &Mask) -> Mask {
        self.0.iter().rev().fold(mask.copy(), |inner, key| {
            let mut outer = Mask::new();
            outer.field_parts.insert(key.clone(), inner);
            outer
        })
    }

    /// Returns a new path with the keys of `other` appended.
    #[must_use]
    pub fn join(&self, other: &FieldPath) -> FieldPath {
        let mut joined = self.clone();
        joined.0.extend(other.0.iter().cloned());
        joined
    }

    /// Returns `true` if `self` is a strict prefix of `other`.
    ///
    /// A path is never a prefix of itself or of a shorter path. The empty path is a
    /// prefix of every non-empty path.
    #[must_use]
    pub fn is_prefix_of(&self, other: &FieldPath) -> bool {
        self.len() < other.len() && other.0.starts_with(&self.0)
    }

    /// Returns `true` if the path is reachable in the reset mask.
    ///
    /// The empty path matches every mask, the empty one included. See the module docs
    /// for requests that carry no mask at all.
    #[must_use]
    pub fn matches_reset_mask(&self, mask: &Mask) -> bool {
        reset_match(&self.0, mask).0
    }

    /// Returns `true` if the path is reachable in the reset mask and ends on an empty
    /// leaf, i.e. the field itself (not only some sub-field) is reset.
    #[must_use]
    pub fn matches_reset_mask_final(&self, mask: &Mask) -> bool {
        let (matched, is_final) = reset_match(&self.0, mask);
        matched && is_final
    }

    /// Returns `true` if the path is included by the select mask.
    #[must_use]
    pub fn matches_select_mask(&self, mask: &Mask) -> bool {
        select_match(&self.0, mask).0
    }

    /// Returns `(matched, inner)` for the select mask. `inner` is set when the path
    /// reaches below the point where the mask stops restricting.
    #[must_use]
    pub fn matches_select_mask_inner(&self, mask: &Mask) -> (bool, bool) {
        select_match(&self.0, mask)
    }

    /// Writes the path in mask grammar form.
    #[must_use]
    pub fn marshal(&self) -> String {
        self.to_mask().marshal()
    }

    /// Parses a mask and reduces it to a path.
    ///
    /// Returns `Ok(None)` for an empty mask.
    ///
    /// # Errors
    ///
    /// Returns a parse error for malformed input and [`Error::WildcardInMask`] or
    /// [`Error::MultiplePaths`] if the mask is not a single chain.
    ///
    /// [`Error::WildcardInMask`]: crate::Error::WildcardInMask
    /// [`Error::MultiplePaths`]: crate::Error::MultiplePaths
    pub fn unmarshal(source: &str) -> Result<Option<FieldPath>> {
        crate::parse(source)?.to_field_path()
    }
}

fn reset_match(path: &[FieldKey], mask: &Mask) -> (bool, bool) {
    let Some((key, rest)) = path.split_first() else {
        return (true, mask.is_empty());
    };
    let (mut matched, mut is_final) = match mask.any.as_deref() {
        Some(any) => reset_match(rest, any),
        None => (false, false),
    };
    if let Some(child) = mask.field_parts.get(key) {
        let (key_matched, key_final) = reset_match(rest, child);
        matched |= key_matched;
        if key_matched {
            is_final |= key_final;
        }
    }
    (matched, is_final)
}

fn select_match(path: &[FieldKey], mask: &Mask) -> (bool, bool) {
    if mask.is_empty() {
        return (true, !path.is_empty());
    }
    let Some((key, rest)) = path.split_first() else {
        return (true, false);
    };
    let (mut matched, mut inner) = match mask.any.as_deref() {
        Some(any) => select_match(rest, any),
        None => (false, false),
    };
    if let Some(child) = mask.field_parts.get(key) {
        let (key_matched, key_inner) = select_match(rest, child);
        matched |= key_matched;
        if key_matched {
            inner |= key_inner;
        }
    }
    (matched, inner)
}

impl Deref for FieldPath {
    type Target = [FieldKey];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.marshal())
    }
}

impl fmt::Debug for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FieldPath({})", self.marshal())
    }
}

impl<K: Into<FieldKey>> FromIterator<K> for FieldPath {
    fn from_iter<T: IntoIterator<Item = K>>(iter: T) -> Self {
        FieldPath(iter.into_iter().map(Into::into).collect())
    }
}

impl<K: Into<FieldKey>> Extend<K> for FieldPath {
    fn extend<T: IntoIterator<Item = K>>(&mut self, iter: T) {
        self.0.extend(iter.into_iter().map(Into::into));
    }
}

impl<K: Into<FieldKey>> From<Vec<K>> for FieldPath {
    fn from(keys: Vec<K>) -> Self {
        keys.into_iter().collect()
    }
}

impl<K: Into<FieldKey>, const N: usize> From<[K; N]> for FieldPath {
    fn from(keys: [K; N]) -> Self {
        keys.into_iter().collect()
    }
}

impl IntoIterator for FieldPath {
    type Item = FieldKey;
    type IntoIter = std::vec::IntoIter<FieldKey>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a FieldPath {
    type Item = &'a FieldKey;
    type IntoIter = std::slice::Iter<'a, FieldKey>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl Add<&FieldPath> for &FieldPath {
    type Output = FieldPath;

    fn add(self, rhs: &FieldPath) -> FieldPath {
        self.join(rhs)
    }
}

impl AddAssign<&FieldPath> for FieldPath {
    fn add_assign(&mut self, rhs: &FieldPath) {
        self.0.extend(rhs.0.iter().cloned());
    }
}

impl Add<&Mask> for &FieldPath {
    type Output = Mask;

    fn add(self, rhs: &Mask) -> Mask {
        self.join_mask(rhs)
    }
}
