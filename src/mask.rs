//! The mask tree and its algebra.
//!
//! A [`Mask`] node has an optional wildcard branch (`any`, written `*`) and a map of
//! named branches. An empty child means "this field, with no deeper restriction".
//!
//! ## Algebra
//!
//! | Operation | Method | Operator | Wildcard reaches named keys |
//! |-----------|--------|----------|-----------------------------|
//! | Union | [`Mask::union`], [`Mask::union_mask`] | `+`, `+=` | n/a |
//! | Dumb intersection | [`Mask::intersect_dumb`] | `*`, `*=` | no |
//! | Reset intersection | [`Mask::intersect_reset_mask`] | `&` | yes |
//! | Dumb subtraction | [`Mask::subtract_dumb`] | `/`, `/=` | no |
//! | Reset subtraction | [`Mask::subtract_reset_mask`] | `-`, `-=` | yes |
//!
//! Every operation returns or mutates an exclusively owned tree; no subtree is shared
//! between the operands and the result. In-place operations are not transactional.
//!
//! ```rust
//! use fieldmask::parse;
//!
//! let a = parse("spec.(name,labels)").unwrap();
//! let b = parse("spec.*").unwrap();
//!
//! assert_eq!((&a * &b).marshal(), "spec");
//! assert_eq!((&a & &b).marshal(), "spec.(labels,name)");
//! assert_eq!((&a - &b).marshal(), "");
//! ```

use std::borrow::Cow;
use std::fmt;
use std::ops::{Add, AddAssign, BitAnd, Div, DivAssign, Mul, MulAssign, Sub, SubAssign};

use indexmap::IndexMap;
use serde::de::{self, Deserialize, Deserializer, Visitor};
use serde::ser::{Serialize, Serializer};

use crate::{Error, FieldKey, FieldPath, Result};

/// A tree of selected field paths.
///
/// Equality is structural: `any` is compared recursively and `field_parts` as an
/// unordered map.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Mask {
    /// The wildcard branch, applying to every key at this level.
    pub any: Option<Box<Mask>>,
    /// Named branches.
    pub field_parts: IndexMap<FieldKey, Mask>,
}

impl Mask {
    /// Creates an empty mask.
    #[must_use]
    pub fn new() -> Self {
        Mask::default()
    }

    /// Creates a mask from a wildcard branch and named branches.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fieldmask::Mask;
    ///
    /// let mask = Mask::from_parts(Some(Mask::new()), [("id", Mask::new())]);
    /// assert_eq!(mask.marshal(), "*,id");
    /// ```
    pub fn from_parts<K, I>(any: Option<Mask>, field_parts: I) -> Self
    where
        K: Into<FieldKey>,
        I: IntoIterator<Item = (K, Mask)>,
    {
        Mask {
            any: any.map(Box::new),
            field_parts: field_parts
                .into_iter()
                .map(|(k, v)| (k.into(), v))
                .collect(),
        }
    }

    /// Returns `true` if the mask has neither a wildcard nor named branches.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.any.is_none() && self.field_parts.is_empty()
    }

    /// Returns a deep copy of the mask.
    #[must_use]
    pub fn copy(&self) -> Mask {
        self.clone()
    }

    /// Sets the wildcard branch, returning the previous one.
    pub fn set_any(&mut self, mask: Mask) -> Option<Mask> {
        self.any.replace(Box::new(mask)).map(|b| *b)
    }

    /// Sets a named branch, returning the previous one.
    pub fn insert(&mut self, key: impl Into<FieldKey>, mask: Mask) -> Option<Mask> {
        self.field_parts.insert(key.into(), mask)
    }

    /// Returns the wildcard branch.
    #[must_use]
    pub fn any(&self) -> Option<&Mask> {
        self.any.as_deref()
    }

    /// Returns the named branch for `key`, ignoring the wildcard.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Mask> {
        self.field_parts.get(key)
    }

    /// Reduces a single-chain mask to a path.
    ///
    /// Returns `Ok(None)` for the empty mask.
    ///
    /// # Errors
    ///
    /// Returns [`Error::WildcardInMask`] if any level has a wildcard and
    /// [`Error::MultiplePaths`] if any level has more than one named branch.
    pub fn to_field_path(&self) -> Result<Option<FieldPath>> {
        let mut path = FieldPath::new();
        let mut current = self;
        loop {
            if current.any.is_some() {
                return Err(Error::WildcardInMask);
            }
            if current.field_parts.len() > 1 {
                return Err(Error::MultiplePaths);
            }
            match current.field_parts.iter().next() {
                Some((key, child)) => {
                    path.push(key.clone());
                    current = child;
                }
                None => break,
            }
        }
        Ok(if path.is_empty() { None } else { Some(path) })
    }

    /// Returns `true` if [`Mask::to_field_path`] succeeds.
    #[must_use]
    pub fn is_field_path(&self) -> bool {
        self.to_field_path().is_ok()
    }

    /// Returns the mask applying below `key`: the named branch merged with the
    /// wildcard branch. `None` if neither exists.
    #[must_use]
    pub fn sub_mask_key(&self, key: &FieldKey) -> Option<Mask> {
        self.step(key).map(Cow::into_owned)
    }

    /// Returns the mask applying below `path`, following [`Mask::sub_mask_key`] at
    /// every level. The empty path yields a copy of the mask itself.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fieldmask::{parse, FieldPath};
    ///
    /// let mask = parse("*.name,a.id").unwrap();
    /// let sub = mask.sub_mask(&FieldPath::from(["a"])).unwrap();
    /// assert_eq!(sub.marshal(), "id,name");
    /// assert!(mask.sub_mask(&FieldPath::from(["a", "x"])).is_none());
    /// ```
    #[must_use]
    pub fn sub_mask(&self, path: &[FieldKey]) -> Option<Mask> {
        let mut current: Cow<'_, Mask> = Cow::Borrowed(self);
        for key in path {
            current = match current {
                Cow::Borrowed(mask) => mask.step(key)?,
                Cow::Owned(mask) => Cow::Owned(mask.step(key)?.into_owned()),
            };
        }
        Some(current.into_owned())
    }

    fn step(&self, key: &FieldKey) -> Option<Cow<'_, Mask>> {
        match (self.field_parts.get(key), self.any.as_deref()) {
            (Some(named), Some(any)) => {
                let mut merged = named.copy();
                merged.union_mask(any);
                Some(Cow::Owned(merged))
            }
            (Some(named), None) => Some(Cow::Borrowed(named)),
            (None, any) => any.map(Cow::Borrowed),
        }
    }

    /// Writes the mask in its text form.
    ///
    /// Alternatives at every level are sorted, so equal masks always marshal to the
    /// same string.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fieldmask::parse;
    ///
    /// assert_eq!(parse("a.c, a.b").unwrap().marshal(), "a.(b,c)");
    /// assert_eq!(parse("*.name").unwrap().marshal(), "*.name");
    /// ```
    #[must_use]
    pub fn marshal(&self) -> String {
        self.marshal_alternatives().1
    }

    fn marshal_alternatives(&self) -> (usize, String) {
        if self.is_empty() {
            return (0, String::new());
        }
        let mut alternatives = Vec::with_capacity(self.field_parts.len() + 1);
        if let Some(any) = self.any.as_deref() {
            alternatives.push(marshal_branch("*", any));
        }
        for (key, child) in &self.field_parts {
            alternatives.push(marshal_branch(&key.marshal(), child));
        }
        alternatives.sort();
        (alternatives.len(), alternatives.join(","))
    }

    /// Merges `other` into this mask.
    pub fn union_mask(&mut self, other: &Mask) {
        if other.is_empty() {
            return;
        }
        match (self.any.as_deref_mut(), other.any.as_deref()) {
            (Some(mine), Some(theirs)) => mine.union_mask(theirs),
            (None, Some(theirs)) => self.any = Some(Box::new(theirs.copy())),
            _ => {}
        }
        for (key, theirs) in &other.field_parts {
            merge_child(&mut self.field_parts, key, theirs);
        }
    }

    /// Merges a single path into this mask.
    pub fn add_path(&mut self, path: &FieldPath) {
        self.union_mask(&path.to_mask());
    }

    /// Returns the union of two masks.
    #[must_use]
    pub fn union(&self, other: &Mask) -> Mask {
        let mut ret = self.copy();
        ret.union_mask(other);
        ret
    }

    /// Intersects masks by shape only: a key survives when both sides name it, and the
    /// wildcard survives when both sides have one. A wildcard never matches a named key.
    #[must_use]
    pub fn intersect_dumb(&self, other: &Mask) -> Mask {
        let mut ret = Mask::new();
        if let (Some(mine), Some(theirs)) = (self.any.as_deref(), other.any.as_deref()) {
            ret.any = Some(Box::new(mine.intersect_dumb(theirs)));
        }
        for (key, mine) in &self.field_parts {
            if let Some(theirs) = other.field_parts.get(key) {
                ret.field_parts.insert(key.clone(), mine.intersect_dumb(theirs));
            }
        }
        ret
    }

    /// Intersects reset masks, where a wildcard on either side also covers the other
    /// side's named keys.
    #[must_use]
    pub fn intersect_reset_mask(&self, other: &Mask) -> Mask {
        let mut ret = Mask::new();
        if let Some(mine) = self.any.as_deref() {
            ret.any = other
                .any
                .as_deref()
                .map(|theirs| Box::new(mine.intersect_reset_mask(theirs)));
            for (key, theirs) in &other.field_parts {
                ret.field_parts
                    .insert(key.clone(), mine.intersect_reset_mask(theirs));
            }
        }
        if let Some(theirs) = other.any.as_deref() {
            for (key, mine) in &self.field_parts {
                let inner = theirs.intersect_reset_mask(mine);
                merge_owned_child(&mut ret.field_parts, key, inner);
            }
        }
        for (key, mine) in &self.field_parts {
            if let Some(theirs) = other.field_parts.get(key) {
                let inner = mine.intersect_reset_mask(theirs);
                merge_owned_child(&mut ret.field_parts, key, inner);
            }
        }
        ret
    }

    /// Removes from this mask what `other` covers by matching shape only: the wildcard
    /// against the wildcard and keys against the same keys.
    ///
    /// Branches left empty are removed.
    pub fn subtract_dumb(&mut self, other: &Mask) {
        let clear_any = match (self.any.as_deref_mut(), other.any.as_deref()) {
            (Some(mine), Some(theirs)) => {
                mine.subtract_dumb(theirs);
                mine.is_empty()
            }
            _ => false,
        };
        if clear_any {
            self.any = None;
        }
        self.field_parts
            .retain(|key, mine| match other.field_parts.get(key) {
                Some(theirs) => {
                    mine.subtract_dumb(theirs);
                    !mine.is_empty()
                }
                None => true,
            });
    }

    /// Removes from this reset mask everything `other` resets. The wildcard of `other`
    /// is subtracted from every named key of this mask as well.
    ///
    /// Branches left empty are removed. The wildcard branch is only removed when
    /// `other` has a wildcard too.
    pub fn subtract_reset_mask(&mut self, other: &Mask) {
        let clear_any = match (self.any.as_deref_mut(), other.any.as_deref()) {
            (Some(mine), Some(theirs)) => {
                mine.subtract_reset_mask(theirs);
                mine.is_empty()
            }
            _ => false,
        };
        if clear_any {
            self.any = None;
        }
        let other_any = other.any.as_deref();
        self.field_parts.retain(|key, mine| {
            let named = other.field_parts.get(key);
            if other_any.is_none() && named.is_none() {
                return true;
            }
            if let Some(theirs) = other_any {
                mine.subtract_reset_mask(theirs);
            }
            if let Some(theirs) = named {
                mine.subtract_reset_mask(theirs);
            }
            !mine.is_empty()
        });
    }
}

fn marshal_branch(key: &str, child: &Mask) -> String {
    match child.marshal_alternatives() {
        (0, _) => key.to_string(),
        (1, inner) => format!("{}.{}", key, inner),
        (_, inner) => format!("{}.({})", key, inner),
    }
}

fn merge_child(parts: &mut IndexMap<FieldKey, Mask>, key: &FieldKey, theirs: &Mask) {
    match parts.get_mut(key) {
        Some(mine) => mine.union_mask(theirs),
        None => {
            parts.insert(key.clone(), theirs.copy());
        }
    }
}

fn merge_owned_child(parts: &mut IndexMap<FieldKey, Mask>, key: &FieldKey, theirs: Mask) {
    match parts.get_mut(key) {
        Some(mine) => mine.union_mask(&theirs),
        None => {
            parts.insert(key.clone(), theirs);
        }
    }
}

impl fmt::Display for Mask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.marshal())
    }
}

impl fmt::Debug for Mask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Mask({})", self.marshal())
    }
}

impl std::str::FromStr for Mask {
    type Err = Error;

    fn from_str(source: &str) -> Result<Mask> {
        crate::parse(source)
    }
}

impl From<&FieldPath> for Mask {
    fn from(path: &FieldPath) -> Self {
        path.to_mask()
    }
}

impl From<FieldPath> for Mask {
    fn from(path: FieldPath) -> Self {
        path.to_mask()
    }
}

impl Add<&Mask> for &Mask {
    type Output = Mask;

    fn add(self, rhs: &Mask) -> Mask {
        self.union(rhs)
    }
}

impl Add<&FieldPath> for &Mask {
    type Output = Mask;

    fn add(self, rhs: &FieldPath) -> Mask {
        let mut ret = self.copy();
        ret.add_path(rhs);
        ret
    }
}

impl AddAssign<&Mask> for Mask {
    fn add_assign(&mut self, rhs: &Mask) {
        self.union_mask(rhs);
    }
}

impl AddAssign<&FieldPath> for Mask {
    fn add_assign(&mut self, rhs: &FieldPath) {
        self.add_path(rhs);
    }
}

impl Mul<&Mask> for &Mask {
    type Output = Mask;

    fn mul(self, rhs: &Mask) -> Mask {
        self.intersect_dumb(rhs)
    }
}

impl MulAssign<&Mask> for Mask {
    fn mul_assign(&mut self, rhs: &Mask) {
        *self = self.intersect_dumb(rhs);
    }
}

impl BitAnd<&Mask> for &Mask {
    type Output = Mask;

    fn bitand(self, rhs: &Mask) -> Mask {
        self.intersect_reset_mask(rhs)
    }
}

impl Sub<&Mask> for &Mask {
    type Output = Mask;

    fn sub(self, rhs: &Mask) -> Mask {
        let mut ret = self.copy();
        ret.subtract_reset_mask(rhs);
        ret
    }
}

impl SubAssign<&Mask> for Mask {
    fn sub_assign(&mut self, rhs: &Mask) {
        self.subtract_reset_mask(rhs);
    }
}

impl Div<&Mask> for &Mask {
    type Output = Mask;

    fn div(self, rhs: &Mask) -> Mask {
        let mut ret = self.copy();
        ret.subtract_dumb(rhs);
        ret
    }
}

impl DivAssign<&Mask> for Mask {
    fn div_assign(&mut self, rhs: &Mask) {
        self.subtract_dumb(rhs);
    }
}

impl Serialize for Mask {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.marshal())
    }
}

impl<'de> Deserialize<'de> for Mask {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Mask, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct MaskVisitor;

        impl<'de> Visitor<'de> for MaskVisitor {
            type Value = Mask;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a field mask string")
            }

            fn visit_str<E>(self, value: &str) -> std::result::Result<Mask, E>
            where
                E: de::Error,
            {
                crate::parse(value).map_err(de::Error::custom)
            }
        }

        deserializer.deserialize_str(MaskVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{mask, parse};

    fn m(source: &str) -> Mask {
        parse(source).unwrap()
    }

    #[test]
    fn test_empty() {
        assert!(Mask::new().is_empty());
        assert!(!m("a").is_empty());
        assert!(!m("*").is_empty());
        assert_eq!(Mask::new().marshal(), "");
    }

    #[test]
    fn test_equality_ignores_insertion_order() {
        let mut left = Mask::new();
        left.insert("a", Mask::new());
        left.insert("b", Mask::new());
        let mut right = Mask::new();
        right.insert("b", Mask::new());
        right.insert("a", Mask::new());
        assert_eq!(left, right);
        assert_ne!(left, m("a"));
        assert_ne!(m("*"), m("a"));
    }

    #[test]
    fn test_marshal_groups_only_multiple_alternatives() {
        assert_eq!(m("a.b.c").marshal(), "a.b.c");
        assert_eq!(m("a.b,a.c").marshal(), "a.(b,c)");
        assert_eq!(m("a.b.(c,d),a.e").marshal(), "a.(b.(c,d),e)");
        assert_eq!(m("z,*,y.x").marshal(), "*,y.x,z");
    }

    #[test]
    fn test_marshal_quotes_keys() {
        let mask = mask!({ "weird key": { "x": {} }, "": {} });
        assert_eq!(mask.marshal(), r#""","weird key".x"#);
    }

    #[test]
    fn test_copy_is_deep() {
        let original = m("a.b,*.c");
        let mut copy = original.copy();
        assert_eq!(copy, original);
        copy.field_parts.get_mut("a").unwrap().insert("z", Mask::new());
        copy.any.as_deref_mut().unwrap().insert("q", Mask::new());
        assert_eq!(original, m("a.b,*.c"));
        assert_ne!(copy, original);
    }

    #[test]
    fn test_to_field_path() {
        assert_eq!(Mask::new().to_field_path(), Ok(None));
        assert_eq!(
            m("a.b.c").to_field_path(),
            Ok(Some(FieldPath::from(["a", "b", "c"])))
        );
        assert_eq!(m("a.*").to_field_path(), Err(Error::WildcardInMask));
        assert_eq!(m("a.(b,c)").to_field_path(), Err(Error::MultiplePaths));
        assert!(m("a.b").is_field_path());
        assert!(!m("a,b").is_field_path());
    }

    #[test]
    fn test_sub_mask_key() {
        let mask = m("a.x,*.y,b");
        assert_eq!(mask.sub_mask_key(&"a".into()), Some(m("x,y")));
        assert_eq!(mask.sub_mask_key(&"b".into()), Some(m("y")));
        assert_eq!(mask.sub_mask_key(&"c".into()), Some(m("y")));

        let no_wildcard = m("a.x");
        assert_eq!(no_wildcard.sub_mask_key(&"a".into()), Some(m("x")));
        assert_eq!(no_wildcard.sub_mask_key(&"c".into()), None);
    }

    #[test]
    fn test_sub_mask_path() {
        let mask = m("spec.(a.b,*.c)");
        assert_eq!(mask.sub_mask(&[]), Some(mask.clone()));
        assert_eq!(mask.sub_mask(&FieldPath::from(["spec", "a"])), Some(m("b,c")));
        assert_eq!(mask.sub_mask(&FieldPath::from(["spec", "z"])), Some(m("c")));
        assert_eq!(mask.sub_mask(&FieldPath::from(["spec", "z", "c"])), Some(Mask::new()));
        assert_eq!(mask.sub_mask(&FieldPath::from(["spec", "z", "q"])), None);
        assert_eq!(mask.sub_mask(&FieldPath::from(["other"])), None);
    }

    #[test]
    fn test_union() {
        assert_eq!(&m("a.b") + &m("a.c"), m("a.(b,c)"));
        assert_eq!(&m("*.x") + &m("*.y"), m("*.(x,y)"));
        assert_eq!(&m("a") + &m("*.y"), m("a,*.y"));
        assert_eq!(&m("a.b") + &Mask::new(), m("a.b"));
        assert_eq!(&Mask::new() + &m("a.b"), m("a.b"));

        let mut acc = Mask::new();
        acc += &FieldPath::from(["x", "y"]);
        acc += &m("x.z");
        assert_eq!(acc, m("x.(y,z)"));
        assert_eq!(&acc + &FieldPath::from(["w"]), m("w,x.(y,z)"));
    }

    #[test]
    fn test_union_does_not_alias() {
        let other = m("*.a,k.b");
        let mut base = Mask::new();
        base += &other;
        base.any.as_deref_mut().unwrap().insert("zz", Mask::new());
        base.field_parts.get_mut("k").unwrap().insert("zz", Mask::new());
        assert_eq!(other, m("*.a,k.b"));
    }

    #[test]
    fn test_intersect_dumb_keys() {
        assert_eq!(&m("a.(b,c),d") * &m("a.(c,e),f"), m("a.c"));
        assert_eq!(&m("a.b") * &m("a"), m("a"));
        assert_eq!(&m("a") * &m("b"), Mask::new());
    }

    #[test]
    fn test_intersect_dumb_wildcard() {
        // Wildcards only meet wildcards.
        assert_eq!(&m("*.x") * &m("a.x"), Mask::new());
        assert_eq!(&m("a.x") * &m("*.x"), Mask::new());
        assert_eq!(&m("*.(x,y)") * &m("*.(y,z)"), m("*.y"));
        assert_eq!(&m("*") * &m("*.x"), m("*"));

        let mut acc = m("*.x,a");
        acc *= &m("*.x");
        assert_eq!(acc, m("*.x"));
    }

    #[test]
    fn test_intersect_reset_keys() {
        assert_eq!(&m("a.(b,c),d") & &m("a.(c,e),f"), m("a.c"));
        assert_eq!(&m("a") & &m("b"), Mask::new());
    }

    #[test]
    fn test_intersect_reset_wildcard_reaches_keys() {
        assert_eq!(&m("*.x") & &m("a.x,b.y"), m("a.x,b"));
        assert_eq!(&m("a.x,b.y") & &m("*.x"), m("a.x,b"));
        assert_eq!(&m("*") & &m("a.b"), m("a"));
        assert_eq!(&m("*.x") & &m("*.x"), m("*.x"));
        assert_eq!(&m("*.x") & &m("a"), m("a"));
    }

    #[test]
    fn test_intersect_reset_merges_both_routes() {
        // `a` is reached through the right wildcard and through the named key.
        let left = m("a.(x,y)");
        let right = m("*.x,a.y");
        assert_eq!(&left & &right, m("a.(x,y)"));
    }

    #[test]
    fn test_intersect_reset_nested_wildcards() {
        let left = m("*.*.x,a.b.y");
        let right = m("a.*.y,*.c.x");
        // `*.*.x` against `a.*.y` leaves a bare `a.*`.
        let expected = m("*.c.x,a.(*,b.y)");
        assert_eq!(&left & &right, expected);
    }

    #[test]
    fn test_subtract_dumb_keys() {
        assert_eq!(&m("a.(b,c),d") / &m("a.b"), m("a.c,d"));
        assert_eq!(&m("a.b") / &m("a.b"), Mask::new());
        // The leaf `a` is still empty afterwards and gets dropped.
        assert_eq!(&m("a") / &m("a.b"), Mask::new());
        assert_eq!(&m("a.b") / &m("a"), m("a.b"));
    }

    #[test]
    fn test_subtract_dumb_wildcard() {
        assert_eq!(&m("a.x") / &m("*.x"), m("a.x"));
        assert_eq!(&m("*.x") / &m("a.x"), m("*.x"));
        assert_eq!(&m("*.(x,y)") / &m("*.x"), m("*.y"));
        assert_eq!(&m("*.x") / &m("*.x"), Mask::new());

        let mut acc = m("*.x,a.y");
        acc /= &m("*.x,a.y");
        assert!(acc.is_empty());
    }

    #[test]
    fn test_subtract_reset_keys() {
        assert_eq!(&m("a.(b,c),d") - &m("a.b"), m("a.c,d"));
        assert_eq!(&m("a,b") - &m("a"), m("b"));
        assert_eq!(&m("a.b") - &m("a"), m("a.b"));
    }

    #[test]
    fn test_subtract_reset_wildcard_reaches_keys() {
        assert_eq!(&m("a.x,b.(x,y)") - &m("*.x"), m("b.y"));
        assert_eq!(&m("*.x") - &m("a.x"), m("*.x"));
        assert_eq!(&m("*.(x,y)") - &m("*.x"), m("*.y"));

        let mut acc = m("a.(x,y),*.x");
        acc -= &m("*.x,a.y");
        assert!(acc.is_empty());
    }

    #[test]
    fn test_subtract_reset_keeps_wildcard_without_other_wildcard() {
        assert_eq!(&m("*") - &m("a"), m("*"));
        assert_eq!(&m("*") - &Mask::new(), m("*"));
        assert_eq!(&m("*") - &m("*"), Mask::new());
    }

    #[test]
    fn test_subtract_by_empty_is_identity() {
        for source in ["a.b", "*.x,y", "a.(b,c.d)"] {
            assert_eq!(&m(source) - &Mask::new(), m(source));
            assert_eq!(&m(source) / &Mask::new(), m(source));
        }
    }

    #[test]
    fn test_display_debug() {
        let mask = m("b,a");
        assert_eq!(mask.to_string(), "a,b");
        assert_eq!(format!("{:?}", mask), "Mask(a,b)");
    }

    #[test]
    fn test_serde_as_string() {
        let mask = m("a.(b,c)");
        assert_eq!(serde_json::to_string(&mask).unwrap(), r#""a.(b,c)""#);
        let back: Mask = serde_json::from_str(r#""a.c,a.b""#).unwrap();
        assert_eq!(back, mask);
        assert!(serde_json::from_str::<Mask>(r#""a.(""#).is_err());
    }

    #[test]
    fn test_from_parts_and_accessors() {
        let mut mask = Mask::from_parts(None, [("a", Mask::new())]);
        assert!(mask.any().is_none());
        assert_eq!(mask.set_any(m("x")), None);
        assert_eq!(mask.any(), Some(&m("x")));
        assert_eq!(mask.get("a"), Some(&Mask::new()));
        assert_eq!(mask.marshal(), "*.x,a");
    }
}
