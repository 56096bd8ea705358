/// Builds a [`Mask`](crate::Mask) from a literal tree.
///
/// Each level is written as `{ "key": { ... }, *: { ... } }`, with `*` standing for the
/// wildcard branch and `{}` for a leaf.
///
/// # Examples
///
/// ```rust
/// use fieldmask::{mask, parse};
///
/// let m = mask!({
///     "spec": { "name": {}, "labels": { *: {} } },
///     "metadata": {}
/// });
/// assert_eq!(m, parse("spec.(name,labels.*),metadata").unwrap());
/// assert_eq!(mask!({}), fieldmask::Mask::new());
/// ```
#[macro_export]
macro_rules! mask {
    (@entries $m:ident;) => {};

    (@entries $m:ident; * : $v:tt $(, $($rest:tt)*)?) => {
        let _ = $m.set_any($crate::mask!($v));
        $crate::mask!(@entries $m; $($($rest)*)?);
    };

    (@entries $m:ident; $k:literal : $v:tt $(, $($rest:tt)*)?) => {
        let _ = $m.insert($k, $crate::mask!($v));
        $crate::mask!(@entries $m; $($($rest)*)?);
    };

    ({}) => {
        $crate::Mask::new()
    };

    ({ $($body:tt)+ }) => {{
        let mut mask = $crate::Mask::new();
        $crate::mask!(@entries mask; $($body)+);
        mask
    }};
}

#[cfg(test)]
mod tests {
    use crate::{FieldKey, Mask};

    #[test]
    fn test_mask_macro_leaf() {
        assert_eq!(mask!({}), Mask::new());
        assert!(mask!({}).is_empty());
    }

    #[test]
    fn test_mask_macro_keys() {
        let m = mask!({ "a": {}, "b": { "c": {} } });
        assert_eq!(m.field_parts.len(), 2);
        assert!(m.any.is_none());
        assert_eq!(m.get("a"), Some(&Mask::new()));
        assert!(m.get("b").unwrap().get("c").unwrap().is_empty());
    }

    #[test]
    fn test_mask_macro_wildcard() {
        let m = mask!({ *: { "x": {} }, "y": {}, });
        assert_eq!(m.marshal(), "*.x,y");
        assert!(m.any().unwrap().field_parts.contains_key(&FieldKey::from("x")));
    }

    #[test]
    fn test_mask_macro_last_entry_wins() {
        let m = mask!({ "a": { "b": {} }, "a": {} });
        assert_eq!(m, mask!({ "a": {} }));
    }
}
