//! # fieldmask
//!
//! Field masks for partial updates of structured messages: a small text language, the
//! tree it describes and the set algebra used to combine masks.
//!
//! ## What is a field mask?
//!
//! A mask selects fields of a message by path. `spec.(name,labels)` selects the `name`
//! and `labels` fields of `spec`; `items.*.id` selects `id` in every element of `items`.
//! Masks are used two ways:
//!
//! - **Reset masks** list fields an update must reset to defaults. A path matches when
//!   the mask reaches it, and the whole field is reset when it ends on a leaf.
//! - **Select masks** restrict which fields are returned. An empty mask selects
//!   everything.
//!
//! ## Key Features
//!
//! - **Deterministic text form**: [`Mask::marshal`] sorts alternatives, so equal masks
//!   always marshal to the same string
//! - **Positioned errors**: every parse error carries the byte offset and an excerpt of
//!   the source around it
//! - **Two algebras**: "dumb" intersection and subtraction compare shapes only; the
//!   reset variants let a wildcard reach named keys
//! - **Header plumbing**: the [`reset`] module writes and reads reset masks in
//!   `x-resetmask` request headers
//!
//! ## Quick Start
//!
//! ```rust
//! use fieldmask::{parse, FieldPath};
//!
//! let mask = parse("spec.(name, labels.*), metadata").unwrap();
//! assert_eq!(mask.marshal(), "metadata,spec.(labels.*,name)");
//!
//! let path = FieldPath::from(["spec", "labels", "team"]);
//! assert!(path.matches_reset_mask(&mask));
//! assert!(!FieldPath::from(["spec", "size"]).matches_reset_mask(&mask));
//! ```
//!
//! ### Combining masks
//!
//! ```rust
//! use fieldmask::parse;
//!
//! let a = parse("a.b,c").unwrap();
//! let b = parse("a.x,c").unwrap();
//!
//! assert_eq!((&a + &b).marshal(), "a.(b,x),c");
//! assert_eq!((&a * &b).marshal(), "a,c");
//! ```
//!
//! ### Building masks in code
//!
//! ```rust
//! use fieldmask::{mask, FieldPath, Mask};
//!
//! let mut m = mask!({ "spec": { "name": {} } });
//! m += &FieldPath::from(["metadata", "labels"]);
//! assert_eq!(m.to_string(), "metadata.labels,spec.name");
//! ```
//!
//! ## Grammar
//!
//! ```text
//! mask  := alt ("," alt)*
//! alt   := item ("." item)*
//! item  := key | "*" | "(" [mask] ")"
//! key   := [a-zA-Z0-9_]+ | JSON string literal
//! ```
//!
//! A group continues every alternative inside it: `(a,b).c` is `a.c,b.c`. Whitespace
//! between tokens is ignored, and a blank source is the empty mask.

pub mod error;
pub mod key;
mod lexer;
pub mod macros;
pub mod mask;
pub mod options;
mod parser;
pub mod path;
pub mod reset;

pub use error::{Error, ParseErrorKind, Result};
pub use key::FieldKey;
pub use mask::Mask;
pub use options::{ParseOptions, DEFAULT_MAX_DEPTH};
pub use path::FieldPath;
pub use reset::{ensure_reset_mask, reset_mask_from_headers, FullUpdateMask, RESET_MASK_HEADER};

/// Parses a mask from its text form.
///
/// # Examples
///
/// ```rust
/// use fieldmask::parse;
///
/// let mask = parse("a.(b,c).d").unwrap();
/// assert_eq!(mask.marshal(), "a.(b.d,c.d)");
/// assert!(parse("").unwrap().is_empty());
/// ```
///
/// # Errors
///
/// Returns [`Error::Parse`] for input that is not a valid mask or nests deeper than
/// [`DEFAULT_MAX_DEPTH`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse(source: &str) -> Result<Mask> {
    parse_with_options(source, ParseOptions::default())
}

/// Parses a mask with depth and length limits.
///
/// # Examples
///
/// ```rust
/// use fieldmask::{parse_with_options, ParseOptions};
///
/// let options = ParseOptions::new().with_max_length(8);
/// assert!(parse_with_options("a.b", options.clone()).is_ok());
/// assert!(parse_with_options("a.b.c.d.e", options).is_err());
/// ```
///
/// # Errors
///
/// Returns [`Error::Parse`] for invalid input or input exceeding the limits.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse_with_options(source: &str, options: ParseOptions) -> Result<Mask> {
    parser::parse(source, &options)
}

/// Parses a mask from raw bytes, such as a header value.
///
/// # Examples
///
/// ```rust
/// use fieldmask::from_slice;
///
/// let mask = from_slice(b"spec.name").unwrap();
/// assert_eq!(mask.marshal(), "spec.name");
/// assert!(from_slice(b"spec.\xff").is_err());
/// ```
///
/// # Errors
///
/// Returns [`Error::Parse`] if the bytes are not UTF-8 or not a valid mask.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice(bytes: &[u8]) -> Result<Mask> {
    match std::str::from_utf8(bytes) {
        Ok(source) => parse(source),
        Err(err) => Err(Error::parse(
            ParseErrorKind::UnexpectedSymbol,
            &String::from_utf8_lossy(bytes),
            err.valid_up_to(),
            "invalid UTF-8",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mask;

    #[test]
    fn test_parse_and_marshal() {
        let mask = parse("b, a.(d, c)").unwrap();
        assert_eq!(mask.marshal(), "a.(c,d),b");
        assert_eq!(parse(&mask.marshal()).unwrap(), mask);
    }

    #[test]
    fn test_from_slice_invalid_utf8() {
        let err = from_slice(b"ab\xffcd").unwrap_err();
        assert_eq!(err.kind(), Some(ParseErrorKind::UnexpectedSymbol));
        assert_eq!(err.position(), Some(2));
        assert!(err.to_string().starts_with("invalid UTF-8 at position 2"));
    }

    #[test]
    fn test_from_str_trait() {
        let mask: Mask = "a.*".parse().unwrap();
        assert_eq!(mask, mask!({ "a": { *: {} } }));
    }

    #[test]
    fn test_error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Error>();
        assert_send_sync::<Mask>();
    }
}
