//! Configuration options for mask parsing.
//!
//! Masks usually arrive in request headers, so the parser can be told to refuse
//! oversized or deeply nested input before building the tree:
//!
//! ```rust
//! use fieldmask::{parse_with_options, ParseErrorKind, ParseOptions};
//!
//! let options = ParseOptions::new().with_max_depth(2).with_max_length(64);
//!
//! assert!(parse_with_options("spec.name", options.clone()).is_ok());
//!
//! let err = parse_with_options("spec.labels.name", options).unwrap_err();
//! assert_eq!(err.kind(), Some(ParseErrorKind::DepthLimitExceeded));
//! ```

/// Nesting depth allowed by [`ParseOptions::default`].
pub const DEFAULT_MAX_DEPTH: usize = 100;

/// Limits applied while parsing a mask.
///
/// The default allows [`DEFAULT_MAX_DEPTH`] levels and any length. The mask tree is
/// walked recursively by most operations, so the depth bound also bounds their stack
/// use.
///
/// # Examples
///
/// ```rust
/// use fieldmask::{ParseOptions, DEFAULT_MAX_DEPTH};
///
/// let options = ParseOptions::new();
/// assert_eq!(options.max_depth, Some(DEFAULT_MAX_DEPTH));
/// assert_eq!(options.max_length, None);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseOptions {
    /// Maximum number of nested levels in the resulting mask.
    pub max_depth: Option<usize>,
    /// Maximum length of the source in bytes.
    pub max_length: Option<usize>,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            max_depth: Some(DEFAULT_MAX_DEPTH),
            max_length: None,
        }
    }
}

impl ParseOptions {
    /// Creates the default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options without any limits.
    ///
    /// Only use this for trusted input: a deep enough mask overflows the stack when it
    /// is marshaled or dropped.
    #[must_use]
    pub fn unlimited() -> Self {
        ParseOptions {
            max_depth: None,
            max_length: None,
        }
    }

    /// Sets the maximum nesting depth.
    ///
    /// A key or wildcard that would create a node deeper than `depth` fails with
    /// [`ParseErrorKind::DepthLimitExceeded`](crate::ParseErrorKind) at that token.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fieldmask::ParseOptions;
    ///
    /// let options = ParseOptions::new().with_max_depth(8);
    /// assert_eq!(options.max_depth, Some(8));
    /// ```
    #[must_use]
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Sets the maximum source length in bytes.
    ///
    /// Longer sources fail with
    /// [`ParseErrorKind::LengthLimitExceeded`](crate::ParseErrorKind) before lexing.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fieldmask::ParseOptions;
    ///
    /// let options = ParseOptions::new().with_max_length(4096);
    /// assert_eq!(options.max_length, Some(4096));
    /// ```
    #[must_use]
    pub fn with_max_length(mut self, length: usize) -> Self {
        self.max_length = Some(length);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_chains() {
        let options = ParseOptions::new().with_max_length(10).with_max_depth(3);
        assert_eq!(
            options,
            ParseOptions {
                max_depth: Some(3),
                max_length: Some(10),
            }
        );
    }

    #[test]
    fn test_default_bounds_depth_only() {
        assert_eq!(ParseOptions::default().max_depth, Some(DEFAULT_MAX_DEPTH));
        assert_eq!(ParseOptions::default().max_length, None);
        assert_eq!(ParseOptions::new(), ParseOptions::default());
        assert_eq!(ParseOptions::unlimited().max_depth, None);
    }

    #[test]
    fn test_zero_depth_allows_only_empty_masks() {
        let options = ParseOptions::new().with_max_depth(0);
        assert!(crate::parse_with_options("  ", options.clone()).is_ok());
        assert!(crate::parse_with_options("()", options.clone()).is_ok());
        assert!(crate::parse_with_options("a", options).is_err());
    }
}
