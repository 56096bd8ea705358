//! Error types for field mask parsing, marshaling and conversion.
//!
//! ## Error Categories
//!
//! - **Malformed keys**: a marshaled [`FieldKey`](crate::FieldKey) is neither a simple
//!   token nor a valid quoted string
//! - **Parse errors**: lexing or grammar failures, always with the byte offset and a
//!   short excerpt of the source around it
//! - **Ambiguity**: a mask with a wildcard or several branches cannot be turned into a
//!   single [`FieldPath`](crate::FieldPath)
//! - **Header errors**: a reset mask cannot be carried in (or read from) a header value
//!
//! ## Examples
//!
//! ```rust
//! use fieldmask::{parse, ParseErrorKind};
//!
//! let err = parse("a.(b,c").unwrap_err();
//! assert_eq!(err.kind(), Some(ParseErrorKind::UnclosedLeftBrace));
//! assert_eq!(err.position(), Some(2));
//! assert!(err.to_string().starts_with("unclosed left brace at position 2"));
//! ```

use std::fmt;
use thiserror::Error;

/// Maximum number of characters of source shown in a parse error excerpt.
const MAX_CONTEXT: usize = 30;
/// Number of characters shown before the error position.
const CONTEXT_BACK: usize = 12;
/// Combining enclosing square, drawn over the character at the error position.
const ERROR_MARK: char = '\u{20de}';

/// The kind of failure behind an [`Error::Parse`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ParseErrorKind {
    /// A character that starts no token.
    UnexpectedSymbol,
    /// A quoted key without its closing quote.
    UnterminatedString,
    /// A quoted key whose escapes are not valid JSON string escapes.
    InvalidQuotedKey,
    /// A `)` with no open `(`.
    UnmatchedRightBrace,
    /// Input ended while a `(` was still open.
    UnclosedLeftBrace,
    /// A token that is not allowed in the current parser state.
    UnexpectedToken,
    /// Input ended where a key or sub-mask was expected.
    UnexpectedEnd,
    /// The mask nests deeper than [`ParseOptions::max_depth`](crate::ParseOptions).
    DepthLimitExceeded,
    /// The source is longer than [`ParseOptions::max_length`](crate::ParseOptions).
    LengthLimitExceeded,
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ParseErrorKind::UnexpectedSymbol => "unexpected symbol",
            ParseErrorKind::UnterminatedString => "unterminated quoted string",
            ParseErrorKind::InvalidQuotedKey => "invalid quoted key",
            ParseErrorKind::UnmatchedRightBrace => "unmatched right brace",
            ParseErrorKind::UnclosedLeftBrace => "unclosed left brace",
            ParseErrorKind::UnexpectedToken => "unexpected token",
            ParseErrorKind::UnexpectedEnd => "unexpected end of mask",
            ParseErrorKind::DepthLimitExceeded => "depth limit exceeded",
            ParseErrorKind::LengthLimitExceeded => "length limit exceeded",
        };
        f.write_str(name)
    }
}

/// Represents all possible errors of the field mask engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A marshaled field key is neither a simple token nor a valid quoted string.
    #[error("malformed FieldKey string {0:?}")]
    MalformedKey(String),

    /// Lexing or parsing failed.
    #[error("{summary} {context}")]
    Parse {
        kind: ParseErrorKind,
        summary: String,
        position: usize,
        context: String,
    },

    /// The mask contains a wildcard and cannot be reduced to a single path.
    #[error("wildcard in the mask")]
    WildcardInMask,

    /// The mask branches into more than one key and cannot be reduced to a single path.
    #[error("multiple paths in the mask")]
    MultiplePaths,

    /// A reset mask header could not be written or read.
    #[error("invalid reset mask header: {0}")]
    InvalidHeader(String),
}

impl Error {
    /// Creates a parse error at byte offset `position` of `source`.
    ///
    /// The rendered message carries the summary followed by an excerpt of the source
    /// with the error position marked.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fieldmask::{Error, ParseErrorKind};
    ///
    /// let err = Error::parse(ParseErrorKind::UnexpectedSymbol, "a.b!c", 3, "unexpected symbol");
    /// assert_eq!(err.to_string(), "unexpected symbol at position 3 near \"a.b\u{20de}!c\"");
    /// ```
    pub fn parse(kind: ParseErrorKind, source: &str, position: usize, summary: &str) -> Self {
        Error::Parse {
            kind,
            summary: summary.to_string(),
            position,
            context: context_around(source, position),
        }
    }

    /// Creates a malformed key error for the given marshaled key.
    pub fn malformed_key(marshaled: &str) -> Self {
        Error::MalformedKey(marshaled.to_string())
    }

    /// Creates a header error with a display message.
    pub fn invalid_header<T: fmt::Display>(msg: T) -> Self {
        Error::InvalidHeader(msg.to_string())
    }

    /// Returns the parse error kind, or `None` for non-parse errors.
    #[must_use]
    pub fn kind(&self) -> Option<ParseErrorKind> {
        match self {
            Error::Parse { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    /// Returns the byte offset of a parse error.
    #[must_use]
    pub fn position(&self) -> Option<usize> {
        match self {
            Error::Parse { position, .. } => Some(*position),
            _ => None,
        }
    }

    /// Returns `true` for lexing and parsing failures.
    #[must_use]
    pub fn is_parse(&self) -> bool {
        matches!(self, Error::Parse { .. })
    }

    /// Returns `true` if the error reports a mask that is not a single path.
    #[must_use]
    pub fn is_ambiguity(&self) -> bool {
        matches!(self, Error::WildcardInMask | Error::MultiplePaths)
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Renders `at position N near "..."` for a byte offset into `source`.
fn context_around(source: &str, position: usize) -> String {
    let position = floor_char_boundary(source, position);
    let char_pos = source[..position].chars().count();
    let ctx_start = char_pos.saturating_sub(CONTEXT_BACK);
    let delta = char_pos - ctx_start;

    let tail: Vec<char> = source.chars().skip(ctx_start).collect();
    let mut excerpt: Vec<char> = if tail.len() > MAX_CONTEXT {
        let mut cut = tail[..MAX_CONTEXT - 3].to_vec();
        cut.extend("...".chars());
        cut
    } else {
        tail
    };
    excerpt.insert(delta.min(excerpt.len()), ERROR_MARK);

    let excerpt: String = excerpt.into_iter().collect();
    format!(
        "at position {} near {}",
        position,
        crate::key::quote(&excerpt, false)
    )
}

fn floor_char_boundary(source: &str, mut position: usize) -> usize {
    if position >= source.len() {
        return source.len();
    }
    while !source.is_char_boundary(position) {
        position -= 1;
    }
    position
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_short_source() {
        let err = Error::parse(ParseErrorKind::UnexpectedSymbol, "a!", 1, "unexpected symbol");
        assert_eq!(
            err.to_string(),
            "unexpected symbol at position 1 near \"a\u{20de}!\""
        );
    }

    #[test]
    fn test_context_is_trimmed_on_both_sides() {
        let source = "abcdefghijklmnopqrstuvwxyz0123456789abcdefghij";
        let err = Error::parse(ParseErrorKind::UnexpectedToken, source, 20, "bad");
        // 12 chars back from position 20, then 27 chars and an ellipsis.
        assert_eq!(
            err.to_string(),
            "bad at position 20 near \"ijklmnopqrst\u{20de}uvwxyz012345678...\""
        );
    }

    #[test]
    fn test_context_at_end_of_source() {
        let err = Error::parse(ParseErrorKind::UnclosedLeftBrace, "a.(", 3, "x");
        assert_eq!(err.to_string(), "x at position 3 near \"a.(\u{20de}\"");
    }

    #[test]
    fn test_context_counts_characters_not_bytes() {
        let source = "\"ключ\" ?";
        let err = Error::parse(ParseErrorKind::UnexpectedSymbol, source, source.len() - 1, "s");
        assert_eq!(err.position(), Some(source.len() - 1));
        assert!(err.to_string().ends_with("near \"\\\"ключ\\\" \u{20de}?\""));
    }

    #[test]
    fn test_accessors() {
        let err = Error::parse(ParseErrorKind::UnexpectedEnd, "a.", 2, "unexpected end of mask");
        assert!(err.is_parse());
        assert!(!err.is_ambiguity());
        assert_eq!(err.kind(), Some(ParseErrorKind::UnexpectedEnd));

        assert!(Error::MultiplePaths.is_ambiguity());
        assert_eq!(Error::WildcardInMask.kind(), None);
        assert_eq!(Error::WildcardInMask.position(), None);
    }

    #[test]
    fn test_malformed_key_message() {
        let err = Error::malformed_key("a b");
        assert_eq!(err.to_string(), "malformed FieldKey string \"a b\"");
    }
}
