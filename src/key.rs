//! Field keys: single segments of a field path.
//!
//! A [`FieldKey`] holds any string. In the mask grammar a key is written bare when it
//! matches `[a-zA-Z0-9_]+` and as a JSON string literal otherwise:
//!
//! ```rust
//! use fieldmask::FieldKey;
//!
//! assert_eq!(FieldKey::from("spec").marshal(), "spec");
//! assert_eq!(FieldKey::from("weird key").marshal(), "\"weird key\"");
//! assert_eq!(FieldKey::from("").marshal(), "\"\"");
//! ```

use std::borrow::Borrow;
use std::fmt::{self, Display, Formatter, Write};
use std::ops::Deref;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// A single segment name of a [`FieldPath`](crate::FieldPath).
///
/// Equality is exact string equality; no normalization is applied.
#[derive(Clone, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldKey(String);

impl FieldKey {
    /// Creates a key from any string.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        FieldKey(value.into())
    }

    /// Returns the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if the key can be written without quotes.
    #[must_use]
    pub fn is_simple(&self) -> bool {
        is_simple(&self.0)
    }

    /// Writes the key in mask grammar form, quoting it when needed.
    ///
    /// Quoted keys only ever contain ASCII, so the output is safe for header values.
    #[must_use]
    pub fn marshal(&self) -> String {
        if self.is_simple() {
            self.0.clone()
        } else {
            quote(&self.0, true)
        }
    }

    /// Reads a key written by [`FieldKey::marshal`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedKey`] if the input is neither a simple token nor a
    /// valid JSON string literal.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fieldmask::FieldKey;
    ///
    /// assert_eq!(FieldKey::unmarshal("name").unwrap(), "name");
    /// assert_eq!(FieldKey::unmarshal(r#""a \"b\"""#).unwrap(), "a \"b\"");
    /// assert!(FieldKey::unmarshal("a.b").is_err());
    /// ```
    pub fn unmarshal(marshaled: &str) -> Result<Self> {
        if marshaled.starts_with('"') {
            return unquote(marshaled)
                .map(FieldKey)
                .ok_or_else(|| Error::malformed_key(marshaled));
        }
        if is_simple(marshaled) {
            return Ok(FieldKey(marshaled.to_string()));
        }
        Err(Error::malformed_key(marshaled))
    }
}

impl AsRef<str> for FieldKey {
    fn as_ref(&self) -> &str {
        self
    }
}

impl Borrow<str> for FieldKey {
    fn borrow(&self) -> &str {
        self
    }
}

impl Deref for FieldKey {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        self.0.as_str()
    }
}

impl Display for FieldKey {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(self)
    }
}

impl From<&str> for FieldKey {
    fn from(value: &str) -> Self {
        FieldKey(value.to_string())
    }
}

impl From<String> for FieldKey {
    fn from(value: String) -> Self {
        FieldKey(value)
    }
}

impl From<&String> for FieldKey {
    fn from(value: &String) -> Self {
        FieldKey(value.clone())
    }
}

impl From<FieldKey> for String {
    fn from(key: FieldKey) -> Self {
        key.0
    }
}

impl FromStr for FieldKey {
    type Err = Error;

    fn from_str(source: &str) -> Result<FieldKey> {
        FieldKey::unmarshal(source)
    }
}

impl PartialEq<str> for FieldKey {
    fn eq(&self, rhs: &str) -> bool {
        &**self == rhs
    }
}

impl<'a> PartialEq<&'a str> for FieldKey {
    fn eq(&self, rhs: &&str) -> bool {
        &**self == *rhs
    }
}

impl PartialEq<String> for FieldKey {
    fn eq(&self, rhs: &String) -> bool {
        &self.0 == rhs
    }
}

/// `[a-zA-Z0-9_]+`
pub(crate) fn is_simple(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(is_simple_byte)
}

pub(crate) fn is_simple_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Writes `value` as a JSON string literal.
///
/// Control characters are always escaped. With `ascii_only`, every non-ASCII character
/// is escaped as `\uXXXX` (UTF-16 units) too.
pub(crate) fn quote(value: &str, ascii_only: bool) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for ch in value.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{0008}' => out.push_str("\\b"),
            '\u{000C}' => out.push_str("\\f"),
            c if (c as u32) < 0x20 || c == '\u{7f}' => push_escaped(&mut out, c),
            c if ascii_only && !c.is_ascii() => push_escaped(&mut out, c),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

fn push_escaped(out: &mut String, ch: char) {
    let mut units = [0u16; 2];
    for unit in ch.encode_utf16(&mut units) {
        // Writing into a String cannot fail.
        let _ = write!(out, "\\u{:04x}", unit);
    }
}

/// Decodes a JSON string literal, `None` if it is not one.
pub(crate) fn unquote(literal: &str) -> Option<String> {
    serde_json::from_str::<String>(literal).ok()
}
