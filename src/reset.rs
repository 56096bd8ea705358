//! Reset masks carried in request headers.
//!
//! A full update sends the whole resource and a reset mask naming the fields that must
//! be reset to their defaults, because they are absent or default-valued in the
//! payload. The mask travels marshaled in the [`RESET_MASK_HEADER`] header.
//!
//! ```rust
//! use fieldmask::reset::{ensure_reset_mask, reset_mask_from_headers};
//! use http::HeaderMap;
//! use serde_json::json;
//!
//! let body = json!({ "name": "vm-1", "labels": {}, "disks": [] });
//!
//! let mut headers = HeaderMap::new();
//! ensure_reset_mask(&mut headers, &body).unwrap();
//!
//! let mask = reset_mask_from_headers(&headers).unwrap().unwrap();
//! assert_eq!(mask.marshal(), "disks.*,labels");
//! ```

use http::header::{HeaderMap, HeaderName, HeaderValue};
use serde_json::Value;

use crate::{Error, FieldKey, Mask, Result};

/// Name of the header carrying the marshaled reset mask.
pub const RESET_MASK_HEADER: &str = "x-resetmask";

/// Types that can describe which of their fields a full update resets.
pub trait FullUpdateMask {
    /// Returns the reset mask for sending `self` as a full update.
    fn full_update_reset_mask(&self) -> Mask;
}

/// Objects are treated as messages, arrays as repeated fields and everything else as
/// scalars.
///
/// - an object names every field whose own mask is non-empty or whose value is a
///   default (`null`, `false`, `0`, `""`, `[]`, `{}`)
/// - an empty array resets all elements (`*`)
/// - an array of objects puts the union of the element masks under `*`
/// - arrays of scalars and scalars contribute nothing
impl FullUpdateMask for Value {
    fn full_update_reset_mask(&self) -> Mask {
        match self {
            Value::Object(fields) => {
                let mut ret = Mask::new();
                for (name, value) in fields {
                    let nested = value.full_update_reset_mask();
                    if !nested.is_empty() || is_default(value) {
                        ret.insert(FieldKey::from(name), nested);
                    }
                }
                ret
            }
            Value::Array(items) if items.first().map_or(true, Value::is_object) => {
                let mut any = Mask::new();
                for item in items {
                    any.union_mask(&item.full_update_reset_mask());
                }
                let mut ret = Mask::new();
                ret.set_any(any);
                ret
            }
            _ => Mask::new(),
        }
    }
}

fn is_default(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(fields) => fields.is_empty(),
    }
}

/// Inserts the reset mask of `message` unless the header is already present.
///
/// # Errors
///
/// Returns [`Error::InvalidHeader`] if the marshaled mask is not a valid header value.
pub fn ensure_reset_mask<M>(headers: &mut HeaderMap, message: &M) -> Result<()>
where
    M: FullUpdateMask + ?Sized,
{
    if headers.contains_key(RESET_MASK_HEADER) {
        tracing::debug!(
            target: "fieldmask::reset",
            header = RESET_MASK_HEADER,
            "reset mask header already set, leaving it as is"
        );
        return Ok(());
    }

    let marshaled = message.full_update_reset_mask().marshal();
    let value = HeaderValue::from_str(&marshaled).map_err(Error::invalid_header)?;
    headers.insert(HeaderName::from_static(RESET_MASK_HEADER), value);

    tracing::debug!(
        target: "fieldmask::reset",
        header = RESET_MASK_HEADER,
        mask = %marshaled,
        "inserted reset mask header"
    );
    Ok(())
}

/// Reads and parses the reset mask header, `None` if it is absent.
///
/// # Errors
///
/// Returns [`Error::InvalidHeader`] for a value that is not UTF-8 and a parse error for
/// a value that is not a valid mask or nests deeper than
/// [`DEFAULT_MAX_DEPTH`](crate::DEFAULT_MAX_DEPTH).
pub fn reset_mask_from_headers(headers: &HeaderMap) -> Result<Option<Mask>> {
    let Some(value) = headers.get(RESET_MASK_HEADER) else {
        return Ok(None);
    };
    let text = std::str::from_utf8(value.as_bytes()).map_err(Error::invalid_header)?;
    crate::parse(text).map(Some)
}
