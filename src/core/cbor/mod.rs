//! Strict, canonical CBOR helpers.
//!
//! Infrastructure only:
//! - `to_cbor` serializes any `T: Serialize` with **ciborium**, which emits the
//!   deterministic encoding, so equal values always produce equal bytes.
//! - `from_cbor` is always strict: exactly one item, no trailing bytes, and the
//!   input must be the unique canonical form of the decoded value.
//!
//! Notes:
//! - `from_cbor` expects the bare CBOR item. Strip any version/frame preamble
//!   first (the descriptor wire layer does this).

use serde::{Serialize, de::DeserializeOwned};
use std::io::Cursor;

/// Errors produced by the generic codec.
#[derive(thiserror::Error, Debug)]
pub enum CodecError {
    /// Error produced during serialization.
    #[error("CBOR serialize error: {0}")]
    Ser(#[from] ciborium::ser::Error<std::io::Error>),

    /// Error produced during deserialization (truncation, wrong types, ...).
    #[error("CBOR deserialize error: {0}")]
    De(#[from] ciborium::de::Error<std::io::Error>),

    /// A valid item was followed by more bytes.
    #[error("{0} trailing bytes after CBOR value")]
    Trailing(usize),

    /// Well-formed CBOR that is not the deterministic encoding of its value.
    #[error("CBOR input is not in canonical/deterministic form")]
    NonCanonical,
}

/// Serialize `v` to canonical CBOR bytes.
///
/// # Errors
/// Returns [`CodecError::Ser`] if serialization fails.
pub fn to_cbor<T: Serialize>(v: &T) -> Result<Vec<u8>, CodecError> {
    let mut buf = Vec::with_capacity(64);
    ciborium::ser::into_writer(v, &mut buf)?;
    Ok(buf)
}

/// Deserialize `T` from exactly `b`, enforcing strict canonical input.
///
/// # Errors
/// * [`CodecError::De`] if the bytes do not decode as `T`.
/// * [`CodecError::Trailing`] if bytes remain after the item.
/// * [`CodecError::NonCanonical`] if the input is not the canonical form.
pub fn from_cbor<T: DeserializeOwned + Serialize>(b: &[u8]) -> Result<T, CodecError> {
    let mut cur = Cursor::new(b);
    let value: T = ciborium::de::from_reader(&mut cur)?;
    let consumed = usize::try_from(cur.position()).unwrap_or(usize::MAX);
    if consumed < b.len() {
        return Err(CodecError::Trailing(b.len() - consumed));
    }
    let canon = to_cbor(&value)?;
    if canon != b {
        return Err(CodecError::NonCanonical);
    }
    Ok(value)
}
