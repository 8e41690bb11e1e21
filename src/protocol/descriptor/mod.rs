//! Descriptor codec (format v1).
//!
//! Layout: `[version:1][canonical CBOR array(3): bstr key, uint role, bool origin]`.
//!
//! - [`encode_descriptor`] is deterministic and refuses to emit more than
//!   [`MAX_PAYLOAD_LEN`] bytes.
//! - [`decode_descriptor`] treats its input as untrusted: size bound, version
//!   tag, strict canonical CBOR, then domain validation of every field before a
//!   descriptor is returned.
//! - [`Payload::to_armored`] / [`Payload::from_armored`] wrap the bytes in a
//!   printable form for QR toolkits and camera scanners that deal in text.

pub mod errors;
pub mod frame;
mod key_bytes;
pub mod payload;
pub mod wire;

pub use errors::PayloadError;
pub use frame::{PayloadVersion, prepend_version, split_version};
pub use payload::{ARMOR_PREFIX, MAX_PAYLOAD_LEN, Payload};
pub use wire::{decode_descriptor, encode_descriptor};
