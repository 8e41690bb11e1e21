//! Wire encoding for `SessionDescriptor` (format v1).

use super::errors::PayloadError;
use super::frame::{PayloadVersion, prepend_version, split_version};
use super::key_bytes::WireKey;
use super::payload::{MAX_PAYLOAD_LEN, Payload};
use crate::core::cbor::{from_cbor, to_cbor};
use crate::domain::session::{
    DescriptorError, FlowRole, SYMMETRIC_KEY_LEN, SessionDescriptor, SymmetricKey,
};
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

/// v1 body: fields in fixed order, encoded as a CBOR array. The role is read
/// as any unsigned integer so that out-of-range codes reach role validation
/// instead of failing inside the CBOR layer.
#[derive(Serialize, Deserialize)]
struct WireDescriptorV1(WireKey, u64, bool);

/// Encode a descriptor: `[version][canonical CBOR body]`.
///
/// Deterministic: the same descriptor always yields identical bytes.
///
/// # Errors
/// * `TooLarge` if the result would exceed [`MAX_PAYLOAD_LEN`]; nothing is
///   returned in that case.
/// * `Malformed` if CBOR serialization fails.
pub fn encode_descriptor(d: &SessionDescriptor) -> Result<Payload, PayloadError> {
    let body = WireDescriptorV1(
        WireKey::from_slice(d.symmetric_key().as_bytes()),
        u64::from(d.flow_role().code()),
        d.is_origin_device(),
    );
    let cbor = Zeroizing::new(to_cbor(&body)?);
    let framed = prepend_version(PayloadVersion::CURRENT, &cbor);
    Payload::from_vec(framed)
}

/// Decode and validate an untrusted payload.
///
/// Order of checks: size bound, version tag, strict canonical CBOR, then
/// domain validation of key and role. A descriptor is returned only when every
/// field passed.
///
/// # Errors
/// * `TooLarge` if the input exceeds [`MAX_PAYLOAD_LEN`].
/// * `UnsupportedVersion` for an unknown version tag.
/// * `Malformed` for truncated, trailing, non-canonical or mistyped bodies.
/// * `Descriptor(..)` when a field value fails domain validation.
pub fn decode_descriptor(bytes: &[u8]) -> Result<SessionDescriptor, PayloadError> {
    if bytes.len() > MAX_PAYLOAD_LEN {
        return Err(PayloadError::TooLarge {
            len: bytes.len(),
            max: MAX_PAYLOAD_LEN,
        });
    }
    let (version, body) = split_version(bytes)?;
    match version {
        PayloadVersion::V1 => {
            let WireDescriptorV1(key, role, origin) = from_cbor(body)?;
            let symmetric_key =
                SymmetricKey::try_from(key.as_slice()).map_err(oversized_key_as_mismatch)?;
            let flow_role = FlowRole::try_from(role)?;
            Ok(SessionDescriptor::new(symmetric_key, flow_role, origin))
        }
    }
}

// A received payload has already passed the size bound, so an over-long key
// inside it is wrong-length key material, not an oversized payload.
fn oversized_key_as_mismatch(e: DescriptorError) -> DescriptorError {
    match e {
        DescriptorError::KeyTooLarge { actual, .. } => DescriptorError::KeyLengthMismatch {
            expected: SYMMETRIC_KEY_LEN,
            actual,
        },
        other => other,
    }
}
