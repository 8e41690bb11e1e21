//! Version preamble for descriptor payloads.

use super::errors::PayloadError;

/// Known payload format versions.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadVersion {
    V1 = 0x01,
}

impl PayloadVersion {
    /// Version emitted by this build.
    pub const CURRENT: PayloadVersion = PayloadVersion::V1;
}

impl TryFrom<u8> for PayloadVersion {
    type Error = PayloadError;
    fn try_from(v: u8) -> Result<Self, Self::Error> {
        match v {
            0x01 => Ok(Self::V1),
            other => Err(PayloadError::UnsupportedVersion(other)),
        }
    }
}

#[inline]
#[must_use]
pub fn prepend_version(version: PayloadVersion, body: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(1 + body.len());
    out.push(version as u8);
    out.extend_from_slice(body);
    out
}

/// Split the version tag from the body.
///
/// # Errors
/// * `Malformed` for empty input.
/// * `UnsupportedVersion` for an unknown tag.
#[inline]
pub fn split_version(input: &[u8]) -> Result<(PayloadVersion, &[u8]), PayloadError> {
    let (&tag, body) = input
        .split_first()
        .ok_or_else(|| PayloadError::Malformed("empty payload".into()))?;
    let version = PayloadVersion::try_from(tag)?;
    Ok((version, body))
}
