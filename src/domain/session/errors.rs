use thiserror::Error;

/// Validation failures raised while building a [`SessionDescriptor`].
///
/// [`SessionDescriptor`]: super::SessionDescriptor
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DescriptorError {
    /// Key material present but zero bytes long.
    #[error("symmetric key must not be empty")]
    EmptyKey,
    /// Key shorter than the versioned key length.
    #[error("symmetric key length mismatch: expected {expected}, got {actual}")]
    KeyLengthMismatch { expected: usize, actual: usize },
    /// Key longer than the supported maximum; never encoded.
    #[error("symmetric key of {actual} bytes exceeds the {max}-byte maximum")]
    KeyTooLarge { actual: usize, max: usize },
    /// Role code outside the defined set. Wide enough for any CBOR unsigned
    /// integer a peer might put in the role field.
    #[error("unknown flow role code 0x{0:02x}")]
    InvalidRoleCode(u64),
    /// Role name outside the defined set.
    #[error("unknown flow role {0:?}")]
    InvalidRoleName(String),
}

impl DescriptorError {
    /// True for the empty/short key cases (as opposed to an oversized key).
    #[must_use]
    pub fn is_invalid_key_material(&self) -> bool {
        matches!(self, Self::EmptyKey | Self::KeyLengthMismatch { .. })
    }

    /// True for both role variants.
    #[must_use]
    pub fn is_invalid_role(&self) -> bool {
        matches!(self, Self::InvalidRoleCode(_) | Self::InvalidRoleName(_))
    }
}
