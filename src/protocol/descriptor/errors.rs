use crate::core::cbor::CodecError;
use crate::domain::session::DescriptorError;
use thiserror::Error;

/// Failures converting between a descriptor and its transport payload.
#[derive(Debug, Error)]
pub enum PayloadError {
    /// Version tag not understood by this build; never guessed at.
    #[error("unsupported payload version 0x{0:02x}")]
    UnsupportedVersion(u8),

    /// Layout does not match the expected field boundaries.
    #[error("malformed payload: {0}")]
    Malformed(String),

    /// Payload (or the payload that would be produced) exceeds the size bound.
    #[error("payload of {len} bytes exceeds the {max}-byte limit")]
    TooLarge { len: usize, max: usize },

    /// Structurally sound payload whose field values fail domain validation.
    #[error("invalid descriptor: {0}")]
    Descriptor(#[from] DescriptorError),
}

impl From<CodecError> for PayloadError {
    fn from(e: CodecError) -> Self {
        PayloadError::Malformed(e.to_string())
    }
}
