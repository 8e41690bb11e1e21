use super::errors::PayloadError;
use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use core::fmt;
use zeroize::Zeroizing;

/// Upper bound on an encoded descriptor. A v1 payload is 38 bytes; the bound
/// leaves headroom for the byte-string header while keeping the QR code at a
/// density phone cameras read reliably.
pub const MAX_PAYLOAD_LEN: usize = 64;

/// Prefix identifying armored descriptor text.
pub const ARMOR_PREFIX: &str = "VSTA:";

/// Longest unpadded base64 body that can decode to [`MAX_PAYLOAD_LEN`] bytes.
const MAX_ARMORED_BODY_LEN: usize = (MAX_PAYLOAD_LEN * 4).div_ceil(3);

/// Encoded descriptor bytes.
///
/// Contains key material: the buffer is zeroized on drop and `Debug` prints
/// only the length.
#[derive(Clone, PartialEq, Eq)]
pub struct Payload(Zeroizing<Vec<u8>>);

impl fmt::Debug for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Payload(len={})", self.0.len())
    }
}

impl Payload {
    /// Wrap raw bytes (e.g. from a scanner), enforcing the size bound.
    ///
    /// # Errors
    /// `PayloadError::TooLarge` if `bytes` exceeds [`MAX_PAYLOAD_LEN`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PayloadError> {
        Self::from_vec(bytes.to_vec())
    }

    pub(crate) fn from_vec(bytes: Vec<u8>) -> Result<Self, PayloadError> {
        let bytes = Zeroizing::new(bytes);
        if bytes.len() > MAX_PAYLOAD_LEN {
            return Err(PayloadError::TooLarge {
                len: bytes.len(),
                max: MAX_PAYLOAD_LEN,
            });
        }
        Ok(Payload(bytes))
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Printable form: [`ARMOR_PREFIX`] followed by unpadded URL-safe base64.
    #[must_use]
    pub fn to_armored(&self) -> Zeroizing<String> {
        let mut text = String::with_capacity(ARMOR_PREFIX.len() + self.0.len() * 4 / 3 + 4);
        text.push_str(ARMOR_PREFIX);
        URL_SAFE_NO_PAD.encode_string(self.as_bytes(), &mut text);
        Zeroizing::new(text)
    }

    /// Parse armored text as delivered by a scanner. Surrounding whitespace is
    /// ignored.
    ///
    /// # Errors
    /// * `Malformed` if the prefix is missing or the body is not valid base64.
    /// * `TooLarge` if the body is longer than any bounded payload could
    ///   encode to (checked before decoding), or the decoded bytes exceed
    ///   [`MAX_PAYLOAD_LEN`].
    pub fn from_armored(text: &str) -> Result<Self, PayloadError> {
        let body = text
            .trim()
            .strip_prefix(ARMOR_PREFIX)
            .ok_or_else(|| PayloadError::Malformed("missing armor prefix".into()))?;
        if body.len() > MAX_ARMORED_BODY_LEN {
            return Err(PayloadError::TooLarge {
                len: body.len() * 3 / 4,
                max: MAX_PAYLOAD_LEN,
            });
        }
        let bytes = URL_SAFE_NO_PAD
            .decode(body)
            .map_err(|e| PayloadError::Malformed(format!("armor: {e}")))?;
        Self::from_vec(bytes)
    }
}

impl AsRef<[u8]> for Payload {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}
