use crate::domain::session::errors::DescriptorError;
use crate::domain::session::params::{FINGERPRINT_LEN, SYMMETRIC_KEY_LEN};
use core::{convert::TryFrom, fmt};
use rand::{CryptoRng, RngCore};
use sha2::{Digest, Sha256};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Symmetric key protecting a single file-transfer session.
///
/// The key is established out of band (a separate key-agreement step) and read
/// from the local key store when a session is prepared. This type only carries
/// it between the store, the codec and the transfer layer.
///
/// Construction options:
/// - `SymmetricKey::try_from(&[u8])` validates length (the path used for store
///   and wire input).
/// - `SymmetricKey::random(rng)` samples a fresh key from a caller-supplied CSPRNG.
/// - `SymmetricKey::from([u8; 32])` wraps an owned array.
///
/// Invariants:
/// - Always exactly [`SYMMETRIC_KEY_LEN`] bytes.
/// - Opaque: `Debug` is redacted; use [`SymmetricKey::fingerprint`] to correlate
///   log lines.
/// - Bytes are zeroized when the value is dropped.
///
/// # Examples
/// ```
/// use vesta_handshake::domain::session::SymmetricKey;
/// use std::convert::TryFrom;
/// let k = SymmetricKey::try_from(&[7u8; 32][..]).unwrap();
/// assert_eq!(k.as_bytes()[0], 7);
/// assert!(SymmetricKey::try_from(&[0u8; 31][..]).is_err());
/// assert!(SymmetricKey::try_from(&[0u8; 33][..]).is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct SymmetricKey([u8; SYMMETRIC_KEY_LEN]);

impl fmt::Debug for SymmetricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SymmetricKey(..)")
    }
}

impl SymmetricKey {
    /// Generate a fresh key using the provided CSPRNG.
    #[must_use]
    pub fn random<R: CryptoRng + RngCore>(rng: &mut R) -> Self {
        let mut arr = [0u8; SYMMETRIC_KEY_LEN];
        rng.fill_bytes(&mut arr);
        let key = SymmetricKey(arr);
        arr.zeroize();
        key
    }

    /// Borrow the raw key bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; SYMMETRIC_KEY_LEN] {
        &self.0
    }

    /// Short, non-reversible identifier for log correlation.
    #[must_use]
    pub fn fingerprint(&self) -> KeyFingerprint {
        let digest = Sha256::digest(self.0);
        let mut out = [0u8; FINGERPRINT_LEN];
        out.copy_from_slice(&digest[..FINGERPRINT_LEN]);
        KeyFingerprint(out)
    }
}

impl TryFrom<&[u8]> for SymmetricKey {
    type Error = DescriptorError;

    /// # Errors
    /// - `DescriptorError::EmptyKey` for a zero-length slice.
    /// - `DescriptorError::KeyLengthMismatch` for a short slice.
    /// - `DescriptorError::KeyTooLarge` for a slice over [`SYMMETRIC_KEY_LEN`].
    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        match value.len() {
            0 => Err(DescriptorError::EmptyKey),
            n if n < SYMMETRIC_KEY_LEN => Err(DescriptorError::KeyLengthMismatch {
                expected: SYMMETRIC_KEY_LEN,
                actual: n,
            }),
            n if n > SYMMETRIC_KEY_LEN => Err(DescriptorError::KeyTooLarge {
                actual: n,
                max: SYMMETRIC_KEY_LEN,
            }),
            _ => {
                let mut arr = [0u8; SYMMETRIC_KEY_LEN];
                arr.copy_from_slice(value);
                let key = SymmetricKey(arr);
                arr.zeroize();
                Ok(key)
            }
        }
    }
}

impl From<[u8; SYMMETRIC_KEY_LEN]> for SymmetricKey {
    fn from(value: [u8; SYMMETRIC_KEY_LEN]) -> Self {
        SymmetricKey(value)
    }
}

/// First bytes of SHA-256 over a key; safe to log.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyFingerprint([u8; FINGERPRINT_LEN]);

impl fmt::Display for KeyFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for b in &self.0 {
            write!(f, "{b:02x}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for KeyFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "KeyFingerprint({self})")
    }
}
