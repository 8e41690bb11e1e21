use crate::domain::session::SessionId;
use zeroize::Zeroizing;

/// Local key-value store holding the symmetric key established for a session
/// by an earlier key-agreement step.
///
/// The handshake only reads and clears; it never writes keys. Values are raw
/// bytes as stored: the orchestrator validates them before building a
/// descriptor, so a corrupted entry surfaces as invalid key material rather
/// than being trusted.
///
/// Contract:
/// - `get` returns an owned, zeroizing copy; `None` when nothing is stored.
/// - `clear` is idempotent and must remove the entry before returning.
pub trait KeyStore {
    /// Fetch the stored key bytes for `session`.
    fn get(&self, session: &SessionId) -> Option<Zeroizing<Vec<u8>>>;

    /// Remove any key stored for `session`.
    fn clear(&mut self, session: &SessionId);
}
