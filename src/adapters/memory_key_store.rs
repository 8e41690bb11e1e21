use std::collections::HashMap;

use zeroize::Zeroizing;

use crate::domain::session::{SessionId, SymmetricKey};
use crate::ports::KeyStore;

/// Process-local key store. Entries are zeroized when removed or when the
/// store is dropped.
#[derive(Default)]
pub struct InMemoryKeyStore {
    entries: HashMap<SessionId, Zeroizing<Vec<u8>>>,
}

impl InMemoryKeyStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store raw bytes for `session`, replacing any previous entry.
    pub fn insert(&mut self, session: SessionId, bytes: impl Into<Vec<u8>>) {
        self.entries.insert(session, Zeroizing::new(bytes.into()));
    }

    /// Store a validated key for `session`.
    pub fn insert_key(&mut self, session: SessionId, key: &SymmetricKey) {
        self.insert(session, key.as_bytes().to_vec());
    }

    #[must_use]
    pub fn contains(&self, session: &SessionId) -> bool {
        self.entries.contains_key(session)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyStore for InMemoryKeyStore {
    fn get(&self, session: &SessionId) -> Option<Zeroizing<Vec<u8>>> {
        self.entries.get(session).cloned()
    }

    fn clear(&mut self, session: &SessionId) {
        self.entries.remove(session);
    }
}

impl std::fmt::Debug for InMemoryKeyStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryKeyStore")
            .field("sessions", &self.entries.len())
            .finish()
    }
}
