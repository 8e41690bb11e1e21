#![allow(dead_code)]
#![cfg(test)]
use std::cell::Cell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::{Duration, Instant};

use zeroize::Zeroizing;

use crate::adapters::InMemoryKeyStore;
use crate::application::HandshakeConfig;
use crate::application::handshake::HandshakeOrchestrator;
use crate::domain::session::{FlowRole, SessionDescriptor, SessionId, SymmetricKey};
use crate::ports::{
    Clock, KeyStore, Navigator, RenderError, RenderHint, RenderSurface, ScanSurface,
};
use crate::protocol::descriptor::{Payload, encode_descriptor};

/// Key whose bytes are all `b`.
pub fn mk_key(b: u8) -> SymmetricKey {
    SymmetricKey::from([b; 32])
}

pub fn mk_initiator_descriptor(b: u8) -> SessionDescriptor {
    SessionDescriptor::initiator(mk_key(b))
}

/// Encoded payload of an origin-device descriptor.
pub fn mk_payload(b: u8, role: FlowRole) -> Vec<u8> {
    let d = SessionDescriptor::new(mk_key(b), role, true);
    encode_descriptor(&d).unwrap().as_bytes().to_vec()
}

pub fn sid() -> SessionId {
    SessionId::from("session-1")
}

/// Store holding `key_bytes` for [`sid`].
pub fn mk_store(key_bytes: &[u8]) -> CountingKeyStore {
    let mut inner = InMemoryKeyStore::new();
    inner.insert(sid(), key_bytes.to_vec());
    CountingKeyStore { inner, clears: 0 }
}

/// Key store that counts `clear` calls.
#[derive(Debug, Default)]
pub struct CountingKeyStore {
    pub inner: InMemoryKeyStore,
    pub clears: usize,
}

impl CountingKeyStore {
    pub fn holds(&self, session: &SessionId) -> bool {
        self.inner.contains(session)
    }
}

impl KeyStore for CountingKeyStore {
    fn get(&self, session: &SessionId) -> Option<Zeroizing<Vec<u8>>> {
        self.inner.get(session)
    }
    fn clear(&mut self, session: &SessionId) {
        self.clears += 1;
        self.inner.clear(session);
    }
}

/// Renderer that records every payload and hint it was given.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pub rendered: Vec<(Vec<u8>, RenderHint)>,
    pub fail: bool,
}

impl RecordingRenderer {
    pub fn failing() -> Self {
        Self {
            rendered: Vec::new(),
            fail: true,
        }
    }

    pub fn last(&self) -> Option<&[u8]> {
        self.rendered.last().map(|(b, _)| b.as_slice())
    }
}

impl RenderSurface for RecordingRenderer {
    fn render(&mut self, payload: &Payload, hint: RenderHint) -> Result<(), RenderError> {
        if self.fail {
            return Err(RenderError::Encode("surface unavailable".into()));
        }
        self.rendered.push((payload.as_bytes().to_vec(), hint));
        Ok(())
    }
}

/// Scanner fed from a queue.
#[derive(Debug, Default)]
pub struct QueueScanner(pub VecDeque<Vec<u8>>);

impl ScanSurface for QueueScanner {
    fn next_scan(&mut self) -> Option<Vec<u8>> {
        self.0.pop_front()
    }
}

#[derive(Debug, Default)]
pub struct CountingNavigator {
    pub left: usize,
}

impl Navigator for CountingNavigator {
    fn leave(&mut self) {
        self.left += 1;
    }
}

/// Clock that only moves when told to. Clones share the same time, so a test
/// can keep one handle and give the other to an orchestrator.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Rc<Cell<Instant>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            now: Rc::new(Cell::new(Instant::now())),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.now.get()
    }
}

pub type TestOrchestrator = HandshakeOrchestrator<CountingKeyStore, RecordingRenderer, ManualClock>;

pub fn mk_orchestrator(
    role: FlowRole,
    store: CountingKeyStore,
    renderer: RecordingRenderer,
    clock: ManualClock,
) -> TestOrchestrator {
    HandshakeOrchestrator::new(sid(), role, store, renderer, clock, HandshakeConfig::default())
}

#[test]
fn manual_clock_clones_share_time() {
    let a = ManualClock::new();
    let b = a.clone();
    let t0 = b.now();
    a.advance(Duration::from_secs(5));
    assert_eq!(b.now() - t0, Duration::from_secs(5));
}
