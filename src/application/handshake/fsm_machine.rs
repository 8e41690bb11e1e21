use std::time::Instant;

use tracing::{debug, info, warn};
use zeroize::Zeroizing;

use crate::application::config::HandshakeConfig;
use crate::domain::session::{FlowRole, SessionDescriptor, SessionId, SymmetricKey};
use crate::ports::{Clock, KeyStore, Navigator, RenderSurface, ScanSurface};
use crate::protocol::descriptor::{Payload, decode_descriptor, encode_descriptor};

use super::errors::ApplicationHandshakeError;
use super::fsm_types::{HandshakeEvent, HandshakeState};

/// Drives one device through the descriptor handshake for a single session.
///
/// The displaying device calls `prepare` then `render`; the scanning device
/// calls `begin_scan` then `ingest` (or `ingest_from`). Either side finishes
/// with `complete`, which hands the agreed descriptor to the transfer layer.
///
/// Error strategy: an operation called in the wrong state returns
/// `InvalidTransition` and changes nothing. Any other error moves the session
/// to `Failed(kind)`, drops the in-memory descriptor and clears the stored key.
/// There is no way out of `Failed`; a retry needs a new orchestrator.
pub struct HandshakeOrchestrator<K: KeyStore, R: RenderSurface, C: Clock> {
    session_id: SessionId,
    local_role: FlowRole,
    state: HandshakeState,
    key_store: K,
    renderer: R,
    clock: C,
    config: HandshakeConfig,
    active: Option<SessionDescriptor>,
    rendered_at: Option<Instant>,
}

impl<K: KeyStore, R: RenderSurface, C: Clock> HandshakeOrchestrator<K, R, C> {
    /// Start in `Idle` with no descriptor.
    pub fn new(
        session_id: SessionId,
        local_role: FlowRole,
        key_store: K,
        renderer: R,
        clock: C,
        config: HandshakeConfig,
    ) -> Self {
        Self {
            session_id,
            local_role,
            state: HandshakeState::Idle,
            key_store,
            renderer,
            clock,
            config,
            active: None,
            rendered_at: None,
        }
    }

    #[must_use]
    pub fn state(&self) -> HandshakeState {
        self.state
    }

    #[must_use]
    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    #[must_use]
    pub fn local_role(&self) -> FlowRole {
        self.local_role
    }

    /// Our prepared descriptor (initiator) or the accepted peer descriptor
    /// (joiner). `None` before that point and after the session ends.
    #[must_use]
    pub fn descriptor(&self) -> Option<&SessionDescriptor> {
        self.active.as_ref()
    }

    #[must_use]
    pub fn config(&self) -> &HandshakeConfig {
        &self.config
    }

    #[must_use]
    pub fn key_store(&self) -> &K {
        &self.key_store
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Initiator: snapshot the stored key into a descriptor
    /// (`Initiator`, origin device). `Idle → Prepared`.
    ///
    /// # Errors
    /// - `InvalidTransition` unless local role is `Initiator` and state `Idle`.
    /// - `NoLocalKey` if the store has nothing for this session.
    /// - `Descriptor` if the stored bytes are not a valid key.
    pub fn prepare(&mut self) -> Result<(), ApplicationHandshakeError> {
        self.ensure(HandshakeEvent::Prepare)?;
        let Some(bytes) = self.key_store.get(&self.session_id) else {
            return Err(self.fail(ApplicationHandshakeError::NoLocalKey(
                self.session_id.clone(),
            )));
        };
        let key = match SymmetricKey::try_from(bytes.as_slice()) {
            Ok(key) => key,
            Err(e) => return Err(self.fail(e.into())),
        };
        debug!(session = %self.session_id, key = %key.fingerprint(), "descriptor prepared");
        self.active = Some(SessionDescriptor::initiator(key));
        self.apply(HandshakeEvent::Prepare)
    }

    /// Initiator: encode the prepared descriptor and hand it to the rendering
    /// surface. `Prepared → Rendered`; starts the session timeout.
    ///
    /// # Errors
    /// - `InvalidTransition` outside `Prepared`.
    /// - `Payload` if the descriptor cannot be encoded.
    /// - `Render` if the surface rejects the payload.
    pub fn render(&mut self) -> Result<(), ApplicationHandshakeError> {
        self.ensure(HandshakeEvent::Render)?;
        let encoded = match self.active.as_ref() {
            Some(descriptor) => encode_descriptor(descriptor),
            None => return Err(self.invalid(HandshakeEvent::Render)),
        };
        let payload = match encoded {
            Ok(payload) => payload,
            Err(e) => return Err(self.fail(e.into())),
        };
        if let Err(e) = self.renderer.render(&payload, self.config.render_hint()) {
            return Err(self.fail(e.into()));
        }
        self.rendered_at = Some(self.clock.now());
        debug!(session = %self.session_id, len = payload.len(), "payload rendered");
        self.apply(HandshakeEvent::Render)
    }

    /// Joiner: start waiting for a scan. `Idle → AwaitingScan`.
    ///
    /// # Errors
    /// `InvalidTransition` outside `Idle`.
    pub fn begin_scan(&mut self) -> Result<(), ApplicationHandshakeError> {
        self.apply(HandshakeEvent::BeginScan)
    }

    /// Joiner: decode scanned bytes and accept the peer descriptor.
    /// `AwaitingScan → Parsed → Joined`.
    ///
    /// The bytes are untrusted; nothing is kept unless every check passes.
    ///
    /// # Errors
    /// - `InvalidTransition` outside `AwaitingScan`.
    /// - `Payload` for any decode failure.
    /// - `RoleConflict` if the peer claims our own role.
    pub fn ingest(&mut self, scanned: &[u8]) -> Result<(), ApplicationHandshakeError> {
        self.ensure(HandshakeEvent::Parse)?;
        let peer = match decode_descriptor(scanned) {
            Ok(descriptor) => descriptor,
            Err(e) => return Err(self.fail(e.into())),
        };
        self.apply(HandshakeEvent::Parse)?;
        if peer.flow_role() == self.local_role {
            return Err(self.fail(ApplicationHandshakeError::RoleConflict(peer.flow_role())));
        }
        debug!(
            session = %self.session_id,
            key = %peer.symmetric_key().fingerprint(),
            role = %peer.flow_role(),
            "peer descriptor accepted"
        );
        self.active = Some(peer);
        self.apply(HandshakeEvent::Join)
    }

    /// Like [`ingest`](Self::ingest) for scanners that deliver the armored
    /// text form.
    ///
    /// # Errors
    /// As `ingest`; bad armor is `Payload(Malformed)`.
    pub fn ingest_armored(&mut self, text: &str) -> Result<(), ApplicationHandshakeError> {
        self.ensure(HandshakeEvent::Parse)?;
        match Payload::from_armored(text) {
            Ok(payload) => self.ingest(payload.as_bytes()),
            Err(e) => Err(self.fail(e.into())),
        }
    }

    /// Pull one scan from `scanner` and ingest it. Returns `false` when the
    /// scanner has nothing yet.
    ///
    /// # Errors
    /// As [`ingest`](Self::ingest).
    pub fn ingest_from<S: ScanSurface>(
        &mut self,
        scanner: &mut S,
    ) -> Result<bool, ApplicationHandshakeError> {
        self.ensure(HandshakeEvent::Parse)?;
        let Some(bytes) = scanner.next_scan() else {
            return Ok(false);
        };
        let bytes = Zeroizing::new(bytes);
        self.ingest(&bytes)?;
        Ok(true)
    }

    /// Fail the session with `Timeout` if the code has been on screen for the
    /// configured window. Returns whether the timeout fired on this call.
    pub fn poll_timeout(&mut self) -> bool {
        if self.state != HandshakeState::Rendered {
            return false;
        }
        let Some(started) = self.rendered_at else {
            return false;
        };
        if self.clock.now().saturating_duration_since(started) < self.config.session_timeout() {
            return false;
        }
        self.fail(ApplicationHandshakeError::Timeout);
        true
    }

    /// Finish the handshake and hand the descriptor to the transfer layer.
    /// `Rendered → Completed` once the peer acknowledged, or
    /// `Joined → Completed` on the scanning side.
    ///
    /// The stored key is left in place for the transfer layer.
    ///
    /// # Errors
    /// - `Timeout` if the rendered code expired first.
    /// - `InvalidTransition` from any other state.
    pub fn complete(&mut self) -> Result<SessionDescriptor, ApplicationHandshakeError> {
        if self.poll_timeout() {
            return Err(ApplicationHandshakeError::Timeout);
        }
        self.ensure(HandshakeEvent::Complete)?;
        let Some(descriptor) = self.active.take() else {
            return Err(self.invalid(HandshakeEvent::Complete));
        };
        self.rendered_at = None;
        self.apply(HandshakeEvent::Complete)?;
        info!(
            session = %self.session_id,
            key = %descriptor.symmetric_key().fingerprint(),
            role = %self.local_role,
            "handshake completed"
        );
        Ok(descriptor)
    }

    /// Abandon the session. Safe from any state: a live session moves to
    /// `Failed(Cancelled)`, and in every case the in-memory descriptor is
    /// dropped and the stored key cleared before returning.
    pub fn cancel(&mut self) {
        if self.state.is_terminal() {
            self.release();
            return;
        }
        self.fail(ApplicationHandshakeError::Cancelled);
    }

    /// Cancel, then hand control back to the navigator.
    pub fn quit<N: Navigator>(&mut self, navigator: &mut N) {
        self.cancel();
        navigator.leave();
    }

    fn next_state(&self, ev: HandshakeEvent) -> Option<HandshakeState> {
        use FlowRole::Initiator;
        use HandshakeState as S;

        let next = match (self.local_role, self.state, ev) {
            (Initiator, S::Idle, HandshakeEvent::Prepare) => S::Prepared,
            (Initiator, S::Prepared, HandshakeEvent::Render) => S::Rendered,
            (Initiator, S::Rendered, HandshakeEvent::Complete)
            | (_, S::Joined, HandshakeEvent::Complete) => S::Completed,
            (_, S::Idle, HandshakeEvent::BeginScan) => S::AwaitingScan,
            (_, S::AwaitingScan, HandshakeEvent::Parse) => S::Parsed,
            (_, S::Parsed, HandshakeEvent::Join) => S::Joined,
            (_, s, HandshakeEvent::Fail(kind)) if !s.is_terminal() => S::Failed(kind),
            _ => return None,
        };
        Some(next)
    }

    fn invalid(&self, ev: HandshakeEvent) -> ApplicationHandshakeError {
        ApplicationHandshakeError::InvalidTransition {
            state: self.state,
            op: ev.name(),
        }
    }

    fn ensure(&self, ev: HandshakeEvent) -> Result<(), ApplicationHandshakeError> {
        match self.next_state(ev) {
            Some(_) => Ok(()),
            None => Err(self.invalid(ev)),
        }
    }

    fn apply(&mut self, ev: HandshakeEvent) -> Result<(), ApplicationHandshakeError> {
        let Some(next) = self.next_state(ev) else {
            return Err(self.invalid(ev));
        };
        debug!(
            session = %self.session_id,
            from = %self.state,
            to = %next,
            event = ev.name(),
            "handshake transition"
        );
        self.state = next;
        Ok(())
    }

    /// Record a session-ending error. Misuse errors pass through untouched.
    fn fail(&mut self, err: ApplicationHandshakeError) -> ApplicationHandshakeError {
        let Some(kind) = err.kind() else {
            return err;
        };
        if self.apply(HandshakeEvent::Fail(kind)).is_ok() {
            warn!(session = %self.session_id, reason = %kind, error = %err, "handshake failed");
        }
        self.release();
        err
    }

    fn release(&mut self) {
        self.active = None;
        self.rendered_at = None;
        self.key_store.clear(&self.session_id);
    }
}

impl<K: KeyStore, R: RenderSurface, C: Clock> std::fmt::Debug for HandshakeOrchestrator<K, R, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandshakeOrchestrator")
            .field("session_id", &self.session_id)
            .field("local_role", &self.local_role)
            .field("state", &self.state)
            .field("has_descriptor", &self.active.is_some())
            .finish_non_exhaustive()
    }
}
