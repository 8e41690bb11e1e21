use std::time::Duration;

use crate::application::HandshakeConfig;
use crate::application::handshake::{
    ApplicationHandshakeError, HandshakeErrorKind, HandshakeOrchestrator, HandshakeState,
};
use crate::domain::session::{FlowRole, SessionDescriptor};
use crate::ports::{EcLevel, RenderHint};
use crate::protocol::descriptor::{Payload, encode_descriptor};
use crate::test_support::{
    CountingKeyStore, CountingNavigator, ManualClock, QueueScanner, RecordingRenderer,
    TestOrchestrator, mk_key, mk_orchestrator, mk_payload, mk_store, sid,
};

fn initiator(key_bytes: &[u8]) -> (TestOrchestrator, ManualClock) {
    let clock = ManualClock::new();
    let o = mk_orchestrator(
        FlowRole::Initiator,
        mk_store(key_bytes),
        RecordingRenderer::default(),
        clock.clone(),
    );
    (o, clock)
}

fn joiner() -> TestOrchestrator {
    mk_orchestrator(
        FlowRole::Joiner,
        mk_store(&[]),
        RecordingRenderer::default(),
        ManualClock::new(),
    )
}

fn rendered(key_byte: u8) -> (TestOrchestrator, ManualClock) {
    let (mut o, clock) = initiator(&[key_byte; 32]);
    o.prepare().unwrap();
    o.render().unwrap();
    (o, clock)
}

fn assert_failed(o: &TestOrchestrator, kind: HandshakeErrorKind) {
    assert_eq!(o.state(), HandshakeState::Failed(kind));
    assert!(o.descriptor().is_none());
    assert!(o.key_store().clears >= 1);
    assert!(!o.key_store().holds(&sid()));
}

// --------------- Initiator ---------------

#[test]
fn initiator_prepare_render_complete() {
    let (mut o, _clock) = initiator(&[0x11; 32]);
    o.prepare().unwrap();
    assert_eq!(o.state(), HandshakeState::Prepared);
    let d = o.descriptor().unwrap();
    assert_eq!(d.flow_role(), FlowRole::Initiator);
    assert!(d.is_origin_device());

    o.render().unwrap();
    assert_eq!(o.state(), HandshakeState::Rendered);
    let expected = encode_descriptor(&SessionDescriptor::initiator(mk_key(0x11))).unwrap();
    assert_eq!(o.renderer().last().unwrap(), expected.as_bytes());
    assert_eq!(
        o.renderer().rendered[0].1,
        HandshakeConfig::default().render_hint()
    );

    let done = o.complete().unwrap();
    assert_eq!(done.symmetric_key(), &mk_key(0x11));
    assert_eq!(o.state(), HandshakeState::Completed);
    assert!(o.descriptor().is_none());
    // key stays available to the transfer layer
    assert_eq!(o.key_store().clears, 0);
    assert!(o.key_store().holds(&sid()));
}

#[test]
fn prepare_without_stored_key_fails_session() {
    let mut o = mk_orchestrator(
        FlowRole::Initiator,
        CountingKeyStore::default(),
        RecordingRenderer::default(),
        ManualClock::new(),
    );
    let err = o.prepare().unwrap_err();
    assert!(matches!(err, ApplicationHandshakeError::NoLocalKey(ref s) if *s == sid()));
    assert_failed(&o, HandshakeErrorKind::NoLocalKey);
}

#[test]
fn prepare_rejects_bad_stored_key() {
    let (mut o, _) = initiator(&[]);
    let err = o.prepare().unwrap_err();
    assert_eq!(err.kind(), Some(HandshakeErrorKind::InvalidKeyMaterial));
    assert_failed(&o, HandshakeErrorKind::InvalidKeyMaterial);

    let (mut o, _) = initiator(&[1; 31]);
    o.prepare().unwrap_err();
    assert_failed(&o, HandshakeErrorKind::InvalidKeyMaterial);

    let (mut o, _) = initiator(&[1; 33]);
    o.prepare().unwrap_err();
    assert_failed(&o, HandshakeErrorKind::PayloadTooLarge);
}

#[test]
fn rsa_wrapped_sized_value_is_not_a_session_key() {
    // A 512-bit RSA ciphertext of the key is 64 bytes; only the unwrapped
    // 32-byte key may sit in the store.
    let (mut o, _) = initiator(&[0x5c; 64]);
    let err = o.prepare().unwrap_err();
    assert_eq!(err.kind(), Some(HandshakeErrorKind::PayloadTooLarge));
    assert_failed(&o, HandshakeErrorKind::PayloadTooLarge);
    assert!(o.renderer().rendered.is_empty());
}

#[test]
fn render_before_prepare_is_misuse() {
    let (mut o, _) = initiator(&[3; 32]);
    let err = o.render().unwrap_err();
    assert!(matches!(
        err,
        ApplicationHandshakeError::InvalidTransition {
            state: HandshakeState::Idle,
            op: "render"
        }
    ));
    assert_eq!(err.kind(), None);
    assert_eq!(o.state(), HandshakeState::Idle);
    assert_eq!(o.key_store().clears, 0);
    assert!(o.renderer().rendered.is_empty());
    // still usable
    o.prepare().unwrap();
}

#[test]
fn joiner_cannot_prepare() {
    let mut o = joiner();
    assert!(matches!(
        o.prepare(),
        Err(ApplicationHandshakeError::InvalidTransition { op: "prepare", .. })
    ));
    assert_eq!(o.state(), HandshakeState::Idle);
}

#[test]
fn render_failure_is_terminal() {
    let mut o = mk_orchestrator(
        FlowRole::Initiator,
        mk_store(&[4; 32]),
        RecordingRenderer::failing(),
        ManualClock::new(),
    );
    o.prepare().unwrap();
    let err = o.render().unwrap_err();
    assert!(matches!(err, ApplicationHandshakeError::Render(_)));
    assert_failed(&o, HandshakeErrorKind::RenderFailed);
}

#[test]
fn render_uses_configured_hint() {
    let config = HandshakeConfig::from_toml_str("[render]\nsize_px = 200\nec_level = \"high\"")
        .unwrap();
    let mut o = HandshakeOrchestrator::new(
        sid(),
        FlowRole::Initiator,
        mk_store(&[5; 32]),
        RecordingRenderer::default(),
        ManualClock::new(),
        config,
    );
    o.prepare().unwrap();
    o.render().unwrap();
    assert_eq!(
        o.renderer().rendered[0].1,
        RenderHint {
            size_px: 200,
            ec_level: EcLevel::High
        }
    );
}

// --------------- Joiner ---------------

#[test]
fn joiner_ingest_then_complete() {
    let mut o = joiner();
    o.begin_scan().unwrap();
    assert_eq!(o.state(), HandshakeState::AwaitingScan);
    o.ingest(&mk_payload(7, FlowRole::Initiator)).unwrap();
    assert_eq!(o.state(), HandshakeState::Joined);
    let peer = o.descriptor().unwrap();
    assert_eq!(peer.symmetric_key(), &mk_key(7));
    assert_eq!(peer.flow_role(), FlowRole::Initiator);

    let done = o.complete().unwrap();
    assert_eq!(done.flow_role(), FlowRole::Initiator);
    assert_eq!(o.state(), HandshakeState::Completed);
}

#[test]
fn ingest_before_begin_scan_is_misuse() {
    let mut o = joiner();
    let err = o.ingest(&mk_payload(7, FlowRole::Initiator)).unwrap_err();
    assert!(matches!(
        err,
        ApplicationHandshakeError::InvalidTransition { op: "ingest", .. }
    ));
    assert_eq!(o.state(), HandshakeState::Idle);
}

#[test]
fn same_role_is_conflict() {
    let mut o = mk_orchestrator(
        FlowRole::Initiator,
        mk_store(&[9; 32]),
        RecordingRenderer::default(),
        ManualClock::new(),
    );
    o.begin_scan().unwrap();
    let err = o.ingest(&mk_payload(8, FlowRole::Initiator)).unwrap_err();
    assert!(matches!(
        err,
        ApplicationHandshakeError::RoleConflict(FlowRole::Initiator)
    ));
    assert_failed(&o, HandshakeErrorKind::RoleConflict);
}

#[test]
fn codec_failures_map_to_kinds() {
    let mut truncated = mk_payload(1, FlowRole::Initiator);
    truncated.truncate(20);
    let mut bad_version = mk_payload(1, FlowRole::Initiator);
    bad_version[0] = 0x02;
    let mut bad_role = mk_payload(1, FlowRole::Initiator);
    let role_at = bad_role.len() - 2;
    bad_role[role_at] = 0x03;
    // Well-formed 39-byte payload whose key field is 33 bytes long.
    let mut long_key = vec![0x01, 0x83, 0x58, 0x21];
    long_key.extend([0x44; 33]);
    long_key.extend([0x01, 0xf5]);

    for (bytes, kind) in [
        (truncated, HandshakeErrorKind::MalformedPayload),
        (bad_version, HandshakeErrorKind::UnsupportedVersion),
        (bad_role, HandshakeErrorKind::InvalidRole),
        (long_key, HandshakeErrorKind::InvalidKeyMaterial),
        (vec![0x01; 65], HandshakeErrorKind::PayloadTooLarge),
        (Vec::new(), HandshakeErrorKind::MalformedPayload),
    ] {
        let mut o = joiner();
        o.begin_scan().unwrap();
        let err = o.ingest(&bytes).unwrap_err();
        assert_eq!(err.kind(), Some(kind));
        assert_failed(&o, kind);
        // no retry on the same orchestrator
        assert!(matches!(
            o.ingest(&mk_payload(1, FlowRole::Initiator)),
            Err(ApplicationHandshakeError::InvalidTransition { .. })
        ));
    }
}

#[test]
fn ingest_from_scanner() {
    let mut o = joiner();
    o.begin_scan().unwrap();
    let mut scanner = QueueScanner::default();
    assert!(!o.ingest_from(&mut scanner).unwrap());
    assert_eq!(o.state(), HandshakeState::AwaitingScan);

    scanner.0.push_back(mk_payload(2, FlowRole::Initiator));
    assert!(o.ingest_from(&mut scanner).unwrap());
    assert_eq!(o.state(), HandshakeState::Joined);
}

#[test]
fn ingest_armored_text() {
    let payload = Payload::from_bytes(&mk_payload(6, FlowRole::Initiator)).unwrap();
    let mut o = joiner();
    o.begin_scan().unwrap();
    o.ingest_armored(&format!("  {}\n", payload.to_armored().as_str()))
        .unwrap();
    assert_eq!(o.descriptor().unwrap().symmetric_key(), &mk_key(6));

    let mut o = joiner();
    o.begin_scan().unwrap();
    o.ingest_armored("not armored").unwrap_err();
    assert_failed(&o, HandshakeErrorKind::MalformedPayload);
}

// --------------- Timeout / cancel ---------------

#[test]
fn timeout_after_render() {
    let (mut o, clock) = rendered(0x21);
    clock.advance(Duration::from_secs(119));
    assert!(!o.poll_timeout());
    assert_eq!(o.state(), HandshakeState::Rendered);

    clock.advance(Duration::from_secs(1));
    assert!(o.poll_timeout());
    assert_failed(&o, HandshakeErrorKind::Timeout);
    assert_eq!(o.state().to_string(), "Failed(timeout)");
    // fires once
    assert!(!o.poll_timeout());
}

#[test]
fn complete_after_expiry_reports_timeout() {
    let (mut o, clock) = rendered(0x22);
    clock.advance(Duration::from_secs(600));
    assert!(matches!(
        o.complete(),
        Err(ApplicationHandshakeError::Timeout)
    ));
    assert_failed(&o, HandshakeErrorKind::Timeout);
}

#[test]
fn poll_timeout_ignores_other_states() {
    let (mut o, clock) = initiator(&[1; 32]);
    clock.advance(Duration::from_secs(1000));
    assert!(!o.poll_timeout());
    o.prepare().unwrap();
    assert!(!o.poll_timeout());
    assert_eq!(o.state(), HandshakeState::Prepared);
}

#[test]
fn cancel_mid_session_blocks_everything() {
    let (mut o, _) = initiator(&[0x31; 32]);
    o.prepare().unwrap();
    o.cancel();
    assert_failed(&o, HandshakeErrorKind::Cancelled);
    assert_eq!(HandshakeErrorKind::Cancelled.to_string(), "cancelled");

    assert!(matches!(
        o.render(),
        Err(ApplicationHandshakeError::InvalidTransition {
            state: HandshakeState::Failed(HandshakeErrorKind::Cancelled),
            ..
        })
    ));
    assert!(o.begin_scan().is_err());
    assert!(o.complete().is_err());
    assert_eq!(
        o.state(),
        HandshakeState::Failed(HandshakeErrorKind::Cancelled)
    );
    // idempotent
    o.cancel();
    assert_eq!(
        o.state(),
        HandshakeState::Failed(HandshakeErrorKind::Cancelled)
    );
}

#[test]
fn cancel_does_not_rewrite_earlier_failure() {
    let (mut o, clock) = rendered(0x32);
    clock.advance(Duration::from_secs(120));
    assert!(o.poll_timeout());
    o.cancel();
    assert_eq!(o.state(), HandshakeState::Failed(HandshakeErrorKind::Timeout));
}

#[test]
fn cancel_after_completion_still_clears_store() {
    let mut o = joiner();
    o.begin_scan().unwrap();
    o.ingest(&mk_payload(3, FlowRole::Initiator)).unwrap();
    o.complete().unwrap();
    o.cancel();
    assert_eq!(o.state(), HandshakeState::Completed);
    assert_eq!(o.key_store().clears, 1);
}

#[test]
fn quit_cancels_then_leaves() {
    let mut o = joiner();
    o.begin_scan().unwrap();
    let mut nav = CountingNavigator::default();
    o.quit(&mut nav);
    assert_eq!(nav.left, 1);
    assert_failed(&o, HandshakeErrorKind::Cancelled);
}

#[test]
fn debug_does_not_leak_key() {
    let (o, _) = rendered(0xAB);
    let s = format!("{o:?}");
    assert!(s.contains("Rendered"));
    assert!(!s.to_lowercase().contains("abab"));
}
