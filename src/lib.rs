//! Crate root for `vesta-handshake`.
//!
//! Lets two devices that share no connection agree on a symmetric key and a
//! transfer role by showing a QR code on one and scanning it on the other.
//!
//! High-level tree:
//! * `domain::session` – `SessionDescriptor` and its parts (key, role, id),
//!   with construction-time validation.
//! * `core::cbor` – strict canonical CBOR helpers.
//! * `protocol::descriptor` – versioned payload codec and text armor.
//! * `ports` – traits for the key store, rendering/scanning surfaces, clock
//!   and navigator.
//! * `adapters` – in-memory key store, QR text renderer, clocks.
//! * `application` – the handshake orchestrator and its configuration.
//! * `telemetry` – optional `tracing` subscriber setup.
pub mod adapters;
pub mod application;
pub mod core;
pub mod domain;
pub mod ports;
pub mod protocol;
pub mod telemetry;

#[cfg(test)]
mod test_support;

pub use application::handshake::{
    ApplicationHandshakeError, HandshakeErrorKind, HandshakeOrchestrator, HandshakeState,
};
pub use application::{ConfigError, HandshakeConfig};
pub use domain::session::{FlowRole, SessionDescriptor, SessionId, SymmetricKey};
pub use protocol::descriptor::{Payload, PayloadError, decode_descriptor, encode_descriptor};
