use core::fmt;

use super::errors::HandshakeErrorKind;

/// Progress of one device through the descriptor handshake.
///
/// Initiator path: `Idle → Prepared → Rendered → Completed`.
/// Joiner path: `Idle → AwaitingScan → Parsed → Joined → Completed`.
/// `Completed` and `Failed` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandshakeState {
    /// Nothing done yet.
    Idle,
    /// Descriptor built from the stored key; not yet shown.
    Prepared,
    /// Payload handed to the rendering surface; waiting for the peer.
    Rendered,
    /// Waiting for bytes from the scanning surface.
    AwaitingScan,
    /// Scanned payload decoded into a peer descriptor.
    Parsed,
    /// Peer descriptor accepted for this session.
    Joined,
    /// Descriptor handed off to the transfer layer.
    Completed,
    /// Session over; key material released.
    Failed(HandshakeErrorKind),
}

impl HandshakeState {
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed(_))
    }
}

impl fmt::Display for HandshakeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => f.write_str("Idle"),
            Self::Prepared => f.write_str("Prepared"),
            Self::Rendered => f.write_str("Rendered"),
            Self::AwaitingScan => f.write_str("AwaitingScan"),
            Self::Parsed => f.write_str("Parsed"),
            Self::Joined => f.write_str("Joined"),
            Self::Completed => f.write_str("Completed"),
            Self::Failed(kind) => write!(f, "Failed({kind})"),
        }
    }
}

/// Logical triggers fed to the transition table by the public operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandshakeEvent {
    Prepare,
    Render,
    BeginScan,
    Parse,
    Join,
    /// Peer acknowledged (initiator) or joined descriptor handed off (joiner).
    Complete,
    Fail(HandshakeErrorKind),
}

impl HandshakeEvent {
    /// Operation name used in `InvalidTransition` and log fields.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Prepare => "prepare",
            Self::Render => "render",
            Self::BeginScan => "begin_scan",
            Self::Parse => "ingest",
            Self::Join => "join",
            Self::Complete => "complete",
            Self::Fail(_) => "fail",
        }
    }
}
