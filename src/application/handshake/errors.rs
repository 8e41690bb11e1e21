use core::fmt;

use thiserror::Error;

use crate::domain::session::{DescriptorError, FlowRole, SessionId};
use crate::ports::RenderError;
use crate::protocol::descriptor::PayloadError;

use super::fsm_types::HandshakeState;

/// Errors returned by [`HandshakeOrchestrator`](super::HandshakeOrchestrator)
/// operations.
///
/// Everything except `InvalidTransition` ends the session: the orchestrator is
/// left in `Failed(kind)` with key material released. `InvalidTransition`
/// reports misuse and leaves the state untouched.
#[derive(Debug, Error)]
pub enum ApplicationHandshakeError {
    #[error("no key stored for session {0}")]
    NoLocalKey(SessionId),

    #[error("descriptor rejected: {0}")]
    Descriptor(#[from] DescriptorError),

    #[error("payload rejected: {0}")]
    Payload(#[from] PayloadError),

    #[error("peer descriptor carries our own role ({0})")]
    RoleConflict(FlowRole),

    #[error("render failed: {0}")]
    Render(#[from] RenderError),

    #[error("handshake timed out")]
    Timeout,

    #[error("handshake was cancelled")]
    Cancelled,

    #[error("{op} not allowed in state {state}")]
    InvalidTransition {
        state: HandshakeState,
        op: &'static str,
    },
}

impl ApplicationHandshakeError {
    /// Classification carried by `HandshakeState::Failed`. `None` for misuse,
    /// which does not end the session.
    #[must_use]
    pub fn kind(&self) -> Option<HandshakeErrorKind> {
        let kind = match self {
            Self::NoLocalKey(_) => HandshakeErrorKind::NoLocalKey,
            Self::Descriptor(e) => HandshakeErrorKind::from_descriptor(e),
            Self::Payload(e) => match e {
                PayloadError::UnsupportedVersion(_) => HandshakeErrorKind::UnsupportedVersion,
                PayloadError::Malformed(_) => HandshakeErrorKind::MalformedPayload,
                PayloadError::TooLarge { .. } => HandshakeErrorKind::PayloadTooLarge,
                PayloadError::Descriptor(d) => HandshakeErrorKind::from_descriptor(d),
            },
            Self::RoleConflict(_) => HandshakeErrorKind::RoleConflict,
            Self::Render(_) => HandshakeErrorKind::RenderFailed,
            Self::Timeout => HandshakeErrorKind::Timeout,
            Self::Cancelled => HandshakeErrorKind::Cancelled,
            Self::InvalidTransition { .. } => return None,
        };
        Some(kind)
    }
}

/// UI-facing reason a session failed. `Display` yields the short reason
/// string (`"timeout"`, `"cancelled"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandshakeErrorKind {
    NoLocalKey,
    InvalidKeyMaterial,
    InvalidRole,
    PayloadTooLarge,
    UnsupportedVersion,
    MalformedPayload,
    RoleConflict,
    RenderFailed,
    Timeout,
    Cancelled,
}

impl HandshakeErrorKind {
    fn from_descriptor(e: &DescriptorError) -> Self {
        match e {
            DescriptorError::EmptyKey | DescriptorError::KeyLengthMismatch { .. } => {
                Self::InvalidKeyMaterial
            }
            DescriptorError::KeyTooLarge { .. } => Self::PayloadTooLarge,
            DescriptorError::InvalidRoleCode(_) | DescriptorError::InvalidRoleName(_) => {
                Self::InvalidRole
            }
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NoLocalKey => "no local key",
            Self::InvalidKeyMaterial => "invalid key material",
            Self::InvalidRole => "invalid role",
            Self::PayloadTooLarge => "payload too large",
            Self::UnsupportedVersion => "unsupported version",
            Self::MalformedPayload => "malformed payload",
            Self::RoleConflict => "role conflict",
            Self::RenderFailed => "render failed",
            Self::Timeout => "timeout",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for HandshakeErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
