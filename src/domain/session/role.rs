use crate::domain::session::errors::DescriptorError;
use core::{fmt, str::FromStr};

/// Which side pushes file bytes once the transfer channel exists.
///
/// A session has at most one `Initiator` and one `Joiner`. The wire code is
/// the `repr(u8)` discriminant.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlowRole {
    /// Displays the code and starts the session.
    Initiator = 0x01,
    /// Scans the code and joins the session.
    Joiner = 0x02,
}

impl FlowRole {
    /// Wire code for this role.
    #[must_use]
    pub fn code(self) -> u8 {
        self as u8
    }

    /// The role the other device must hold.
    #[must_use]
    pub fn peer(self) -> Self {
        match self {
            Self::Initiator => Self::Joiner,
            Self::Joiner => Self::Initiator,
        }
    }

    /// Lowercase text form used in configuration and logs.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Initiator => "initiator",
            Self::Joiner => "joiner",
        }
    }
}

impl TryFrom<u64> for FlowRole {
    type Error = DescriptorError;

    fn try_from(v: u64) -> Result<Self, Self::Error> {
        match v {
            0x01 => Ok(Self::Initiator),
            0x02 => Ok(Self::Joiner),
            other => Err(DescriptorError::InvalidRoleCode(other)),
        }
    }
}

impl TryFrom<u8> for FlowRole {
    type Error = DescriptorError;

    fn try_from(v: u8) -> Result<Self, Self::Error> {
        Self::try_from(u64::from(v))
    }
}

impl FromStr for FlowRole {
    type Err = DescriptorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "initiator" => Ok(Self::Initiator),
            "joiner" => Ok(Self::Joiner),
            other => Err(DescriptorError::InvalidRoleName(other.to_owned())),
        }
    }
}

impl fmt::Display for FlowRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
