use crate::domain::session::errors::DescriptorError;
use crate::domain::session::key::SymmetricKey;
use crate::domain::session::role::FlowRole;

/// The unit exchanged between devices over the scanned code.
///
/// Immutable once built: there are no setters, so a descriptor handed to the
/// codec is a snapshot of the session at that moment. Dropping it zeroizes the
/// key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionDescriptor {
    symmetric_key: SymmetricKey,
    flow_role: FlowRole,
    is_origin_device: bool,
}

impl SessionDescriptor {
    /// Assemble a descriptor from already-validated parts.
    #[must_use]
    pub fn new(symmetric_key: SymmetricKey, flow_role: FlowRole, is_origin_device: bool) -> Self {
        Self {
            symmetric_key,
            flow_role,
            is_origin_device,
        }
    }

    /// Descriptor the displaying device builds: `Initiator`, origin device.
    #[must_use]
    pub fn initiator(symmetric_key: SymmetricKey) -> Self {
        Self::new(symmetric_key, FlowRole::Initiator, true)
    }

    /// Validate raw field values and build a descriptor.
    ///
    /// Every field is checked before anything is returned; there is no
    /// partially-populated result.
    ///
    /// # Errors
    /// - `EmptyKey` / `KeyLengthMismatch` for unusable key material.
    /// - `KeyTooLarge` for a key over the supported maximum.
    /// - `InvalidRoleCode` if `role_code` is not a defined [`FlowRole`].
    pub fn try_from_parts(
        key: &[u8],
        role_code: u8,
        is_origin_device: bool,
    ) -> Result<Self, DescriptorError> {
        let symmetric_key = SymmetricKey::try_from(key)?;
        let flow_role = FlowRole::try_from(role_code)?;
        Ok(Self::new(symmetric_key, flow_role, is_origin_device))
    }

    #[must_use]
    pub fn symmetric_key(&self) -> &SymmetricKey {
        &self.symmetric_key
    }

    #[must_use]
    pub fn flow_role(&self) -> FlowRole {
        self.flow_role
    }

    #[must_use]
    pub fn is_origin_device(&self) -> bool {
        self.is_origin_device
    }

    /// Consume the descriptor, yielding the key for the transfer layer.
    #[must_use]
    pub fn into_key(self) -> SymmetricKey {
        self.symmetric_key
    }
}
