/*
Session descriptor model.

A `SessionDescriptor` is everything two devices must agree on before a file
transfer can start: the symmetric key that protects the transfer, which side
pushes bytes (`FlowRole`) and whether this device started the session.

Goals:
* Enforce the v1 key length at the type level (`SymmetricKey` is a fixed
  32-byte array) and reject anything else with a typed [`DescriptorError`].
* Keep key material out of logs: `Debug` is redacted and a short SHA-256
  fingerprint is offered for correlation instead.
* Zeroize key bytes on drop so discarding a descriptor releases the secret.

Wire encoding lives in `protocol::descriptor`; this module only knows shapes
and invariants.
*/

pub mod descriptor;
pub mod errors;
pub mod key;
mod params;
pub mod role;
pub mod session_id;

pub use descriptor::SessionDescriptor;
pub use errors::DescriptorError;
pub use key::{KeyFingerprint, SymmetricKey};
pub use params::SYMMETRIC_KEY_LEN;
pub use role::FlowRole;
pub use session_id::SessionId;
