//! Infrastructure shared by the protocol layer. No domain knowledge.
pub mod cbor;
