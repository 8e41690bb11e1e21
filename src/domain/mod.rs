//! Domain layer: session descriptor types and their invariants.
//!
//! Nothing in here performs IO, encoding or logging. Types are validated on
//! construction so that any value that exists is safe to render or accept.

pub mod session;
