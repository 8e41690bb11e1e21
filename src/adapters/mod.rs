//! Concrete collaborators: an in-memory key store, a QR text renderer and a
//! system clock. Each implements a trait from `ports`; none knows the handshake.
pub mod clock;
pub mod memory_key_store;
pub mod qr;

pub use clock::SystemClock;
pub use memory_key_store::InMemoryKeyStore;
pub use qr::QrTextRenderer;
