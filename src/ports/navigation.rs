/// External navigator invoked by the quit action once the handshake has
/// released its key material.
pub trait Navigator {
    fn leave(&mut self);
}
