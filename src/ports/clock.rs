use std::time::Instant;

/// Monotonic time source for the session timeout. Injected so tests can
/// advance time without sleeping.
pub trait Clock {
    fn now(&self) -> Instant;
}
