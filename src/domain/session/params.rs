/// ---- v1 parameter set ----
/// Raw symmetric key length carried by a v1 descriptor (256-bit key).
pub const SYMMETRIC_KEY_LEN: usize = 32;
/// Number of SHA-256 digest bytes shown in a key fingerprint.
pub(crate) const FINGERPRINT_LEN: usize = 8;
