/// Source of raw scanned bytes (camera, file picker, test double).
///
/// Everything returned is untrusted input for `ingest`. A new attempt after a
/// failed one is simply another `next_scan` result; nothing is resumed.
pub trait ScanSurface {
    /// Next scanned payload, or `None` if nothing has been captured yet.
    fn next_scan(&mut self) -> Option<Vec<u8>>;
}
