use crate::protocol::descriptor::Payload;
use serde::{Deserialize, Serialize};

/// Error-correction level requested from the rendering surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EcLevel {
    /// ~7% recovery.
    Low,
    /// ~15% recovery.
    #[default]
    Medium,
    /// ~25% recovery.
    Quartile,
    /// ~30% recovery.
    High,
}

/// Density/size hint passed along with a payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderHint {
    /// Target edge length of the artifact in pixels.
    pub size_px: u32,
    pub ec_level: EcLevel,
}

#[derive(thiserror::Error, Debug)]
pub enum RenderError {
    #[error("payload could not be encoded as a scannable code: {0}")]
    Encode(String),
}

/// Presentation surface that turns payload bytes into a scannable artifact.
///
/// Purely presentational; the only contract is "render these bytes". The
/// payload borrows key material, so implementations must not retain it beyond
/// what the displayed artifact needs.
pub trait RenderSurface {
    /// Render `payload` using `hint`.
    ///
    /// # Errors
    /// Returns `RenderError::Encode` if the bytes cannot be represented.
    fn render(&mut self, payload: &Payload, hint: RenderHint) -> Result<(), RenderError>;
}
