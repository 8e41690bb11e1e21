use qrcode::QrCode;
use tracing::debug;
use zeroize::Zeroizing;

use crate::ports::{EcLevel, RenderError, RenderHint, RenderSurface};
use crate::protocol::descriptor::Payload;

/// Renders the armored payload as a terminal-printable QR code.
///
/// The last artifact is kept so a caller (or a test) can print it; it is
/// zeroized when replaced, cleared or dropped.
///
/// `size_px` sets the scale: each module is drawn as `2n` columns by `n` rows,
/// with `n` the largest whole factor that keeps the code within `size_px`
/// assuming [`CELL_WIDTH_PX`]-pixel terminal columns (never below 1).
#[derive(Default)]
pub struct QrTextRenderer {
    last: Option<Zeroizing<String>>,
}

impl QrTextRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Text of the most recent render, if any.
    #[must_use]
    pub fn last_artifact(&self) -> Option<&str> {
        self.last.as_deref().map(String::as_str)
    }

    /// Drop the current artifact, e.g. once the code is no longer on screen.
    pub fn clear(&mut self) {
        self.last = None;
    }
}

/// Assumed pixel width of one terminal column.
pub const CELL_WIDTH_PX: u32 = 8;

/// Modules of blank border the renderer adds on each side.
const QUIET_ZONE_MODULES: u32 = 4;

fn module_scale(modules: usize, size_px: u32) -> u32 {
    let modules = u32::try_from(modules).unwrap_or(u32::MAX);
    let columns_per_scale = modules
        .saturating_add(2 * QUIET_ZONE_MODULES)
        .saturating_mul(2);
    (size_px / CELL_WIDTH_PX / columns_per_scale).max(1)
}

fn qr_level(level: EcLevel) -> qrcode::EcLevel {
    match level {
        EcLevel::Low => qrcode::EcLevel::L,
        EcLevel::Medium => qrcode::EcLevel::M,
        EcLevel::Quartile => qrcode::EcLevel::Q,
        EcLevel::High => qrcode::EcLevel::H,
    }
}

impl RenderSurface for QrTextRenderer {
    fn render(&mut self, payload: &Payload, hint: RenderHint) -> Result<(), RenderError> {
        let text = payload.to_armored();
        let code = QrCode::with_error_correction_level(text.as_bytes(), qr_level(hint.ec_level))
            .map_err(|e| RenderError::Encode(e.to_string()))?;
        let scale = module_scale(code.width(), hint.size_px);
        debug!(modules = code.width(), scale, ec = ?hint.ec_level, "qr code built");

        // Terminal cells are roughly twice as tall as wide.
        let art = code
            .render::<char>()
            .quiet_zone(true)
            .module_dimensions(2 * scale, scale)
            .build();
        self.last = Some(Zeroizing::new(art));
        Ok(())
    }
}

impl std::fmt::Debug for QrTextRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QrTextRenderer")
            .field("has_artifact", &self.last.is_some())
            .finish()
    }
}
