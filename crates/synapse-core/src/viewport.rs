//! Drawing surface dimensions.

/// CSS-pixel size of the window plus the device pixel ratio used for the
/// canvas backing store.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub dpr: f64,
}

impl Viewport {
    /// Creates a viewport, capping the device pixel ratio at `max_dpr`.
    ///
    /// A missing (non-finite or non-positive) ratio is treated as 1.
    pub fn new(width: f64, height: f64, raw_dpr: f64, max_dpr: f64) -> Self {
        let dpr = if raw_dpr.is_finite() && raw_dpr > 0.0 {
            raw_dpr.min(max_dpr)
        } else {
            1.0
        };
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
            dpr,
        }
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Backing store size in device pixels.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn backing_size(&self) -> (u32, u32) {
        (
            (self.width * self.dpr).round() as u32,
            (self.height * self.dpr).round() as u32,
        )
    }
}
