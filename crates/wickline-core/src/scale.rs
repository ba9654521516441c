// File: crates/wickline-core/src/scale.rs
// Summary: Slot (X) and price (Y) scale transforms for one frame.

/// Candle index on the X axis.
pub type Logical = usize;
/// Price on the Y axis.
pub type Value = f64;

/// Horizontal scale: the surface width is split into equal slots, one per candle,
/// and each candle sits at the centre of its slot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SlotScale {
    /// Slot width in pixels (`width / len`).
    pub candle_gap: f32,
    /// Body width in pixels (`candle_gap * body_fraction`).
    pub body_width: f32,
}

impl SlotScale {
    pub fn new(width: f32, len: usize, body_fraction: f32) -> Self {
        let candle_gap = if len == 0 { 0.0 } else { width / len as f32 };
        Self { candle_gap, body_width: candle_gap * body_fraction }
    }
    #[inline]
    pub fn to_px(&self, i: Logical) -> f32 {
        self.candle_gap * i as f32 + self.candle_gap / 2.0
    }
    #[inline]
    pub fn half_body(&self) -> f32 {
        self.body_width / 2.0
    }
}

/// Vertical scale mapping [min, max] prices into the padded band
/// [padding, height - padding], highest price on top.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PriceScale {
    pub padding: f32,
    pub padded_height: f32,
    pub vmin: Value,
    pub vmax: Value,
}

impl PriceScale {
    pub fn new(height: f32, padding: f32, vmin: Value, vmax: Value) -> Self {
        Self { padding, padded_height: height - 2.0 * padding, vmin, vmax }
    }
    #[inline]
    pub fn range(&self) -> Value {
        self.vmax - self.vmin
    }
    /// Vertical centre of the padded band.
    #[inline]
    pub fn center_px(&self) -> f32 {
        self.padding + self.padded_height / 2.0
    }
    /// A zero (or non-finite) range maps every price to the band centre.
    #[inline]
    pub fn to_px(&self, y: Value) -> f32 {
        let range = self.range();
        if range == 0.0 || !range.is_finite() {
            return self.center_px();
        }
        self.padded_height * ((self.vmax - y) / range) as f32 + self.padding
    }
}
