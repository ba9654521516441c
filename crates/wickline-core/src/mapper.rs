// File: crates/wickline-core/src/mapper.rs
// Summary: Per-frame coordinate mapper combining the slot and price scales.

use crate::scale::{PriceScale, SlotScale};
use crate::series::CandleSeries;
use crate::types::{Viewport, BODY_FRACTION, VERTICAL_PADDING};

/// Layout constants for the mapper.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MapperConfig {
    pub vertical_padding: f32,
    pub body_fraction: f32,
}

impl Default for MapperConfig {
    fn default() -> Self {
        Self { vertical_padding: VERTICAL_PADDING, body_fraction: BODY_FRACTION }
    }
}

/// Price/index -> pixel transforms for one frame. Built fresh every tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CoordinateMapper {
    viewport: Viewport,
    len: usize,
    slots: SlotScale,
    prices: PriceScale,
}

impl CoordinateMapper {
    /// Scan the series once for its price bounds and lay out `len` slots over the viewport.
    pub fn new(series: &CandleSeries, viewport: Viewport, config: &MapperConfig) -> Self {
        let (vmin, vmax) = series.price_bounds().unwrap_or((0.0, 0.0));
        Self {
            viewport,
            len: series.len(),
            slots: SlotScale::new(viewport.width, series.len(), config.body_fraction),
            prices: PriceScale::new(viewport.height, config.vertical_padding, vmin, vmax),
        }
    }

    pub fn with_defaults(series: &CandleSeries, viewport: Viewport) -> Self {
        Self::new(series, viewport, &MapperConfig::default())
    }

    pub fn viewport(&self) -> Viewport { self.viewport }

    /// Number of candle positions; zero means nothing is drawn or hit.
    pub fn len(&self) -> usize { self.len }

    pub fn is_empty(&self) -> bool { self.len == 0 }

    pub fn price_to_y(&self, price: f64) -> f32 { self.prices.to_px(price) }

    pub fn index_to_x(&self, i: usize) -> f32 { self.slots.to_px(i) }

    pub fn candle_gap(&self) -> f32 { self.slots.candle_gap }

    pub fn body_width(&self) -> f32 { self.slots.body_width }

    pub fn half_body_width(&self) -> f32 { self.slots.half_body() }

    pub fn price_range(&self) -> f64 { self.prices.range() }

    pub fn price_scale(&self) -> &PriceScale { &self.prices }

    pub fn slot_scale(&self) -> &SlotScale { &self.slots }
}
