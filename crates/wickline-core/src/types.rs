// File: crates/wickline-core/src/types.rs
// Summary: Shared types and constants (surface sizes, paddings, viewport and pointer state).

/// Default surface width in pixels.
pub const WIDTH: i32 = 1024;
/// Default surface height in pixels.
pub const HEIGHT: i32 = 640;

/// Empty band above the highest high and below the lowest low, in pixels.
pub const VERTICAL_PADDING: f32 = 20.0;
/// Share of a candle slot occupied by its body.
pub const BODY_FRACTION: f32 = 0.8;

/// Drawing surface size in device pixels.
/// Contract: supplied by the host on every resize; the core never mutates it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Integer surface dimensions, clamped to at least one pixel.
    pub fn surface_size(&self) -> (i32, i32) {
        let w = self.width.round().max(1.0) as i32;
        let h = self.height.round().max(1.0) as i32;
        (w, h)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(WIDTH as f32, HEIGHT as f32)
    }
}

/// Last known pointer position relative to the surface's top-left origin.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum PointerState {
    /// Pointer is not over the drawing surface.
    #[default]
    Outside,
    At { x: f32, y: f32 },
}

impl PointerState {
    pub const fn at(x: f32, y: f32) -> Self {
        Self::At { x, y }
    }

    /// Position if the pointer is over the surface.
    pub fn position(&self) -> Option<(f32, f32)> {
        match *self {
            Self::At { x, y } => Some((x, y)),
            Self::Outside => None,
        }
    }
}
