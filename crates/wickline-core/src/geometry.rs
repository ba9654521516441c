// File: crates/wickline-core/src/geometry.rs
// Summary: Lightweight geometry helpers for pixel math.

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RectF {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl RectF {
    pub const fn from_ltrb(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self { left, top, right, bottom }
    }
    /// Rect of `width` centred on `cx`, spanning `y0..y1` in either order.
    pub fn centered_x(cx: f32, width: f32, y0: f32, y1: f32) -> Self {
        let half = width * 0.5;
        Self::from_ltrb(cx - half, y0.min(y1), cx + half, y0.max(y1))
    }
    pub fn width(&self) -> f32 { self.right - self.left }
    pub fn height(&self) -> f32 { self.bottom - self.top }
    /// Grow the bottom edge so the rect is at least `min` tall.
    pub fn with_min_height(mut self, min: f32) -> Self {
        if self.height() < min { self.bottom = self.top + min; }
        self
    }
    pub fn to_skia(self) -> skia_safe::Rect {
        skia_safe::Rect::from_ltrb(self.left, self.top, self.right, self.bottom)
    }
}
