// File: crates/wickline-core/src/render.rs
// Summary: Candle renderer. Geometry is laid out first (pure, testable) and then
// painted onto a Skia canvas.

use skia_safe as skia;
use tracing::trace;

use crate::geometry::RectF;
use crate::hit_test::Selection;
use crate::mapper::CoordinateMapper;
use crate::series::{CandleKind, CandleSeries};
use crate::theme::Theme;

/// Wick stroke width in pixels.
pub const WICK_WIDTH: f32 = 1.0;
/// Height of the tick drawn for flat candles, and minimum body height.
pub const TICK_HEIGHT: f32 = 1.0;

/// Pixel geometry for one candle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CandleGlyph {
    pub index: usize,
    pub kind: CandleKind,
    pub x: f32,
    /// `(y_high, y_low)`; absent for flat candles.
    pub wick: Option<(f32, f32)>,
    /// Body rect, or the tick rect for flat candles.
    pub body: RectF,
}

/// Everything drawn in one frame, in paint order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameLayout {
    pub glyphs: Vec<CandleGlyph>,
    /// Full-height band over the selected candle, painted last.
    pub highlight: Option<RectF>,
}

/// Lay out every candle of `series`. An empty mapper yields an empty layout.
pub fn layout_frame(series: &CandleSeries, mapper: &CoordinateMapper, selection: Selection) -> FrameLayout {
    if mapper.is_empty() {
        return FrameLayout::default();
    }
    let body_w = mapper.body_width();
    let mut glyphs = Vec::with_capacity(series.len());

    for (i, c) in series.iter().enumerate() {
        let x = mapper.index_to_x(i);
        let y_open = mapper.price_to_y(c.open);
        let kind = c.kind();

        let glyph = match kind {
            CandleKind::Flat => CandleGlyph {
                index: i,
                kind,
                x,
                wick: None,
                body: RectF::centered_x(x, body_w, y_open, y_open + TICK_HEIGHT),
            },
            CandleKind::Bullish | CandleKind::Bearish => {
                let y_close = mapper.price_to_y(c.close);
                CandleGlyph {
                    index: i,
                    kind,
                    x,
                    wick: Some((mapper.price_to_y(c.high), mapper.price_to_y(c.low))),
                    body: RectF::centered_x(x, body_w, y_open, y_close).with_min_height(TICK_HEIGHT),
                }
            }
        };
        glyphs.push(glyph);
    }

    let height = mapper.viewport().height;
    let highlight = selection
        .filter(|&i| i < glyphs.len())
        .map(|i| RectF::centered_x(glyphs[i].x, body_w, 0.0, height));

    FrameLayout { glyphs, highlight }
}

/// Clear the canvas and paint a laid-out frame.
pub fn paint_frame(canvas: &skia::Canvas, layout: &FrameLayout, theme: &Theme) {
    canvas.clear(theme.background);

    let mut wick = skia::Paint::default();
    wick.set_anti_alias(true);
    wick.set_style(skia::paint::Style::Stroke);
    wick.set_stroke_width(WICK_WIDTH);

    let mut body = skia::Paint::default();
    body.set_anti_alias(true);
    body.set_style(skia::paint::Style::Fill);

    for g in &layout.glyphs {
        let color = match g.kind {
            CandleKind::Flat => theme.candle_flat,
            CandleKind::Bullish => theme.candle_up,
            CandleKind::Bearish => theme.candle_down,
        };
        wick.set_color(color);
        body.set_color(color);

        if let Some((y_high, y_low)) = g.wick {
            canvas.draw_line((g.x, y_high), (g.x, y_low), &wick);
        }
        canvas.draw_rect(g.body.to_skia(), &body);
    }

    if let Some(band) = layout.highlight {
        let mut paint = skia::Paint::default();
        paint.set_anti_alias(true);
        paint.set_style(skia::paint::Style::Fill);
        paint.set_color(theme.highlight);
        canvas.draw_rect(band.to_skia(), &paint);
    }
}

/// Lay out and paint one frame; returns the layout that was drawn.
pub fn render(
    canvas: &skia::Canvas,
    series: &CandleSeries,
    mapper: &CoordinateMapper,
    selection: Selection,
    theme: &Theme,
) -> FrameLayout {
    let layout = layout_frame(series, mapper, selection);
    paint_frame(canvas, &layout, theme);
    trace!(glyphs = layout.glyphs.len(), selected = ?selection, "painted frame");
    layout
}
