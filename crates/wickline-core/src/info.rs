// File: crates/wickline-core/src/info.rs
// Summary: Candle info panel: OHLC rows for the selected candle, drawn in the chart corner.

use std::fmt;

use skia_safe as skia;

use crate::series::Candle;
use crate::text::TextShaper;
use crate::theme::Theme;

pub const INFO_FONT_SIZE: f32 = 13.0;
const INFO_MARGIN: f32 = 8.0;
const INFO_PADDING: f32 = 6.0;

/// Printable view of the selected candle (or the lack of one).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CandleInfo {
    pub candle: Option<Candle>,
}

impl CandleInfo {
    pub fn new(candle: Option<Candle>) -> Self {
        Self { candle }
    }

    /// Label/value rows; a single message row when nothing is selected.
    pub fn rows(&self) -> Vec<(&'static str, String)> {
        match self.candle {
            None => vec![("No candle selected", String::new())],
            Some(c) => vec![
                ("Open", c.open.to_string()),
                ("High", c.high.to_string()),
                ("Low", c.low.to_string()),
                ("Close", c.close.to_string()),
            ],
        }
    }

    /// Paint the panel in the top-left corner of the canvas.
    pub fn draw(&self, canvas: &skia::Canvas, shaper: &TextShaper, theme: &Theme) {
        let text = self.to_string();
        let (w, h) = shaper.measure(&text, INFO_FONT_SIZE);

        let mut bg = skia::Paint::default();
        bg.set_anti_alias(true);
        bg.set_color(theme.info_background);
        let rect = skia::Rect::from_xywh(INFO_MARGIN, INFO_MARGIN, w + 2.0 * INFO_PADDING, h + 2.0 * INFO_PADDING);
        canvas.draw_round_rect(rect, 4.0, 4.0, &bg);

        shaper.draw_top_left(
            canvas,
            &text,
            INFO_MARGIN + INFO_PADDING,
            INFO_MARGIN + INFO_PADDING,
            INFO_FONT_SIZE,
            theme.info_label,
        );
    }
}

impl fmt::Display for CandleInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows = self.rows();
        for (i, (label, value)) in rows.iter().enumerate() {
            if i > 0 { writeln!(f)?; }
            if value.is_empty() {
                write!(f, "{label}")?;
            } else {
                write!(f, "{label:<6}{value}")?;
            }
        }
        Ok(())
    }
}
