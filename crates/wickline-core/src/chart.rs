// File: crates/wickline-core/src/chart.rs
// Summary: Candle chart and headless rendering pipeline using Skia CPU raster surfaces.

use std::cell::OnceCell;

use skia_safe as skia;

use crate::error::{ChartError, Result};
use crate::hit_test::{hit_test, Selection};
use crate::info::CandleInfo;
use crate::mapper::{CoordinateMapper, MapperConfig};
use crate::render::{render, FrameLayout};
use crate::series::{Candle, CandleSeries};
use crate::text::TextShaper;
use crate::theme::Theme;
use crate::types::{PointerState, Viewport, BODY_FRACTION, HEIGHT, VERTICAL_PADDING, WIDTH};

#[derive(Clone, Copy, Debug)]
pub struct RenderOptions {
    pub width: i32,
    pub height: i32,
    pub vertical_padding: f32,
    pub body_fraction: f32,
    pub theme: Theme,
    /// Paint the OHLC info panel for the selected candle.
    pub draw_info: bool,
    /// Pointer used for hit testing in headless renders.
    pub pointer: PointerState,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: WIDTH,
            height: HEIGHT,
            vertical_padding: VERTICAL_PADDING,
            body_fraction: BODY_FRACTION,
            theme: Theme::dark(),
            draw_info: true,
            pointer: PointerState::Outside,
        }
    }
}

impl RenderOptions {
    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.width as f32, self.height as f32)
    }

    pub fn mapper_config(&self) -> MapperConfig {
        MapperConfig { vertical_padding: self.vertical_padding, body_fraction: self.body_fraction }
    }
}

/// Result of drawing one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    pub selection: Selection,
    pub layout: FrameLayout,
}

pub struct CandleChart {
    pub series: CandleSeries,
    shaper: OnceCell<TextShaper>,
}

impl CandleChart {
    pub fn new(series: CandleSeries) -> Self {
        Self { series, shaper: OnceCell::new() }
    }

    pub fn set_series(&mut self, series: CandleSeries) {
        self.series = series;
    }

    /// Candle under the selection, if any.
    pub fn candle(&self, selection: Selection) -> Option<Candle> {
        selection.and_then(|i| self.series.get(i).copied())
    }

    /// One full frame onto `canvas`: map, hit test, paint candles, then the info panel.
    pub fn draw(&self, canvas: &skia::Canvas, viewport: Viewport, pointer: PointerState, opts: &RenderOptions) -> Frame {
        let mapper = CoordinateMapper::new(&self.series, viewport, &opts.mapper_config());
        let selection = hit_test(pointer, &mapper);
        let layout = render(canvas, &self.series, &mapper, selection, &opts.theme);
        if opts.draw_info && !self.series.is_empty() {
            let shaper = self.shaper.get_or_init(TextShaper::new);
            CandleInfo::new(self.candle(selection)).draw(canvas, shaper, &opts.theme);
        }
        Frame { selection, layout }
    }

    /// Render into a fresh raster surface sized by `opts`.
    pub fn render_to_surface(&self, opts: &RenderOptions) -> Result<(skia::Surface, Frame)> {
        let mut surface = new_surface(opts.width, opts.height)?;
        let frame = self.draw(surface.canvas(), opts.viewport(), opts.pointer, opts);
        Ok((surface, frame))
    }

    /// Render and return PNG bytes.
    pub fn render_to_png_bytes(&self, opts: &RenderOptions) -> Result<Vec<u8>> {
        let (mut surface, _) = self.render_to_surface(opts)?;
        encode_png(&mut surface)
    }

    /// Render the chart to a PNG at `output_png_path`.
    pub fn render_to_png(&self, opts: &RenderOptions, output_png_path: impl AsRef<std::path::Path>) -> Result<Frame> {
        let (mut surface, frame) = self.render_to_surface(opts)?;
        let data = encode_png(&mut surface)?;
        if let Some(parent) = output_png_path.as_ref().parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(output_png_path, data)?;
        Ok(frame)
    }

    /// Render to straight-alpha RGBA8: (pixels, width, height, row_bytes).
    pub fn render_to_rgba8(&self, opts: &RenderOptions) -> Result<(Vec<u8>, i32, i32, usize)> {
        let (mut surface, _) = self.render_to_surface(opts)?;
        let px = read_rgba8(&mut surface)?;
        Ok((px, surface.width(), surface.height(), surface.width() as usize * 4))
    }
}

// ---- surface helpers --------------------------------------------------------

/// Allocate a CPU raster surface; failure is a setup error, not a per-frame one.
pub fn new_surface(width: i32, height: i32) -> Result<skia::Surface> {
    skia::surfaces::raster_n32_premul((width, height)).ok_or(ChartError::Surface { width, height })
}

/// Read back the surface as unpremultiplied RGBA8, tightly packed.
pub fn read_rgba8(surface: &mut skia::Surface) -> Result<Vec<u8>> {
    let (w, h) = (surface.width(), surface.height());
    let info = skia::ImageInfo::new((w, h), skia::ColorType::RGBA8888, skia::AlphaType::Unpremul, None);
    let row_bytes = w as usize * 4;
    let mut px = vec![0u8; row_bytes * h as usize];
    if !surface.read_pixels(&info, &mut px, row_bytes, (0, 0)) {
        return Err(ChartError::Readback);
    }
    Ok(px)
}

pub fn encode_png(surface: &mut skia::Surface) -> Result<Vec<u8>> {
    let pixmap = surface.peek_pixels().ok_or(ChartError::Encode)?;
    let mut out = Vec::new();
    if !skia::png_encoder::encode(&pixmap, &mut out, &skia::png_encoder::Options::default()) {
        return Err(ChartError::Encode);
    }
    Ok(out)
}
