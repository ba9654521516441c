// File: crates/wickline-window/src/main.rs
// Summary: Windowed host for the render loop. Frames are winit redraws, pixels are
// blitted on the CPU through softbuffer and the selection is shown in the title bar.

use anyhow::{anyhow, Result};
use clap::Parser;
use std::cell::Cell;
use std::num::NonZeroU32;
use std::path::PathBuf;
use std::rc::Rc;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;
use wickline_core::loader::{JsonFileSource, SyntheticSource};
use wickline_core::symbols::{Symbol, SYMBOLS};
use wickline_core::{
    load, symbols, theme, Candle, CandleInfo, FrameHandle, FrameScheduler, LoadStatus, LoaderParams, PointerState, RenderLoop,
    RenderOptions, Selection, StreamSource, Viewport,
};
use winit::event::{ElementState, Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::{Window, WindowBuilder};

#[derive(Parser, Debug)]
#[command(name = "wickline-window", about = "Interactive candlestick chart window")]
struct Args {
    /// Initial trading pair; any key cycles through the built-in pairs
    #[arg(long, default_value = "BTCUSDT")]
    symbol: String,

    /// Directory holding `<SYMBOL>.json` stream files; synthetic data when omitted
    #[arg(long)]
    data_dir: Option<PathBuf>,

    #[arg(long, default_value = "dark")]
    theme: String,

    #[arg(long, default_value_t = wickline_core::types::WIDTH)]
    width: i32,

    #[arg(long, default_value_t = wickline_core::types::HEIGHT)]
    height: i32,
}

/// One outstanding redraw at a time; cancelling forgets the handle so a
/// late `RedrawRequested` is ignored.
struct RedrawScheduler {
    window: Rc<Window>,
    armed: Rc<Cell<Option<FrameHandle>>>,
    next_id: u64,
}

impl FrameScheduler for RedrawScheduler {
    fn request_frame(&mut self) -> FrameHandle {
        self.next_id += 1;
        let handle = FrameHandle(self.next_id);
        self.armed.set(Some(handle));
        self.window.request_redraw();
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if self.armed.get() == Some(handle) {
            self.armed.set(None);
        }
    }
}

fn title_for(symbol: &Symbol, status: Option<&str>, candle: Option<Candle>) -> String {
    if let Some(msg) = status {
        return format!("Wickline | {} | {msg}", symbol.display);
    }
    let info = CandleInfo::new(candle)
        .rows()
        .into_iter()
        .map(|(label, value)| if value.is_empty() { label.to_string() } else { format!("{label} {value}") })
        .collect::<Vec<_>>()
        .join("  ");
    format!("Wickline | {} | {info}", symbol.display)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    let args = Args::parse();

    let mut source: Box<dyn StreamSource> = match &args.data_dir {
        Some(dir) => Box::new(JsonFileSource::new(dir)),
        None => Box::new(SyntheticSource { gap_every: Some(23), ..Default::default() }),
    };
    let mut sym_idx = SYMBOLS
        .iter()
        .position(|s| Some(*s) == symbols::find(&args.symbol))
        .unwrap_or_else(|| {
            warn!(symbol = %args.symbol, "not a built-in pair, starting with {}", SYMBOLS[0].id);
            0
        });

    let event_loop = EventLoop::new();
    let window = Rc::new(
        WindowBuilder::new()
            .with_title("Wickline")
            .with_inner_size(winit::dpi::PhysicalSize::new(args.width.max(1) as u32, args.height.max(1) as u32))
            .build(&event_loop)?,
    );

    let context = unsafe { softbuffer::Context::new(&*window) }.map_err(|e| anyhow!("softbuffer context: {e}"))?;
    let mut surface =
        unsafe { softbuffer::Surface::new(&context, &*window) }.map_err(|e| anyhow!("softbuffer surface: {e}"))?;

    let mut opts = RenderOptions::default();
    let size = window.inner_size();
    opts.width = size.width.max(1) as i32;
    opts.height = size.height.max(1) as i32;
    opts.theme = theme::find(&args.theme);

    let armed = Rc::new(Cell::new(None));
    let scheduler = RedrawScheduler { window: Rc::clone(&window), armed: Rc::clone(&armed), next_id: 0 };
    let current = Rc::new(Cell::new(SYMBOLS[sym_idx]));
    let sink = {
        let window = Rc::clone(&window);
        let current = Rc::clone(&current);
        let mut last: Option<Selection> = None;
        move |selection: Selection, candle: Option<Candle>| {
            // emitted every tick; only touch the title bar on change
            if last != Some(selection) {
                last = Some(selection);
                window.set_title(&title_for(&current.get(), None, candle));
            }
        }
    };
    let mut render_loop = Some(RenderLoop::new(scheduler, sink, opts)?);

    let mut load_symbol = move |lp: &mut RenderLoop<RedrawScheduler, _>, symbol: Symbol, source: &mut dyn StreamSource| {
        window.set_title(&title_for(&symbol, LoadStatus::Loading.message().as_deref(), None));
        let status = load(&LoaderParams::from_symbol(Some(symbol.id)), source);
        match status.series() {
            Some(series) => lp.load(series.clone()),
            None => {
                lp.clear();
                let bg = lp.options().theme.background;
                lp.surface_mut().canvas().clear(bg);
            }
        }
        window.set_title(&title_for(&symbol, status.message().as_deref(), None));
    };

    if let Some(lp) = render_loop.as_mut() {
        load_symbol(lp, SYMBOLS[sym_idx], source.as_mut());
    }
    info!(symbol = SYMBOLS[sym_idx].id, "window ready");

    event_loop.run(move |event, _, cf| {
        *cf = ControlFlow::Wait;
        let Some(lp) = render_loop.as_mut() else { return };
        match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => {
                    if let Some(lp) = render_loop.take() {
                        lp.shutdown();
                    }
                    *cf = ControlFlow::Exit;
                }
                WindowEvent::Resized(new_size) => {
                    let viewport = Viewport::new(new_size.width.max(1) as f32, new_size.height.max(1) as f32);
                    if let Err(e) = lp.resize(viewport) {
                        warn!("resize failed: {e}");
                    }
                    lp.scheduler().window.request_redraw();
                }
                WindowEvent::CursorMoved { position, .. } => {
                    lp.set_pointer(PointerState::at(position.x as f32, position.y as f32));
                }
                WindowEvent::CursorLeft { .. } => lp.set_pointer(PointerState::Outside),
                WindowEvent::KeyboardInput { input, .. } if input.state == ElementState::Pressed => {
                    sym_idx = (sym_idx + 1) % SYMBOLS.len();
                    current.set(SYMBOLS[sym_idx]);
                    load_symbol(lp, SYMBOLS[sym_idx], source.as_mut());
                    lp.scheduler().window.request_redraw();
                }
                _ => {}
            },
            Event::RedrawRequested(_) => {
                if let Some(handle) = armed.take() {
                    lp.on_frame(handle);
                }
                if let Err(e) = present(lp, &mut surface) {
                    warn!("present failed: {e:#}");
                }
            }
            _ => {}
        }
    });
}

/// Copy the last painted frame into the window as 0RGB pixels.
fn present<E: wickline_core::SelectionSink>(
    lp: &mut RenderLoop<RedrawScheduler, E>,
    surface: &mut softbuffer::Surface,
) -> Result<()> {
    let (w, h) = lp.viewport().surface_size();
    let (Some(nw), Some(nh)) = (NonZeroU32::new(w as u32), NonZeroU32::new(h as u32)) else {
        return Ok(());
    };
    surface.resize(nw, nh).map_err(|e| anyhow!("resize: {e}"))?;

    let rgba = lp.read_rgba8()?;
    let mut buffer = surface.buffer_mut().map_err(|e| anyhow!("buffer: {e}"))?;
    for (dst, px) in buffer.iter_mut().zip(rgba.chunks_exact(4)) {
        *dst = ((px[0] as u32) << 16) | ((px[1] as u32) << 8) | px[2] as u32;
    }
    buffer.present().map_err(|e| anyhow!("present: {e}"))?;
    debug!(frames = lp.frames_rendered(), "presented");
    Ok(())
}
