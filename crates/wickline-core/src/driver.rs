// File: crates/wickline-core/src/driver.rs
// Summary: Render loop driver; owns series, viewport and pointer, paints once per
// host frame and emits the selected candle on every tick.
// Notes:
// - The host's "next frame" primitive is fire-once. Each tick re-arms it, and the
//   outstanding handle is the only thing that can trigger the next tick, so
//   cancelling it stops the loop.
// - Pointer writes are last-write-wins; a tick reads whatever is current.

use skia_safe as skia;
use tracing::{debug, trace};

use crate::chart::{new_surface, read_rgba8, CandleChart, RenderOptions};
use crate::error::Result;
use crate::hit_test::Selection;
use crate::series::{Candle, CandleSeries};
use crate::types::{PointerState, Viewport};

/// Token for one requested frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub u64);

/// Host-side frame pacing (display refresh, redraw requests, timers).
pub trait FrameScheduler {
    /// Ask for one callback on the next frame.
    fn request_frame(&mut self) -> FrameHandle;
    /// Withdraw a request; a cancelled handle must never be delivered.
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// Receives the selection once per tick, changed or not.
pub trait SelectionSink {
    fn emit(&mut self, selection: Selection, candle: Option<Candle>);
}

impl<F: FnMut(Selection, Option<Candle>)> SelectionSink for F {
    fn emit(&mut self, selection: Selection, candle: Option<Candle>) {
        self(selection, candle)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopState {
    /// No series loaded and nothing scheduled.
    Idle,
    /// A series is loaded and a frame is always pending.
    Running,
}

pub struct RenderLoop<S: FrameScheduler, E: SelectionSink> {
    scheduler: S,
    sink: E,
    chart: CandleChart,
    opts: RenderOptions,
    viewport: Viewport,
    surface: skia::Surface,
    pointer: PointerState,
    selection: Selection,
    state: LoopState,
    pending: Option<FrameHandle>,
    frames: u64,
}

impl<S: FrameScheduler, E: SelectionSink> RenderLoop<S, E> {
    /// Build an idle loop with a surface sized from `opts`.
    pub fn new(scheduler: S, sink: E, opts: RenderOptions) -> Result<Self> {
        let surface = new_surface(opts.width, opts.height)?;
        Ok(Self {
            scheduler,
            sink,
            chart: CandleChart::new(CandleSeries::empty()),
            viewport: opts.viewport(),
            opts,
            surface,
            pointer: PointerState::Outside,
            selection: None,
            state: LoopState::Idle,
            pending: None,
            frames: 0,
        })
    }

    pub fn state(&self) -> LoopState { self.state }

    pub fn selection(&self) -> Selection { self.selection }

    pub fn selected_candle(&self) -> Option<Candle> { self.chart.candle(self.selection) }

    pub fn pointer(&self) -> PointerState { self.pointer }

    pub fn viewport(&self) -> Viewport { self.viewport }

    pub fn series(&self) -> &CandleSeries { &self.chart.series }

    pub fn options(&self) -> &RenderOptions { &self.opts }

    /// Ticks rendered since construction.
    pub fn frames_rendered(&self) -> u64 { self.frames }

    pub fn pending_frame(&self) -> Option<FrameHandle> { self.pending }

    pub fn scheduler(&self) -> &S { &self.scheduler }

    pub fn scheduler_mut(&mut self) -> &mut S { &mut self.scheduler }

    pub fn surface_mut(&mut self) -> &mut skia::Surface { &mut self.surface }

    /// Last painted frame as RGBA8.
    pub fn read_rgba8(&mut self) -> Result<Vec<u8>> {
        read_rgba8(&mut self.surface)
    }

    /// Replace the series. A non-empty series starts the loop; an empty one stops it.
    pub fn load(&mut self, series: CandleSeries) {
        if series.is_empty() {
            self.clear();
            return;
        }
        debug!(candles = series.len(), "series loaded");
        self.chart.set_series(series);
        if self.state == LoopState::Idle {
            self.state = LoopState::Running;
            self.arm();
            debug!("render loop running");
        }
    }

    /// Drop the series and go idle, cancelling the pending frame.
    pub fn clear(&mut self) {
        self.cancel_pending();
        self.chart.set_series(CandleSeries::empty());
        self.selection = None;
        if self.state == LoopState::Running {
            self.state = LoopState::Idle;
            debug!("render loop idle");
        }
    }

    /// New surface size, effective from the next tick. On error nothing changes.
    pub fn resize(&mut self, viewport: Viewport) -> Result<()> {
        let (w, h) = viewport.surface_size();
        if (w, h) != (self.surface.width(), self.surface.height()) {
            self.surface = new_surface(w, h)?;
            debug!(width = w, height = h, "surface resized");
        }
        self.opts.width = w;
        self.opts.height = h;
        self.viewport = viewport;
        Ok(())
    }

    pub fn set_pointer(&mut self, pointer: PointerState) {
        self.pointer = pointer;
    }

    /// Replace the render options. The surface is resized first; if that fails
    /// the previous options stay in effect.
    pub fn set_options(&mut self, opts: RenderOptions) -> Result<()> {
        self.resize(opts.viewport())?;
        self.opts = RenderOptions { width: self.opts.width, height: self.opts.height, ..opts };
        Ok(())
    }

    /// Host callback for a delivered frame. Stale or unexpected handles are ignored
    /// and return `None`; otherwise the frame is painted, the selection emitted and
    /// the next frame requested.
    pub fn on_frame(&mut self, handle: FrameHandle) -> Option<Selection> {
        if self.state != LoopState::Running || self.pending != Some(handle) {
            trace!(?handle, "ignoring stale frame");
            return None;
        }
        self.pending = None;

        let frame = self.chart.draw(self.surface.canvas(), self.viewport, self.pointer, &self.opts);
        self.selection = frame.selection;
        self.frames += 1;
        self.sink.emit(self.selection, self.chart.candle(self.selection));

        self.arm();
        Some(self.selection)
    }

    /// Tear the loop down; the pending frame is cancelled before the loop is dropped.
    pub fn shutdown(mut self) {
        self.teardown();
    }

    fn arm(&mut self) {
        self.pending = Some(self.scheduler.request_frame());
    }

    fn cancel_pending(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel_frame(handle);
        }
    }

    fn teardown(&mut self) {
        self.cancel_pending();
        if self.state == LoopState::Running {
            self.state = LoopState::Idle;
            debug!(frames = self.frames, "render loop torn down");
        }
    }
}

impl<S: FrameScheduler, E: SelectionSink> Drop for RenderLoop<S, E> {
    fn drop(&mut self) {
        self.teardown();
    }
}

/// Scheduler driven by explicit calls; for headless hosts and tests.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next_id: u64,
    armed: Option<FrameHandle>,
    pub requested: u64,
    pub cancelled: u64,
}

impl ManualScheduler {
    pub fn new() -> Self { Self::default() }

    /// Take the armed handle as if the host frame fired.
    pub fn fire(&mut self) -> Option<FrameHandle> {
        self.armed.take()
    }

    pub fn armed(&self) -> Option<FrameHandle> { self.armed }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self) -> FrameHandle {
        self.next_id += 1;
        self.requested += 1;
        let handle = FrameHandle(self.next_id);
        self.armed = Some(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if self.armed == Some(handle) {
            self.armed = None;
            self.cancelled += 1;
        }
    }
}

/// Fire `ticks` frames on a loop driven by a [`ManualScheduler`]; returns the last selection.
pub fn run_ticks<E: SelectionSink>(lp: &mut RenderLoop<ManualScheduler, E>, ticks: usize) -> Selection {
    let mut last = None;
    for _ in 0..ticks {
        let Some(handle) = lp.scheduler_mut().fire() else { break };
        if let Some(sel) = lp.on_frame(handle) {
            last = sel;
        }
    }
    last
}
