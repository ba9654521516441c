// File: crates/wickline-core/tests/render_loop.rs
// Purpose: Render loop state machine: arming, per-tick emission, stale frames, clear and teardown.

use std::cell::RefCell;
use std::rc::Rc;

use wickline_core::driver::run_ticks;
use wickline_core::{
    Candle, CandleSeries, FrameHandle, FrameScheduler, LoopState, ManualScheduler, PointerState, RenderLoop,
    RenderOptions, Selection, SelectionSink, Theme, Viewport,
};

/// Scheduler whose bookkeeping outlives the loop that owns it.
#[derive(Clone, Default)]
struct Shared(Rc<RefCell<ManualScheduler>>);

impl FrameScheduler for Shared {
    fn request_frame(&mut self) -> FrameHandle { self.0.borrow_mut().request_frame() }
    fn cancel_frame(&mut self, handle: FrameHandle) { self.0.borrow_mut().cancel_frame(handle) }
}

type Emitted = Rc<RefCell<Vec<(Selection, Option<Candle>)>>>;

fn three() -> CandleSeries {
    CandleSeries::new(vec![
        Candle::new(1.0, 2.0, 0.0, 1.0),
        Candle::new(1.0, 3.0, 0.0, 2.0),
        Candle::new(2.0, 2.0, 1.0, 1.0),
    ])
}

fn opts() -> RenderOptions {
    let mut opts = RenderOptions::default();
    opts.width = 300;
    opts.height = 100;
    opts.draw_info = false;
    opts
}

fn new_loop() -> (RenderLoop<Shared, impl SelectionSink>, Shared, Emitted) {
    let sched = Shared::default();
    let emitted: Emitted = Rc::default();
    let sink = {
        let emitted = emitted.clone();
        move |sel: Selection, candle: Option<Candle>| emitted.borrow_mut().push((sel, candle))
    };
    let lp = RenderLoop::new(sched.clone(), sink, opts()).expect("surface");
    (lp, sched, emitted)
}

fn fire<E: SelectionSink>(lp: &mut RenderLoop<Shared, E>, sched: &Shared) -> Option<Selection> {
    let handle = sched.0.borrow_mut().fire()?;
    lp.on_frame(handle)
}

#[test]
fn starts_idle_with_nothing_scheduled() {
    let (lp, sched, emitted) = new_loop();
    assert_eq!(lp.state(), LoopState::Idle);
    assert_eq!(lp.pending_frame(), None);
    assert_eq!(sched.0.borrow().requested, 0);
    assert!(emitted.borrow().is_empty());
}

#[test]
fn loading_a_series_arms_the_first_frame() {
    let (mut lp, sched, _) = new_loop();
    lp.load(three());
    assert_eq!(lp.state(), LoopState::Running);
    assert_eq!(sched.0.borrow().requested, 1);
    assert_eq!(lp.pending_frame(), sched.0.borrow().armed());

    // replacing the series while running does not double-arm
    lp.load(three());
    assert_eq!(sched.0.borrow().requested, 1);
}

#[test]
fn empty_series_keeps_the_loop_idle() {
    let (mut lp, sched, _) = new_loop();
    lp.load(CandleSeries::empty());
    assert_eq!(lp.state(), LoopState::Idle);
    assert_eq!(sched.0.borrow().requested, 0);
}

#[test]
fn every_tick_emits_once_and_rearms() {
    let (mut lp, sched, emitted) = new_loop();
    lp.load(three());
    for _ in 0..5 {
        assert_eq!(fire(&mut lp, &sched), Some(None));
    }
    assert_eq!(lp.frames_rendered(), 5);
    assert_eq!(emitted.borrow().len(), 5, "unchanged selections are still emitted");
    assert_eq!(sched.0.borrow().requested, 6);
    assert!(lp.pending_frame().is_some());
}

#[test]
fn pointer_is_read_on_the_next_tick() {
    let (mut lp, sched, emitted) = new_loop();
    lp.load(three());
    lp.set_pointer(PointerState::at(150.0, 50.0));
    lp.set_pointer(PointerState::at(250.0, 50.0)); // last write wins
    assert_eq!(lp.selection(), None, "nothing happens until the frame fires");

    assert_eq!(fire(&mut lp, &sched), Some(Some(2)));
    assert_eq!(lp.selected_candle(), Some(Candle::new(2.0, 2.0, 1.0, 1.0)));

    lp.set_pointer(PointerState::at(100.0, 50.0));
    assert_eq!(fire(&mut lp, &sched), Some(None));
    lp.set_pointer(PointerState::at(150.0, 50.0));
    assert_eq!(fire(&mut lp, &sched), Some(Some(1)));
    lp.set_pointer(PointerState::Outside);
    assert_eq!(fire(&mut lp, &sched), Some(None));

    let got: Vec<_> = emitted.borrow().iter().map(|(s, _)| *s).collect();
    assert_eq!(got, vec![Some(2), None, Some(1), None]);
    assert_eq!(emitted.borrow()[2].1, Some(Candle::new(1.0, 3.0, 0.0, 2.0)));
}

#[test]
fn stale_handles_are_ignored() {
    let (mut lp, sched, emitted) = new_loop();
    lp.load(three());
    let first = sched.0.borrow_mut().fire().expect("armed");
    assert!(lp.on_frame(first).is_some());
    // delivering the same handle twice does nothing
    assert_eq!(lp.on_frame(first), None);
    assert_eq!(lp.on_frame(FrameHandle(9_999)), None);
    assert_eq!(emitted.borrow().len(), 1);
}

#[test]
fn clear_cancels_and_goes_idle() {
    let (mut lp, sched, emitted) = new_loop();
    lp.load(three());
    let pending = lp.pending_frame().expect("pending");
    lp.clear();
    assert_eq!(lp.state(), LoopState::Idle);
    assert_eq!(sched.0.borrow().cancelled, 1);
    assert_eq!(sched.0.borrow().armed(), None);
    assert_eq!(lp.on_frame(pending), None);
    assert!(emitted.borrow().is_empty());

    // and it can be restarted
    lp.load(three());
    assert_eq!(fire(&mut lp, &sched), Some(None));
}

#[test]
fn loading_empty_series_while_running_stops() {
    let (mut lp, sched, _) = new_loop();
    lp.load(three());
    lp.load(CandleSeries::empty());
    assert_eq!(lp.state(), LoopState::Idle);
    assert_eq!(sched.0.borrow().armed(), None);
}

#[test]
fn teardown_cancels_the_outstanding_frame() {
    let (mut lp, sched, emitted) = new_loop();
    lp.load(three());
    fire(&mut lp, &sched);
    assert!(sched.0.borrow().armed().is_some());
    lp.shutdown();
    assert_eq!(sched.0.borrow().armed(), None);
    assert_eq!(sched.0.borrow().cancelled, 1);
    assert_eq!(emitted.borrow().len(), 1);
}

#[test]
fn dropping_the_loop_also_cancels() {
    let (mut lp, sched, _) = new_loop();
    lp.load(three());
    drop(lp);
    assert_eq!(sched.0.borrow().armed(), None);
    assert_eq!(sched.0.borrow().cancelled, 1);
}

#[test]
fn resize_applies_on_next_tick() {
    let (mut lp, sched, _) = new_loop();
    lp.load(three());
    lp.set_pointer(PointerState::at(150.0, 50.0));
    assert_eq!(fire(&mut lp, &sched), Some(Some(1)));

    lp.resize(Viewport::new(600.0, 100.0)).expect("resize");
    assert_eq!(lp.options().width, 600);
    // 200px slots: x=150 now falls inside candle 0's body (20..180)
    assert_eq!(fire(&mut lp, &sched), Some(Some(0)));
    assert_eq!(lp.read_rgba8().expect("pixels").len(), 600 * 100 * 4);
}

#[test]
fn manual_scheduler_helper_runs_ticks() {
    let mut count = 0usize;
    let mut lp = RenderLoop::new(ManualScheduler::new(), |_: Selection, _: Option<Candle>| count += 1, opts())
        .expect("surface");
    assert_eq!(run_ticks(&mut lp, 3), None, "idle loop has nothing armed");
    lp.load(three());
    lp.set_pointer(PointerState::at(50.0, 0.0));
    assert_eq!(run_ticks(&mut lp, 3), Some(0));
    assert_eq!(lp.frames_rendered(), 3);
    drop(lp);
    assert_eq!(count, 3);
}

#[test]
fn set_options_applies_theme_and_size() {
    let (mut lp, sched, _) = new_loop();
    lp.load(three());
    let mut next = opts();
    next.width = 600;
    next.height = 120;
    next.theme = Theme::light();
    lp.set_options(next).expect("surface");

    assert_eq!((lp.options().width, lp.options().height), (600, 120));
    assert_eq!(lp.options().theme.name, Theme::light().name);
    assert_eq!(lp.viewport(), Viewport::new(600.0, 120.0));

    assert!(fire(&mut lp, &sched).is_some());
    let px = lp.read_rgba8().expect("pixels");
    assert_eq!(px.len(), 600 * 120 * 4);
    let bg = Theme::light().background;
    assert_eq!(&px[..4], &[bg.r(), bg.g(), bg.b(), bg.a()]);
}

#[test]
fn failed_set_options_keeps_the_previous_configuration() {
    let (mut lp, _, _) = new_loop();
    let mut huge = opts();
    huge.width = i32::MAX;
    huge.theme = Theme::light();
    assert!(lp.set_options(huge).is_err());

    assert_eq!((lp.options().width, lp.options().height), (300, 100));
    assert_eq!(lp.options().theme.name, Theme::dark().name);
    assert_eq!(lp.viewport(), Viewport::new(300.0, 100.0));
    assert_eq!(lp.read_rgba8().expect("pixels").len(), 300 * 100 * 4);

    assert!(lp.resize(Viewport::new(i32::MAX as f32, 100.0)).is_err());
    assert_eq!(lp.viewport(), Viewport::new(300.0, 100.0));
    assert_eq!(lp.options().width, 300);
}
