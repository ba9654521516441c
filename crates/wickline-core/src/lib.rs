// File: crates/wickline-core/src/lib.rs
// Summary: Core library entry point; exports stream decoding, candle geometry, rendering and the render loop.

pub mod chart;
pub mod decode;
pub mod driver;
pub mod error;
pub mod geometry;
pub mod hit_test;
pub mod info;
pub mod loader;
pub mod mapper;
pub mod render;
pub mod scale;
pub mod series;
pub mod symbols;
pub mod text;
pub mod theme;
pub mod types;

pub use chart::{CandleChart, Frame, RenderOptions};
pub use decode::{decode, parse_stream, MarketValue};
pub use driver::{FrameHandle, FrameScheduler, LoopState, ManualScheduler, RenderLoop, SelectionSink};
pub use error::ChartError;
pub use hit_test::{hit_test, Selection};
pub use info::CandleInfo;
pub use loader::{load, LoadStatus, LoaderParams, StreamSource};
pub use mapper::{CoordinateMapper, MapperConfig};
pub use series::{Candle, CandleKind, CandleSeries};
pub use theme::Theme;
pub use text::TextShaper;
pub use types::{PointerState, Viewport};
