// File: crates/wickline-core/src/loader.rs
// Summary: Load status contract between the data source and the chart, plus two
// stream sources (JSON files on disk and a deterministic synthetic feed).

use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::{debug, info};

use crate::decode::{decode, encode_stream, parse_stream, MarketValue};
use crate::series::{Candle, CandleSeries};

/// What the host asks the loader for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoaderParams {
    Disabled,
    Enabled { symbol: String },
}

impl LoaderParams {
    /// Enabled when a symbol is present, disabled otherwise.
    pub fn from_symbol(symbol: Option<&str>) -> Self {
        match symbol {
            Some(s) if !s.trim().is_empty() => Self::Enabled { symbol: s.trim().to_string() },
            _ => Self::Disabled,
        }
    }
}

/// Observable load state. Only `Success` carries candles into the renderer.
#[derive(Clone, Debug, PartialEq)]
pub enum LoadStatus {
    Idle,
    Loading,
    Error(String),
    Success(CandleSeries),
}

impl LoadStatus {
    /// Status line for hosts; `None` once candles are available.
    pub fn message(&self) -> Option<String> {
        match self {
            Self::Idle => Some("No asset selected".to_string()),
            Self::Loading => Some("Loading...".to_string()),
            Self::Error(e) => Some(format!("Error: {e}")),
            Self::Success(_) => None,
        }
    }

    pub fn series(&self) -> Option<&CandleSeries> {
        match self {
            Self::Success(s) => Some(s),
            _ => None,
        }
    }
}

/// Fetches the raw stream for a symbol; failures are plain messages.
pub trait StreamSource {
    fn fetch(&mut self, symbol: &str) -> Result<Vec<MarketValue>, String>;
}

/// Runs one load: disabled params stay idle, fetch errors pass through unchanged,
/// successful streams are decoded.
pub fn load<S: StreamSource + ?Sized>(params: &LoaderParams, source: &mut S) -> LoadStatus {
    match params {
        LoaderParams::Disabled => LoadStatus::Idle,
        LoaderParams::Enabled { symbol } => match source.fetch(symbol) {
            Ok(stream) => {
                let series = decode(&stream);
                info!(%symbol, candles = series.len(), "market data loaded");
                LoadStatus::Success(series)
            }
            Err(e) => {
                info!(%symbol, error = %e, "market data failed");
                LoadStatus::Error(e)
            }
        },
    }
}

/// Reads `<dir>/<SYMBOL>.json`, each file holding the wire stream.
#[derive(Clone, Debug)]
pub struct JsonFileSource {
    dir: PathBuf,
}

impl JsonFileSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, symbol: &str) -> PathBuf {
        self.dir.join(format!("{}.json", symbol.to_ascii_uppercase()))
    }
}

/// Read and parse a stream file.
pub fn read_stream_file(path: &Path) -> anyhow::Result<Vec<MarketValue>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Error fetching data from {}", path.display()))?;
    let stream = parse_stream(&raw).with_context(|| format!("parsing {}", path.display()))?;
    debug!(path = %path.display(), slots = stream.len(), "read stream file");
    Ok(stream)
}

impl StreamSource for JsonFileSource {
    fn fetch(&mut self, symbol: &str) -> Result<Vec<MarketValue>, String> {
        read_stream_file(&self.path_for(symbol)).map_err(|e| format!("{e:#}"))
    }
}

/// Deterministic cosine-wave feed encoded in the wire shape.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SyntheticSource {
    pub candle_count: usize,
    pub periods: u32,
    /// Body half-height and wick extension, in price units.
    pub candle_ratio: f64,
    /// Replace every `n`-th candle with a gap marker.
    pub gap_every: Option<usize>,
}

impl Default for SyntheticSource {
    fn default() -> Self {
        Self { candle_count: 250, periods: 4, candle_ratio: 0.1, gap_every: None }
    }
}

impl SyntheticSource {
    pub fn candle(&self, i: usize) -> Candle {
        let radians = (i as f64 / self.candle_count as f64) * std::f64::consts::PI * 2.0 * self.periods as f64;
        let index_price = radians.cos();
        let index_slope = -radians.sin();
        let change = self.candle_ratio * signum(index_slope);
        let open = index_price - change;
        let close = index_price + change;
        Candle::new(open, open.max(close) + self.candle_ratio, open.min(close) - self.candle_ratio, close)
    }

    pub fn stream(&self) -> Vec<MarketValue> {
        let slots: Vec<Option<Candle>> = (0..self.candle_count)
            .map(|i| match self.gap_every {
                Some(n) if n > 0 && i > 0 && i % n == 0 => None,
                _ => Some(self.candle(i)),
            })
            .collect();
        encode_stream(&slots)
    }
}

// zero stays zero so the turning points come out flat-bodied
fn signum(v: f64) -> f64 {
    if v > 0.0 { 1.0 } else if v < 0.0 { -1.0 } else { 0.0 }
}

impl StreamSource for SyntheticSource {
    fn fetch(&mut self, _symbol: &str) -> Result<Vec<MarketValue>, String> {
        Ok(self.stream())
    }
}
