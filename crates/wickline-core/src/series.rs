// File: crates/wickline-core/src/series.rs
// Summary: Candle record, candle classification and the immutable candle series.
// Notes:
// - `CandleSeries` shares its storage, so the render loop can hold a snapshot
//   per tick while the caller keeps its own handle.

use std::ops::Index;
use std::sync::Arc;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Candle {
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

/// Drawing path chosen for a candle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CandleKind {
    /// `low == high`: no range, drawn as a neutral tick.
    Flat,
    /// `close >= open` with a nonzero range.
    Bullish,
    /// `open > close`.
    Bearish,
}

impl Candle {
    pub const fn new(open: f64, high: f64, low: f64, close: f64) -> Self {
        Self { open, high, low, close }
    }

    /// Candle with every price equal to `price` (used for gap slots).
    pub const fn flat(price: f64) -> Self {
        Self { open: price, high: price, low: price, close: price }
    }

    /// Classify for drawing. A flat range wins over direction; ties on
    /// `open == close` with a range count as bullish.
    pub fn kind(&self) -> CandleKind {
        if self.low == self.high {
            CandleKind::Flat
        } else if self.open > self.close {
            CandleKind::Bearish
        } else {
            CandleKind::Bullish
        }
    }
}

/// Ordered, read-only candle sequence in chronological order.
#[derive(Clone, Debug, PartialEq)]
pub struct CandleSeries {
    candles: Arc<[Candle]>,
}

impl CandleSeries {
    pub fn new(candles: Vec<Candle>) -> Self {
        Self { candles: candles.into() }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn len(&self) -> usize { self.candles.len() }

    pub fn is_empty(&self) -> bool { self.candles.is_empty() }

    pub fn get(&self, index: usize) -> Option<&Candle> { self.candles.get(index) }

    pub fn as_slice(&self) -> &[Candle] { &self.candles }

    pub fn iter(&self) -> std::slice::Iter<'_, Candle> { self.candles.iter() }

    /// Lowest low and highest high, or `None` for an empty series.
    pub fn price_bounds(&self) -> Option<(f64, f64)> {
        if self.candles.is_empty() {
            return None;
        }
        let (min, max) = self.candles.iter().fold(
            (f64::INFINITY, f64::NEG_INFINITY),
            |(min, max), c| (min.min(c.low), max.max(c.high)),
        );
        Some((min, max))
    }
}

impl Default for CandleSeries {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<Vec<Candle>> for CandleSeries {
    fn from(candles: Vec<Candle>) -> Self {
        Self::new(candles)
    }
}

impl FromIterator<Candle> for CandleSeries {
    fn from_iter<I: IntoIterator<Item = Candle>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl Index<usize> for CandleSeries {
    type Output = Candle;
    fn index(&self, index: usize) -> &Candle {
        &self.candles[index]
    }
}

impl<'a> IntoIterator for &'a CandleSeries {
    type Item = &'a Candle;
    type IntoIter = std::slice::Iter<'a, Candle>;
    fn into_iter(self) -> Self::IntoIter {
        self.candles.iter()
    }
}
