// File: crates/wickline-core/src/decode.rs
// Summary: Market data decoder; flat (open, high, low, close, volume) stream with
// single-slot gap markers -> candle series.
//
// Wire shape: a JSON array of numbers and nulls. Every candle takes five slots
// except a missing interval, which takes exactly one `null`. Volume is nullable
// and never rendered.

use tracing::{debug, warn};

use crate::error::Result;
use crate::series::{Candle, CandleSeries};

/// One stream slot; `None` is a gap marker (or a null volume inside a tuple).
pub type MarketValue = Option<f64>;

/// Slots consumed by one real candle.
pub const VALUES_PER_CANDLE: usize = 5;

/// Counters collected while decoding, mostly for logging.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DecodeStats {
    pub candles: usize,
    pub gaps_filled: usize,
    pub leading_gaps: usize,
    pub malformed_tuples: usize,
    pub trailing_slots: usize,
}

/// Decode a flat market-data stream into candles. Never fails.
pub fn decode(stream: &[MarketValue]) -> CandleSeries {
    decode_with_stats(stream).0
}

/// Same as [`decode`], also returning what was skipped or synthesized.
pub fn decode_with_stats(stream: &[MarketValue]) -> (CandleSeries, DecodeStats) {
    let mut candles: Vec<Candle> = Vec::with_capacity(stream.len() / VALUES_PER_CANDLE + 1);
    let mut stats = DecodeStats::default();
    // Close of the last emitted candle; `None` until real data shows up.
    let mut prev_close: Option<f64> = None;
    let mut i = 0usize;

    while i < stream.len() {
        if stream[i].is_none() {
            match prev_close {
                None => stats.leading_gaps += 1,
                Some(close) => {
                    candles.push(Candle::flat(close));
                    stats.gaps_filled += 1;
                }
            }
            i += 1;
            continue;
        }

        let Some(tuple) = stream.get(i..i + VALUES_PER_CANDLE) else {
            stats.trailing_slots = stream.len() - i;
            break;
        };

        match (tuple[0], tuple[1], tuple[2], tuple[3]) {
            (Some(open), Some(high), Some(low), Some(close)) => {
                candles.push(Candle::new(open, high, low, close));
                prev_close = Some(close);
            }
            _ => {
                warn!(offset = i, "dropping tuple with a null price slot");
                stats.malformed_tuples += 1;
            }
        }
        i += VALUES_PER_CANDLE;
    }

    stats.candles = candles.len();
    debug!(
        slots = stream.len(),
        candles = stats.candles,
        gaps_filled = stats.gaps_filled,
        leading_gaps = stats.leading_gaps,
        malformed = stats.malformed_tuples,
        trailing = stats.trailing_slots,
        "decoded market data stream"
    );
    (CandleSeries::new(candles), stats)
}

/// Parse the wire form (`[1.0, 2.0, null, ...]`) into stream slots.
pub fn parse_stream(json: &str) -> Result<Vec<MarketValue>> {
    Ok(serde_json::from_str(json)?)
}

/// Encode candles back into the wire shape; `None` entries become gap markers.
/// Volume slots are written as `null`.
pub fn encode_stream(candles: &[Option<Candle>]) -> Vec<MarketValue> {
    let mut out = Vec::with_capacity(candles.len() * VALUES_PER_CANDLE);
    for c in candles {
        match c {
            Some(c) => out.extend([Some(c.open), Some(c.high), Some(c.low), Some(c.close), None]),
            None => out.push(None),
        }
    }
    out
}
