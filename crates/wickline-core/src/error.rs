// File: crates/wickline-core/src/error.rs
// Summary: Error type shared by the rendering and stream-parsing entry points.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChartError {
    /// No raster surface could be allocated for the requested size.
    #[error("failed to create raster surface ({width}x{height})")]
    Surface { width: i32, height: i32 },

    #[error("encode PNG failed")]
    Encode,

    #[error("pixel readback failed")]
    Readback,

    #[error("market data stream is not a JSON array of numbers and nulls: {0}")]
    Stream(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T, E = ChartError> = std::result::Result<T, E>;
