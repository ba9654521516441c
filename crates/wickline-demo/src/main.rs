// File: crates/wickline-demo/src/main.rs
// Summary: Demo loads a market stream (JSON file, per-symbol data dir or synthetic feed),
// renders the candle chart to a PNG and reports the candle under the pointer.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use wickline_core::loader::{read_stream_file, JsonFileSource, SyntheticSource};
use wickline_core::{decode, load, symbols, theme, CandleChart, CandleInfo, LoadStatus, LoaderParams, PointerState, RenderOptions};

#[derive(Parser, Debug)]
#[command(name = "wickline-demo", about = "Render a candlestick chart from a market data stream")]
struct Args {
    /// JSON stream file (flat array of numbers and nulls). Overrides --symbol.
    #[arg(long)]
    stream: Option<PathBuf>,

    /// Trading pair to load, e.g. BTCUSDT
    #[arg(long)]
    symbol: Option<String>,

    /// Directory holding `<SYMBOL>.json` stream files; synthetic data when omitted
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Theme preset name
    #[arg(long, default_value = "dark")]
    theme: String,

    #[arg(long, default_value_t = wickline_core::types::WIDTH)]
    width: i32,

    #[arg(long, default_value_t = wickline_core::types::HEIGHT)]
    height: i32,

    /// Pointer position as `x,y` in pixels
    #[arg(long, value_parser = parse_pointer)]
    pointer: Option<PointerState>,

    /// Output PNG path
    #[arg(long)]
    out: Option<PathBuf>,
}

fn parse_pointer(raw: &str) -> Result<PointerState, String> {
    let (x, y) = raw.split_once(',').ok_or_else(|| format!("expected x,y, got '{raw}'"))?;
    let x: f32 = x.trim().parse().map_err(|e| format!("bad x '{x}': {e}"))?;
    let y: f32 = y.trim().parse().map_err(|e| format!("bad y '{y}': {e}"))?;
    Ok(PointerState::at(x, y))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let (label, status) = resolve_status(&args)?;
    if let Some(msg) = status.message() {
        println!("{msg}");
    }
    if let LoadStatus::Error(e) = &status {
        anyhow::bail!("could not load {label}: {e}");
    }

    let series = status.series().cloned().unwrap_or_default();
    println!("Loaded {} candles for {label}", series.len());
    if let Some((lo, hi)) = series.price_bounds() {
        println!("Price range: [{lo:.4}, {hi:.4}]");
    }

    let mut opts = RenderOptions::default();
    opts.width = args.width.max(1);
    opts.height = args.height.max(1);
    opts.theme = theme::find(&args.theme);
    if !opts.theme.name.eq_ignore_ascii_case(&args.theme) {
        warn!(requested = %args.theme, "unknown theme, using {}", opts.theme.name);
    }
    opts.pointer = args.pointer.unwrap_or(PointerState::Outside);

    let out = args.out.clone().unwrap_or_else(|| out_name(&label));
    let chart = CandleChart::new(series);
    let frame = chart.render_to_png(&opts, &out)?;
    println!("Wrote {}", out.display());

    match frame.selection {
        Some(i) => {
            info!(index = i, "candle selected");
            println!("Selected candle #{i}\n{}", CandleInfo::new(chart.candle(frame.selection)));
        }
        None => println!("{}", CandleInfo::new(None)),
    }
    Ok(())
}

/// Pick the stream source from the arguments and run one load.
fn resolve_status(args: &Args) -> Result<(String, LoadStatus)> {
    if let Some(path) = &args.stream {
        let stream = read_stream_file(path)?;
        let label = path.file_stem().and_then(|s| s.to_str()).unwrap_or("stream").to_string();
        return Ok((label, LoadStatus::Success(decode(&stream))));
    }

    let symbol = match args.symbol.as_deref() {
        Some(raw) => {
            let known = symbols::find(raw);
            if known.is_none() {
                warn!(symbol = raw, "not a built-in pair");
            }
            Some(known.map(|s| s.id.to_string()).unwrap_or_else(|| raw.to_string()))
        }
        None => None,
    };
    let params = LoaderParams::from_symbol(symbol.as_deref());
    let label = symbol.unwrap_or_else(|| "none".to_string());

    let status = match &args.data_dir {
        Some(dir) => {
            std::fs::metadata(dir).with_context(|| format!("data dir {}", dir.display()))?;
            load(&params, &mut JsonFileSource::new(dir))
        }
        None => load(&params, &mut SyntheticSource { gap_every: Some(17), ..Default::default() }),
    };
    Ok((label, status))
}

/// Produce output file name like target/out/wickline_<label>.png
fn out_name(label: &str) -> PathBuf {
    let mut out = PathBuf::from("target/out");
    std::fs::create_dir_all(&out).ok();
    out.push(format!("wickline_{}.png", label.to_ascii_lowercase()));
    out
}
