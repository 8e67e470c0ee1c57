use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use optimal_polygon::prelude::*;
use polars::prelude::*;
use serde::Serialize;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::Level;
use tracing_subscriber::fmt::SubscriberBuilder;

mod provenance;

use provenance::{write_sidecar, Payload};

#[derive(Parser)]
#[command(name = "cli")]
#[command(about = "Optimal polygon approximation of sampled series")]
struct Cmd {
    /// Show per-call debug events from the library
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Approximate a CSV or Parquet series and write the pivots as JSON
    Run(RunArgs),
    /// Write a seeded synthetic series as CSV (column `y`)
    Synth(SynthArgs),
    /// Print a small provenance JSON block
    Report,
}

#[derive(Args, Clone, Debug)]
struct RunArgs {
    #[arg(long)]
    input: PathBuf,
    /// Column to read; defaults to the first numeric column
    #[arg(long)]
    column: Option<String>,
    /// Tunnel half-width
    #[arg(long, default_value_t = 0.5)]
    width: f64,
    /// Write full pivot records instead of bare `[x, y]` pairs
    #[arg(long)]
    debug: bool,
    #[arg(long)]
    out: PathBuf,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Kind {
    Walk,
    Sine,
}

#[derive(Args, Clone, Debug)]
struct SynthArgs {
    #[arg(long, value_enum, default_value_t = Kind::Walk)]
    kind: Kind,
    #[arg(long, default_value_t = 200)]
    len: usize,
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Draw index within the seed's stream
    #[arg(long, default_value_t = 0)]
    index: u64,
    #[arg(long)]
    out: PathBuf,
}

fn main() -> Result<()> {
    let cmd = Cmd::parse();
    let level = if cmd.verbose { Level::DEBUG } else { Level::INFO };
    SubscriberBuilder::default()
        .with_target(false)
        .with_max_level(level)
        .init();
    match cmd.action {
        Action::Run(args) => run(&args),
        Action::Synth(args) => synth(&args),
        Action::Report => report(),
    }
}

/// JSON shape of one pivot record in `--debug` output.
#[derive(Serialize)]
struct RecordOut {
    pivot: [f64; 2],
    kind: &'static str,
    separator: Option<[[f64; 2]; 2]>,
    window: [[f64; 2]; 2],
}

impl From<&PivotRecord> for RecordOut {
    fn from(r: &PivotRecord) -> Self {
        let xy = |p: Point| [p.x, p.y];
        Self {
            pivot: xy(r.pivot),
            kind: kind_name(r.kind),
            separator: r.separator.map(|(a, b)| [xy(a), xy(b)]),
            window: [xy(r.window.0), xy(r.window.1)],
        }
    }
}

fn kind_name(kind: PivotKind) -> &'static str {
    match kind {
        PivotKind::Upper => "upper",
        PivotKind::Lower => "lower",
        PivotKind::Closing => "closing",
        PivotKind::End => "end",
        PivotKind::Sample => "sample",
    }
}

fn run(args: &RunArgs) -> Result<()> {
    tracing::info!(input = %args.input.display(), column = ?args.column, width = args.width, "run");
    let ys = read_series(&args.input, args.column.as_deref())?;
    let records = optimal_polygon_records(&ys, TunnelCfg::with_width(args.width))
        .with_context(|| format!("approximating {}", args.input.display()))?;
    let pivots: Vec<Point> = records.iter().map(|r| r.pivot).collect();
    let max_dev = max_deviation(&ys, &pivots);
    tracing::info!(
        samples = ys.len(),
        pivots = pivots.len(),
        max_dev,
        "approximated"
    );

    create_parent(&args.out)?;
    let body = if args.debug {
        let out: Vec<RecordOut> = records.iter().map(RecordOut::from).collect();
        serde_json::to_vec_pretty(&out)?
    } else {
        let out: Vec<[f64; 2]> = pivots.iter().map(|p| [p.x, p.y]).collect();
        serde_json::to_vec_pretty(&out)?
    };
    std::fs::write(&args.out, body).with_context(|| format!("writing {}", args.out.display()))?;

    let params = serde_json::json!({
        "input": args.input.to_string_lossy(),
        "column": args.column,
        "width": args.width,
        "debug": args.debug,
        "samples": ys.len(),
        "pivots": pivots.len(),
        "max_deviation": max_dev,
    });
    write_sidecar(&args.out, Payload::new("run", params))?;
    Ok(())
}

/// Read one column of a CSV (or `.parquet`) file as `f64`; nulls are rejected.
fn read_series(input: &Path, column: Option<&str>) -> Result<Vec<f64>> {
    let lf = match input.extension().and_then(|e| e.to_str()) {
        Some("parquet") => LazyFrame::scan_parquet(input, ScanArgsParquet::default())?,
        _ => LazyCsvReader::new(input)
            .with_infer_schema_length(Some(100))
            .finish()?,
    };
    let df = lf
        .collect()
        .with_context(|| format!("reading {}", input.display()))?;
    let series = match column {
        Some(name) => df.column(name)?.clone(),
        None => df
            .get_columns()
            .iter()
            .find(|s| s.dtype().is_numeric())
            .cloned()
            .ok_or_else(|| anyhow!("no numeric column in {}", input.display()))?,
    };
    let values = series.cast(&DataType::Float64)?;
    values
        .f64()?
        .into_iter()
        .enumerate()
        .map(|(row, v)| v.ok_or_else(|| anyhow!("missing value in row {row}")))
        .collect()
}

fn synth(args: &SynthArgs) -> Result<()> {
    tracing::info!(kind = ?args.kind, len = args.len, seed = args.seed, index = args.index, "synth");
    let kind = match args.kind {
        Kind::Walk => SeriesKind::RandomWalk { step: 1.0 },
        Kind::Sine => SeriesKind::NoisySine {
            period: 50.0,
            amplitude: 5.0,
            noise: 0.5,
        },
    };
    let cfg = SeriesCfg {
        kind,
        len: args.len,
    };
    let ys = draw_series(cfg, ReplayToken::new(args.seed, args.index));
    write_series(&args.out, ys)?;

    let params = serde_json::json!({
        "kind": format!("{:?}", args.kind).to_lowercase(),
        "len": args.len,
        "seed": args.seed,
        "index": args.index,
    });
    write_sidecar(&args.out, Payload::new("synth", params))?;
    Ok(())
}

fn write_series(out: &Path, ys: Vec<f64>) -> Result<()> {
    create_parent(out)?;
    let mut df = DataFrame::new(vec![Series::new("y".into(), ys)])?;
    let mut file = File::create(out).with_context(|| format!("creating {}", out.display()))?;
    CsvWriter::new(&mut file).finish(&mut df)?;
    Ok(())
}

fn report() -> Result<()> {
    let mut obj = provenance::header();
    obj["params"] = serde_json::json!({});
    obj["outputs"] = serde_json::json!([]);
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}

fn create_parent(out: &Path) -> Result<()> {
    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
    }
    Ok(())
}
