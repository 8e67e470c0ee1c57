//! Sweep driver: one pass over the samples, one tracker step per sample.
//!
//! Pipeline
//! 1. Validate input and round every sample to 6 decimals.
//! 2. Seed both hulls from samples 0 and 1.
//! 3. For x = 2..n: extend both hulls, evaluate the separators, collect any
//!    emitted pivot.
//! 4. Close the last open tunnel into the final vertex and the endpoint.
//!
//! A zero width (after rounding) collapses both hulls onto the samples and
//! every window onto a point; that case is answered by `zero_width` instead.
//!
//! All state is local to the call, so the functions are reentrant.

mod zero_width;

use tracing::debug;

use crate::error::PolygonError;
use crate::geom::round6;
use crate::separator::{Step, Tracker};
use crate::types::{PivotRecord, Point, TunnelCfg};

/// Vertices of the minimal polygon keeping every sample within `cfg.width`.
///
/// The first vertex lies on column 0 and the last one on column `n-1`.
pub fn optimal_polygon(samples: &[f64], cfg: TunnelCfg) -> Result<Vec<Point>, PolygonError> {
    Ok(optimal_polygon_records(samples, cfg)?
        .into_iter()
        .map(|r| r.pivot)
        .collect())
}

/// Like `optimal_polygon`, but keeps the anchors active at each pivot.
pub fn optimal_polygon_records(
    samples: &[f64],
    cfg: TunnelCfg,
) -> Result<Vec<PivotRecord>, PolygonError> {
    validate(samples, cfg)?;
    let ys: Vec<f64> = samples.iter().map(|&y| round6(y)).collect();
    let records = if round6(cfg.width) == 0.0 {
        zero_width::records(&ys)
    } else {
        sweep(&ys, cfg.width)?
    };
    debug!(
        samples = ys.len(),
        width = cfg.width,
        pivots = records.len(),
        "optimal_polygon"
    );
    Ok(records)
}

fn validate(samples: &[f64], cfg: TunnelCfg) -> Result<(), PolygonError> {
    if samples.len() < 2 {
        return Err(PolygonError::TooFewSamples { len: samples.len() });
    }
    if !cfg.width.is_finite() || cfg.width < 0.0 {
        return Err(PolygonError::InvalidWidth { width: cfg.width });
    }
    if let Some((index, &value)) = samples.iter().enumerate().find(|(_, y)| !y.is_finite()) {
        return Err(PolygonError::NonFiniteSample { index, value });
    }
    Ok(())
}

fn sweep(ys: &[f64], width: f64) -> Result<Vec<PivotRecord>, PolygonError> {
    let mut tracker = Tracker::new(ys[0], ys[1], width);
    let mut records = Vec::new();
    for (i, &y) in ys.iter().enumerate().skip(2) {
        if let Step::Break(rec) = tracker.advance(i as f64, y)? {
            records.push(rec);
        }
    }
    records.extend(tracker.close(ys)?);
    Ok(records)
}
