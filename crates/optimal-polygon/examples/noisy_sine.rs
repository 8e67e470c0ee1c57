//! Compression probe: how many vertices does a noisy sine need per width?
//!
//! Purpose
//! - Show the pivot count shrinking as the tunnel widens on one fixed draw.
//! - Report the worst sample deviation next to it as a containment check.

use std::time::Instant;

use optimal_polygon::eval::max_deviation;
use optimal_polygon::synth::{draw_series, ReplayToken, SeriesCfg, SeriesKind};
use optimal_polygon::{optimal_polygon, TunnelCfg};

fn main() {
    let cfg = SeriesCfg {
        kind: SeriesKind::NoisySine {
            period: 50.0,
            amplitude: 3.0,
            noise: 0.2,
        },
        len: 2_000,
    };
    let ys = draw_series(cfg, ReplayToken::new(2024, 0));
    println!("width  pivots  max_dev  ms");
    for width in [0.05, 0.1, 0.25, 0.5, 1.0, 2.0] {
        let start = Instant::now();
        let q = optimal_polygon(&ys, TunnelCfg::with_width(width))
            .expect("noisy sine should not hit degenerate geometry");
        let ms = start.elapsed().as_secs_f64() * 1e3;
        println!(
            "{:<6} {:<7} {:<8.5} {:.3}",
            width,
            q.len(),
            max_deviation(&ys, &q),
            ms
        );
    }
}
