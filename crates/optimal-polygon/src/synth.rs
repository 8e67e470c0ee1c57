//! Seeded synthetic series (random walks, noisy sines) with replay tokens.
//!
//! Purpose
//! - Give tests, benches and the CLI reproducible inputs without shipping
//!   data files.
//! - Determinism uses a replay token `(seed, index)` mixed into a single RNG,
//!   so draw `k` of a batch can be regenerated on its own.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Shape of the generated series.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SeriesKind {
    /// `y[0] = 0`, then uniform increments in `[-step, step]`.
    RandomWalk { step: f64 },
    /// `amplitude * sin(2π i / period)` plus uniform noise in `[-noise, noise]`.
    NoisySine {
        period: f64,
        amplitude: f64,
        noise: f64,
    },
}

/// Series sampler configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SeriesCfg {
    pub kind: SeriesKind,
    pub len: usize,
}

impl Default for SeriesCfg {
    fn default() -> Self {
        Self {
            kind: SeriesKind::RandomWalk { step: 1.0 },
            len: 100,
        }
    }
}

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}

impl ReplayToken {
    #[inline]
    pub fn new(seed: u64, index: u64) -> Self {
        Self { seed, index }
    }

    #[inline]
    fn to_std_rng(self) -> StdRng {
        // SplitMix64 finalizer on both halves of the token.
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        let k = mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15)));
        StdRng::seed_from_u64(k)
    }
}

/// Draw one series of `cfg.len` samples.
pub fn draw_series(cfg: SeriesCfg, tok: ReplayToken) -> Vec<f64> {
    let mut rng = tok.to_std_rng();
    let mut signed = |scale: f64| (rng.gen::<f64>() * 2.0 - 1.0) * scale;
    match cfg.kind {
        SeriesKind::RandomWalk { step } => {
            let step = step.abs();
            let mut y = 0.0;
            (0..cfg.len)
                .map(|i| {
                    if i > 0 {
                        y += signed(step);
                    }
                    y
                })
                .collect()
        }
        SeriesKind::NoisySine {
            period,
            amplitude,
            noise,
        } => {
            let period = period.abs().max(1e-9);
            let noise = noise.abs();
            (0..cfg.len)
                .map(|i| {
                    let phase = std::f64::consts::TAU * (i as f64) / period;
                    amplitude * phase.sin() + signed(noise)
                })
                .collect()
        }
    }
}
