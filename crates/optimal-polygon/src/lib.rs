//! Optimal polygonal approximation of a sampled series inside a vertical tunnel.
//!
//! Given samples `y[0..n]` at integer abscissae and a half-width `w`, the
//! sweep returns the vertices of a polyline with the fewest vertices that stays
//! within `w` of every sample (Imai & Iri, "An optimal algorithm for
//! approximating a piecewise linear function").
//!
//! Layout
//! - `geom`: angle and line-intersection primitives with 6-decimal rounding.
//! - `hull`: arena-backed incremental convex chains over shifted samples.
//! - `separator`: per-step supporting/separating line state machine.
//! - `sweep`: the linear driver plus the closing step.
//! - `eval`, `synth`: containment checks and seeded test series.

pub mod cfg;
pub mod error;
pub mod eval;
pub mod geom;
pub mod hull;
pub mod separator;
pub mod sweep;
pub mod synth;
pub mod types;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use error::PolygonError;
pub use sweep::{optimal_polygon, optimal_polygon_records};
pub use types::{PivotKind, PivotRecord, Point, TunnelCfg};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::eval::{interpolate, max_deviation};
    pub use crate::synth::{draw_series, ReplayToken, SeriesCfg, SeriesKind};
    pub use crate::{
        optimal_polygon, optimal_polygon_records, PivotKind, PivotRecord, Point, PolygonError,
        TunnelCfg,
    };
}
