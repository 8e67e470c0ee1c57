//! Shared value types: points, configuration, and pivot records.

use nalgebra::Vector2;

/// A 2D point `(x, y)`; sample points carry integral `x`.
pub type Point = Vector2<f64>;

/// Tunnel configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TunnelCfg {
    /// Half-width of the vertical tunnel around each sample.
    pub width: f64,
}

impl Default for TunnelCfg {
    fn default() -> Self {
        Self { width: 0.5 }
    }
}

impl TunnelCfg {
    #[inline]
    pub fn with_width(width: f64) -> Self {
        Self { width }
    }
}

/// What caused a pivot to be emitted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PivotKind {
    /// The new upper point crossed the `l+ r-` separating line.
    Upper,
    /// The new lower point crossed the `l- r+` separating line.
    Lower,
    /// Last interior vertex, placed on the final open window.
    Closing,
    /// Final endpoint on the last sample's column.
    End,
    /// Zero-width mode: a kept sample.
    Sample,
}

/// One emitted vertex plus the anchors that were active when it was emitted.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PivotRecord {
    pub pivot: Point,
    pub kind: PivotKind,
    /// Separating line endpoints; `None` on the final endpoint.
    pub separator: Option<(Point, Point)>,
    /// Base anchors of the two hulls (the window the pivot lies on).
    pub window: (Point, Point),
}
