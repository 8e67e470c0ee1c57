//! Errors surfaced by the optimal polygon sweep.

use std::fmt;

use crate::types::Point;

/// Errors surfaced by the primitives, the tracker, and the sweep.
///
/// Two classes: degenerate geometry (`is_degenerate`) and rejected input
/// (`is_invalid_input`). Either one aborts the whole computation.
#[derive(Clone, Debug, PartialEq)]
pub enum PolygonError {
    /// Lines `ab` and `cd` are parallel or coincident (zero determinant).
    ParallelLines {
        a: Point,
        b: Point,
        c: Point,
        d: Point,
    },
    /// No closing segment from `vertex` to the last column stays in the tunnel.
    NoClosingSegment { vertex: Point },
    /// Fewer than two samples.
    TooFewSamples { len: usize },
    /// Negative or non-finite tunnel half-width.
    InvalidWidth { width: f64 },
    /// A sample is NaN or infinite.
    NonFiniteSample { index: usize, value: f64 },
}

impl PolygonError {
    pub fn is_degenerate(&self) -> bool {
        matches!(
            self,
            PolygonError::ParallelLines { .. } | PolygonError::NoClosingSegment { .. }
        )
    }

    pub fn is_invalid_input(&self) -> bool {
        !self.is_degenerate()
    }
}

impl fmt::Display for PolygonError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PolygonError::ParallelLines { a, b, c, d } => write!(
                f,
                "lines ({}, {})-({}, {}) and ({}, {})-({}, {}) are parallel",
                a.x, a.y, b.x, b.y, c.x, c.y, d.x, d.y
            ),
            PolygonError::NoClosingSegment { vertex } => write!(
                f,
                "no closing segment from ({}, {}) stays inside the tunnel",
                vertex.x, vertex.y
            ),
            PolygonError::TooFewSamples { len } => {
                write!(f, "need at least 2 samples, got {}", len)
            }
            PolygonError::InvalidWidth { width } => {
                write!(f, "tunnel width must be finite and >= 0, got {}", width)
            }
            PolygonError::NonFiniteSample { index, value } => {
                write!(f, "sample {} is not finite ({})", index, value)
            }
        }
    }
}

impl std::error::Error for PolygonError {}
