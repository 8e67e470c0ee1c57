//! Separator tracker: the per-step state machine of the sweep.
//!
//! Each hull side carries four anchors:
//! - `base` (p): start of the chain part that still matters, i.e. the end of
//!   the current window on that side;
//! - `left`/`right` (l, r): endpoints of the separating lines `l+ r-` and
//!   `l- r+`, the two extreme lines that still pass through every tunnel
//!   column since the window;
//! - `last`/`prev`: the newest and the previous shifted sample.
//!
//! A step either tightens the separating lines (`Step::Normal`) or, when the
//! newest point on one side crosses the separating line anchored on that
//! side, emits a pivot on the window and re-anchors both sides
//! (`Step::Break`). The two break regimes are mirror images, so they share
//! one implementation parameterized by which side is "near".

use tracing::trace;

use crate::cfg::CLOSING_SLACK;
use crate::error::PolygonError;
use crate::geom::{intersect, opens, round6, round_point, Turn};
use crate::hull::{Chain, NodeId, Sign};
use crate::types::{PivotKind, PivotRecord, Point};

/// Chain of one shifted copy plus its active anchors.
#[derive(Clone, Debug)]
pub struct Side {
    pub chain: Chain,
    pub base: NodeId,
    pub left: NodeId,
    pub right: NodeId,
    pub last: NodeId,
    pub prev: NodeId,
}

impl Side {
    fn new(sign: Sign, y0: f64, y1: f64, width: f64) -> Self {
        let chain = Chain::new(sign, sign.shift(0.0, y0, width), sign.shift(1.0, y1, width));
        Self {
            chain,
            base: NodeId(0),
            left: NodeId(0),
            right: NodeId(1),
            last: NodeId(1),
            prev: NodeId(0),
        }
    }

    #[inline]
    pub fn at(&self, id: NodeId) -> Point {
        self.chain.point(id)
    }

    #[inline]
    fn turn(&self) -> Turn {
        self.chain.turn()
    }

    /// Insert the next shifted sample into the chain.
    fn extend(&mut self, x: f64, y: f64, width: f64) -> NodeId {
        let id = self.chain.push(self.chain.sign.shift(x, y, width));
        self.chain.insert(self.last, id, self.base);
        self.prev = self.last;
        self.last = id;
        id
    }

    /// Move `left` along successors while `keeps(left, succ(left))` holds.
    fn slide_left(&mut self, mut keeps: impl FnMut(Point, Point) -> bool) {
        while let Some(next) = self.chain.succ(self.left) {
            if !keeps(self.at(self.left), self.at(next)) {
                break;
            }
            self.left = next;
        }
    }
}

/// Outcome of one tracker step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Step {
    /// Tunnel still feasible; only anchors moved.
    Normal,
    /// Tunnel violated; one pivot emitted and anchors reset.
    Break(PivotRecord),
}

/// Dual-side separator state for one sweep.
#[derive(Clone, Debug)]
pub struct Tracker {
    pub upper: Side,
    pub lower: Side,
    width: f64,
}

impl Tracker {
    /// Initial state from the first two (rounded) samples.
    pub fn new(y0: f64, y1: f64, width: f64) -> Self {
        Self {
            upper: Side::new(Sign::Plus, y0, y1, width),
            lower: Side::new(Sign::Minus, y0, y1, width),
            width,
        }
    }

    /// Extend both hulls with sample `(x, y)`.
    pub fn extend(&mut self, x: f64, y: f64) {
        self.upper.extend(x, y, self.width);
        self.lower.extend(x, y, self.width);
    }

    /// Evaluate the separating lines against the newest pair of points.
    pub fn evaluate(&mut self) -> Result<Step, PolygonError> {
        let record = if crossed(&self.upper, &self.lower) {
            Some(split(&mut self.upper, &mut self.lower, PivotKind::Upper)?)
        } else if crossed(&self.lower, &self.upper) {
            Some(split(&mut self.lower, &mut self.upper, PivotKind::Lower)?)
        } else {
            None
        };
        match record {
            Some(rec) => {
                trace!(kind = ?rec.kind, x = rec.pivot.x, y = rec.pivot.y, "pivot");
                Ok(Step::Break(rec))
            }
            None => {
                tighten(&mut self.upper, &mut self.lower);
                tighten(&mut self.lower, &mut self.upper);
                Ok(Step::Normal)
            }
        }
    }

    /// One full sweep step for sample `(x, y)`.
    pub fn advance(&mut self, x: f64, y: f64) -> Result<Step, PolygonError> {
        self.extend(x, y);
        self.evaluate()
    }

    /// Close the last open tunnel into the final vertex and the endpoint.
    ///
    /// `samples` are the rounded samples the tracker was fed. The vertex is
    /// the midpoint of both separating lines' crossings with the window; the
    /// endpoint sits on the last column at the centre of the heights that
    /// keep the closing segment inside the tunnel.
    pub fn close(&self, samples: &[f64]) -> Result<[PivotRecord; 2], PolygonError> {
        let (upper, lower) = (&self.upper, &self.lower);
        let a = crossing(upper, lower)?;
        let b = crossing(lower, upper)?;
        let vertex = round_point((a + b) / 2.0);
        let end = closing_end(samples, self.width, vertex)?;
        trace!(x = vertex.x, y = vertex.y, end_y = end.y, "close");
        Ok([
            PivotRecord {
                pivot: vertex,
                kind: PivotKind::Closing,
                separator: Some((lower.at(lower.right), upper.at(upper.right))),
                window: (lower.at(lower.base), upper.at(upper.base)),
            },
            PivotRecord {
                pivot: end,
                kind: PivotKind::End,
                separator: None,
                window: (lower.at(lower.last), upper.at(upper.last)),
            },
        ])
    }
}

/// The newest `near` point turned past the separating line `near.l → far.r`.
fn crossed(near: &Side, far: &Side) -> bool {
    opens(
        near.at(near.last),
        near.at(near.left),
        far.at(far.right),
        near.turn(),
    )
}

/// Where the separating line `near.l → far.r` crosses the window `near.p → far.p`.
fn crossing(near: &Side, far: &Side) -> Result<Point, PolygonError> {
    intersect(
        near.at(near.left),
        far.at(far.right),
        near.at(near.base),
        far.at(far.base),
    )
}

/// Emit the pivot for a break triggered on `near` and re-anchor both sides.
fn split(near: &mut Side, far: &mut Side, kind: PivotKind) -> Result<PivotRecord, PolygonError> {
    let (l, r) = (near.at(near.left), far.at(far.right));
    let record = PivotRecord {
        pivot: crossing(near, far)?,
        kind,
        separator: Some((l, r)),
        window: (near.at(near.base), far.at(far.base)),
    };
    // New window: from far.r up to where l→r leaves the near tunnel edge.
    far.base = far.right;
    let anchor = intersect(l, r, near.at(near.prev), near.at(near.last))?;
    let base = near.chain.push(anchor);
    near.chain.link(base, near.last);
    near.base = base;
    near.left = base;
    near.right = near.last;
    far.right = far.last;
    far.left = far.base;
    let (apex, turn) = (near.at(near.right), far.turn());
    far.slide_left(|left, next| opens(left, apex, next, turn));
    Ok(record)
}

/// Move `near.r` to the newest point if it tightens `far.l → near.r`, then
/// slide `far.l` forward while the newest point still sees the next node.
fn tighten(near: &mut Side, far: &mut Side) {
    let (newest, turn) = (near.at(near.last), near.turn());
    if opens(newest, far.at(far.left), near.at(near.right), turn) {
        near.right = near.last;
        far.slide_left(|left, next| opens(newest, left, next, turn));
    }
}

/// Endpoint on column `n-1` for the closing segment starting at `vertex`.
fn closing_end(samples: &[f64], width: f64, vertex: Point) -> Result<Point, PolygonError> {
    let x_end = (samples.len() - 1) as f64;
    let span = x_end - vertex.x;
    if span <= 0.0 {
        return Err(PolygonError::NoClosingSegment { vertex });
    }
    let mut lo = f64::NEG_INFINITY;
    let mut hi = f64::INFINITY;
    for (i, &y) in samples.iter().enumerate().rev() {
        let x = i as f64;
        if x <= vertex.x {
            break;
        }
        // Segment height at x is vertex.y + (end - vertex.y) * f.
        let f = (x - vertex.x) / span;
        lo = lo.max(vertex.y + (y - width - vertex.y) / f);
        hi = hi.min(vertex.y + (y + width - vertex.y) / f);
    }
    if lo > hi + CLOSING_SLACK {
        return Err(PolygonError::NoClosingSegment { vertex });
    }
    Ok(Point::new(x_end, round6((lo + hi) / 2.0)))
}
