//! Geometric primitives: rounding, turn angles, and line intersection.
//!
//! Every derived value goes through `round6`. The rounding is part of the
//! control flow: an exactly straight turn yields `round6(π) = 3.141593`, which
//! compares strictly greater than `π`, and nearly straight turns collapse onto
//! that same value instead of jittering around it.

use std::f64::consts::{PI, TAU};

use crate::cfg::{EPS_DET, SCALE};
use crate::error::PolygonError;
use crate::types::Point;

/// Orientation in which `angle` measures the sweep from one ray to another.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Turn {
    /// Counter-clockwise.
    Ccw,
    /// Clockwise.
    Cw,
}

/// Round half-to-even at `DECIMALS` fractional digits.
///
/// Values that round to zero come back as `+0.0`.
#[inline]
pub fn round6(x: f64) -> f64 {
    (x * SCALE).round_ties_even() / SCALE + 0.0
}

#[inline]
pub fn round_point(p: Point) -> Point {
    Point::new(round6(p.x), round6(p.y))
}

/// Angle swept from ray `v→u` to ray `v→w`, in `[0, 2π]`, rounded.
pub fn angle(u: Point, v: Point, w: Point, turn: Turn) -> f64 {
    let vu = (u.y - v.y).atan2(u.x - v.x);
    let vw = (w.y - v.y).atan2(w.x - v.x);
    let mut phi = vw - vu;
    if phi < 0.0 {
        phi += TAU;
    }
    if turn == Turn::Cw {
        phi = TAU - phi;
    }
    round6(phi)
}

/// `angle(u, v, w, turn) < π`: `w` lies strictly inside the half-turn from `v→u`.
#[inline]
pub fn opens(u: Point, v: Point, w: Point, turn: Turn) -> bool {
    angle(u, v, w, turn) < PI
}

/// `angle(u, v, w, turn) > π`: reflex turn (also true for exactly straight).
#[inline]
pub fn reflex(u: Point, v: Point, w: Point, turn: Turn) -> bool {
    angle(u, v, w, turn) > PI
}

/// Intersection of the infinite lines `ab` and `cd`, rounded.
pub fn intersect(a: Point, b: Point, c: Point, d: Point) -> Result<Point, PolygonError> {
    let det = (b.x - a.x) * (d.y - c.y) - (d.x - c.x) * (b.y - a.y);
    if !det.is_finite() || det.abs() <= EPS_DET {
        return Err(PolygonError::ParallelLines { a, b, c, d });
    }
    let ab = b.x * a.y - a.x * b.y;
    let cd = d.x * c.y - c.x * d.y;
    let x = (ab * (d.x - c.x) - cd * (b.x - a.x)) / det;
    let y = (ab * (d.y - c.y) - cd * (b.y - a.y)) / det;
    Ok(round_point(Point::new(x, y)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn round6_keeps_six_digits() {
        assert_eq!(round6(1.23456789), 1.234568);
        assert_eq!(round6(-1.0000004), -1.0);
        assert_eq!(round6(2.4e-7), 0.0);
        assert_eq!(round6(PI), 3.141593);
    }

    #[test]
    fn round6_drops_negative_zero() {
        for x in [-2.4e-7, -0.0, -4e-7] {
            let r = round6(x);
            assert_eq!(r, 0.0);
            assert!(r.is_sign_positive());
        }
        let q = intersect(p(0.0, 0.0), p(1.0, 1.0), p(-1e-9, 5.0), p(-1e-9, -5.0)).unwrap();
        assert!(q.x.is_sign_positive() && q.y.is_sign_positive());
    }

    #[test]
    fn angle_quarter_turns() {
        let o = p(0.0, 0.0);
        assert_eq!(angle(p(1.0, 0.0), o, p(0.0, 1.0), Turn::Ccw), 1.570796);
        assert_eq!(angle(p(1.0, 0.0), o, p(0.0, 1.0), Turn::Cw), 4.712389);
        assert_eq!(angle(p(1.0, 0.0), o, p(0.0, -1.0), Turn::Ccw), 4.712389);
        assert_eq!(angle(p(1.0, 0.0), o, p(1.0, 0.0), Turn::Ccw), 0.0);
    }

    #[test]
    fn straight_turn_compares_above_pi() {
        let (u, v, w) = (p(2.0, 0.5), p(1.0, 0.5), p(0.0, 0.5));
        for turn in [Turn::Ccw, Turn::Cw] {
            assert_eq!(angle(u, v, w, turn), 3.141593);
            assert!(reflex(u, v, w, turn));
            assert!(!opens(u, v, w, turn));
        }
    }

    #[test]
    fn nearly_straight_turn_snaps_to_straight() {
        let (u, v, w) = (p(2.0, 0.5 + 1e-9), p(1.0, 0.5), p(0.0, 0.5));
        assert_eq!(angle(u, v, w, Turn::Ccw), 3.141593);
        assert_eq!(angle(u, v, w, Turn::Cw), 3.141593);
    }

    #[test]
    fn intersect_crossing_diagonals() {
        let x = intersect(p(0.0, 0.0), p(2.0, 2.0), p(0.0, 2.0), p(2.0, 0.0)).unwrap();
        assert_eq!(x, p(1.0, 1.0));
        // Vertical against sloped line.
        let x = intersect(p(0.0, 0.5), p(2.0, 1.5), p(1.0, -3.0), p(1.0, 3.0)).unwrap();
        assert_eq!(x, p(1.0, 1.0));
    }

    #[test]
    fn intersect_rounds_result() {
        // y = 0.5 + 0.5x meets y = 4.5 - x at x = 8/3.
        let x = intersect(p(0.0, 0.5), p(2.0, 1.5), p(2.0, 2.5), p(3.0, 1.5)).unwrap();
        assert_eq!(x, p(2.666667, 1.833333));
    }

    #[test]
    fn intersect_rejects_parallel_and_coincident() {
        let e = intersect(p(0.0, 0.0), p(1.0, 1.0), p(0.0, 1.0), p(1.0, 2.0)).unwrap_err();
        assert!(e.is_degenerate());
        let e = intersect(p(0.0, 0.0), p(1.0, 1.0), p(2.0, 2.0), p(3.0, 3.0)).unwrap_err();
        assert!(matches!(e, PolygonError::ParallelLines { .. }));
        // A zero-length segment has no direction.
        let e = intersect(p(0.0, 0.0), p(1.0, 1.0), p(0.0, 0.0), p(0.0, 0.0)).unwrap_err();
        assert!(e.is_degenerate());
    }
}
