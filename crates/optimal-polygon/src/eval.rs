//! Evaluation of an emitted polygon against the samples it approximates.

use crate::types::Point;

/// Height of the polyline through `pivots` at `x`; `None` outside its span.
///
/// `pivots` must have strictly increasing `x`.
pub fn interpolate(pivots: &[Point], x: f64) -> Option<f64> {
    let first = pivots.first()?;
    let last = pivots.last()?;
    if x < first.x || x > last.x {
        return None;
    }
    // First vertex strictly right of x (clamped so a segment always exists).
    let k = pivots.partition_point(|p| p.x <= x).clamp(1, pivots.len().max(2) - 1);
    if pivots.len() == 1 {
        return Some(first.y);
    }
    let (a, b) = (pivots[k - 1], pivots[k]);
    let t = (x - a.x) / (b.x - a.x);
    Some(a.y + (b.y - a.y) * t)
}

/// Largest vertical distance between sample `i` (at `x = i`) and the polygon.
///
/// Samples outside the polygon's x-span count as infinitely far.
pub fn max_deviation(samples: &[f64], pivots: &[Point]) -> f64 {
    samples
        .iter()
        .enumerate()
        .map(|(i, &y)| match interpolate(pivots, i as f64) {
            Some(h) => (h - y).abs(),
            None => f64::INFINITY,
        })
        .fold(0.0, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn poly() -> Vec<Point> {
        vec![
            Point::new(0.0, 0.0),
            Point::new(2.0, 2.0),
            Point::new(4.0, 0.0),
        ]
    }

    #[test]
    fn interpolate_on_vertices_and_segments() {
        let q = poly();
        assert_eq!(interpolate(&q, 0.0), Some(0.0));
        assert_eq!(interpolate(&q, 1.0), Some(1.0));
        assert_eq!(interpolate(&q, 2.0), Some(2.0));
        assert_eq!(interpolate(&q, 3.0), Some(1.0));
        assert_eq!(interpolate(&q, 4.0), Some(0.0));
        assert_eq!(interpolate(&q, 4.5), None);
        assert_eq!(interpolate(&q, -0.1), None);
        assert_eq!(interpolate(&[], 0.0), None);
        assert_eq!(interpolate(&[Point::new(1.0, 3.0)], 1.0), Some(3.0));
    }

    #[test]
    fn max_deviation_over_samples() {
        let q = poly();
        assert_eq!(max_deviation(&[0.0, 1.5, 2.0, 1.0, 0.25], &q), 0.5);
        assert_eq!(max_deviation(&[0.0; 6], &q), f64::INFINITY);
    }
}
