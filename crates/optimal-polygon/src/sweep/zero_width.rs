//! Zero-width tunnel: the polygon is the sample polyline itself.
//!
//! Interior samples that sit exactly on the straight continuation from the
//! last kept vertex are dropped, using the same rounded turn test as the
//! hulls, so runs of collinear samples collapse to their ends.

use std::f64::consts::PI;

use crate::geom::{angle, round6, Turn};
use crate::types::{PivotKind, PivotRecord, Point};

pub(super) fn records(ys: &[f64]) -> Vec<PivotRecord> {
    let pts: Vec<Point> = ys
        .iter()
        .enumerate()
        .map(|(i, &y)| Point::new(i as f64, y))
        .collect();
    let straight = round6(PI);
    let mut kept = vec![pts[0]];
    for k in 1..pts.len() - 1 {
        let prev = kept[kept.len() - 1];
        if angle(pts[k + 1], pts[k], prev, Turn::Ccw) != straight {
            kept.push(pts[k]);
        }
    }
    kept.push(pts[pts.len() - 1]);

    let last = kept.len() - 1;
    kept.iter()
        .enumerate()
        .map(|(j, &p)| PivotRecord {
            pivot: p,
            kind: if j == last {
                PivotKind::End
            } else {
                PivotKind::Sample
            },
            separator: (j < last).then(|| (kept[j.saturating_sub(1)], kept[j + 1])),
            window: (p, p),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collinear_runs_collapse() {
        let recs = records(&[0.0, 1.0, 2.0, 1.0, 0.0]);
        let pts: Vec<Point> = recs.iter().map(|r| r.pivot).collect();
        assert_eq!(
            pts,
            vec![
                Point::new(0.0, 0.0),
                Point::new(2.0, 2.0),
                Point::new(4.0, 0.0)
            ]
        );
        assert_eq!(recs[0].kind, PivotKind::Sample);
        assert_eq!(recs[2].kind, PivotKind::End);
        assert_eq!(recs[2].separator, None);
        assert_eq!(
            recs[1].separator,
            Some((Point::new(0.0, 0.0), Point::new(4.0, 0.0)))
        );
    }

    #[test]
    fn every_bend_is_kept() {
        let ys = [0.0, 1.0, 0.0, 1.0];
        let recs = records(&ys);
        assert_eq!(recs.len(), 4);
        for (i, r) in recs.iter().enumerate() {
            assert_eq!(r.pivot, Point::new(i as f64, ys[i]));
        }
    }
}
