//! Incremental convex chains over the shifted samples.
//!
//! Each chain is an arena: points get a stable `NodeId` on insertion and the
//! successor/predecessor relations are index arrays. Nodes are never removed.
//! A point bypassed by a later insertion keeps its stale links and simply
//! becomes unreachable from the active base anchor.
//!
//! The upper chain (samples shifted by `+w`) keeps counter-clockwise turns,
//! the lower chain (shifted by `-w`) clockwise ones.

use crate::geom::{reflex, round6, Turn};
use crate::types::Point;

/// Stable arena index of a chain node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(pub usize);

/// Which shifted copy of the samples a chain is built over.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Sign {
    Plus,
    Minus,
}

impl Sign {
    /// Convexity direction kept by the chain over this copy.
    #[inline]
    pub fn turn(self) -> Turn {
        match self {
            Sign::Plus => Turn::Ccw,
            Sign::Minus => Turn::Cw,
        }
    }

    /// Sample `(x, y)` shifted by `±width`, rounded.
    #[inline]
    pub fn shift(self, x: f64, y: f64, width: f64) -> Point {
        match self {
            Sign::Plus => Point::new(x, round6(y + width)),
            Sign::Minus => Point::new(x, round6(y - width)),
        }
    }
}

/// Convex chain with arena-backed `succ`/`pred` links.
#[derive(Clone, Debug)]
pub struct Chain {
    pub sign: Sign,
    pts: Vec<Point>,
    succ: Vec<Option<NodeId>>,
    pred: Vec<Option<NodeId>>,
}

impl Chain {
    /// Two-point chain `first → second`; returns ids 0 and 1 for them.
    pub fn new(sign: Sign, first: Point, second: Point) -> Self {
        let mut chain = Self {
            sign,
            pts: Vec::new(),
            succ: Vec::new(),
            pred: Vec::new(),
        };
        let a = chain.push(first);
        let b = chain.push(second);
        chain.link(a, b);
        chain
    }

    #[inline]
    pub fn turn(&self) -> Turn {
        self.sign.turn()
    }

    /// Append an unlinked node.
    pub fn push(&mut self, p: Point) -> NodeId {
        self.pts.push(p);
        self.succ.push(None);
        self.pred.push(None);
        NodeId(self.pts.len() - 1)
    }

    /// Make `b` the successor of `a` (and `a` the predecessor of `b`).
    #[inline]
    pub fn link(&mut self, a: NodeId, b: NodeId) {
        self.succ[a.0] = Some(b);
        self.pred[b.0] = Some(a);
    }

    #[inline]
    pub fn point(&self, id: NodeId) -> Point {
        self.pts[id.0]
    }

    #[inline]
    pub fn succ(&self, id: NodeId) -> Option<NodeId> {
        self.succ[id.0]
    }

    #[inline]
    pub fn pred(&self, id: NodeId) -> Option<NodeId> {
        self.pred[id.0]
    }

    /// Attach `new` after `last`, bypassing every node that would make a
    /// reflex (or straight) turn, but never walking past `base`.
    ///
    /// Returns the node `new` was attached to. A node without predecessor
    /// ends the walk as well: after a re-anchoring the base can sit on a
    /// branch that no longer leads back from `last`.
    pub fn insert(&mut self, last: NodeId, new: NodeId, base: NodeId) -> NodeId {
        let turn = self.turn();
        let q = self.point(new);
        let mut p = last;
        while p != base {
            let Some(prev) = self.pred(p) else {
                break;
            };
            if !reflex(q, self.point(p), self.point(prev), turn) {
                break;
            }
            p = prev;
        }
        self.link(p, new);
        p
    }

    /// Nodes reachable from `from` along successors, `from` included.
    #[cfg(test)]
    fn walk(&self, from: NodeId) -> Vec<NodeId> {
        let mut out = vec![from];
        let mut cur = from;
        while let Some(next) = self.succ(cur) {
            out.push(next);
            cur = next;
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plus_chain(ys: &[f64], width: f64) -> (Chain, Vec<NodeId>) {
        let s = Sign::Plus;
        let mut c = Chain::new(s, s.shift(0.0, ys[0], width), s.shift(1.0, ys[1], width));
        let mut ids = vec![NodeId(0), NodeId(1)];
        for (i, &y) in ys.iter().enumerate().skip(2) {
            let id = c.push(s.shift(i as f64, y, width));
            c.insert(*ids.last().unwrap(), id, NodeId(0));
            ids.push(id);
        }
        (c, ids)
    }

    #[test]
    fn shift_rounds_and_mirrors() {
        assert_eq!(Sign::Plus.shift(3.0, 0.1, 0.2), Point::new(3.0, 0.3));
        assert_eq!(Sign::Minus.shift(3.0, 0.1, 0.2), Point::new(3.0, -0.1));
        assert_eq!(Sign::Plus.turn(), Turn::Ccw);
        assert_eq!(Sign::Minus.turn(), Turn::Cw);
    }

    #[test]
    fn new_links_two_points() {
        let c = Chain::new(Sign::Minus, Point::new(0.0, 0.0), Point::new(1.0, 1.0));
        assert_eq!(c.point(NodeId(1)), Point::new(1.0, 1.0));
        assert_eq!(c.succ(NodeId(0)), Some(NodeId(1)));
        assert_eq!(c.pred(NodeId(1)), Some(NodeId(0)));
        assert_eq!(c.pred(NodeId(0)), None);
    }

    #[test]
    fn straight_points_are_bypassed() {
        let (c, ids) = plus_chain(&[0.0, 0.0, 0.0, 0.0], 0.5);
        assert_eq!(c.walk(ids[0]), vec![ids[0], ids[3]]);
        // The bypassed nodes keep their stale links.
        assert_eq!(c.pred(ids[1]), Some(ids[0]));
        assert_eq!(c.point(ids[2]), Point::new(2.0, 0.5));
    }

    #[test]
    fn upper_chain_keeps_lower_convex_boundary() {
        // Peak at x=2 is not on the lower boundary of the shifted-up points.
        let (c, ids) = plus_chain(&[0.0, 1.0, 3.0, 1.0, 0.0], 0.5);
        let chain: Vec<Point> = c.walk(ids[0]).into_iter().map(|id| c.point(id)).collect();
        assert_eq!(chain, vec![Point::new(0.0, 0.5), Point::new(4.0, 0.5)]);

        // A valley is kept.
        let (c, ids) = plus_chain(&[2.0, 0.0, 2.0], 0.0);
        assert_eq!(c.walk(ids[0]), vec![ids[0], ids[1], ids[2]]);
    }

    #[test]
    fn lower_chain_keeps_upper_convex_boundary() {
        let s = Sign::Minus;
        let w = 0.5;
        let ys = [0.0, 2.0, 0.0, 1.0];
        let mut c = Chain::new(s, s.shift(0.0, ys[0], w), s.shift(1.0, ys[1], w));
        let mut last = NodeId(1);
        for (i, &y) in ys.iter().enumerate().skip(2) {
            let id = c.push(s.shift(i as f64, y, w));
            c.insert(last, id, NodeId(0));
            last = id;
        }
        // (1, 1.5) is a peak and stays; (2, -0.5) is a dip bypassed by (3, 0.5).
        let walk = c.walk(NodeId(0));
        assert_eq!(walk, vec![NodeId(0), NodeId(1), NodeId(3)]);
    }

    #[test]
    fn insert_stops_at_base_and_at_orphans() {
        let mut c = Chain::new(Sign::Plus, Point::new(0.0, 1.0), Point::new(1.0, 0.0));
        // Orphan node with no predecessor acting as the walk start.
        let orphan = c.push(Point::new(2.0, 5.0));
        let new = c.push(Point::new(3.0, 0.0));
        let attached = c.insert(orphan, new, NodeId(0));
        assert_eq!(attached, orphan);
        assert_eq!(c.pred(new), Some(orphan));

        // Walk never passes the base even when the turn is reflex.
        let new2 = c.push(Point::new(4.0, 9.0));
        let attached = c.insert(new, new2, new);
        assert_eq!(attached, new);
    }
}
