// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! [`BoundingBox`] for [`kurbo::Rect`].
//!
//! Rectangles are treated as closed and are expected to be normalized
//! (`x0 <= x1`, `y0 <= y1`); an inverted rectangle counts as empty.

use kurbo::Rect;

use crate::bounds::BoundingBox;

const EMPTY_RECT: Rect = Rect::new(
    f64::INFINITY,
    f64::INFINITY,
    f64::NEG_INFINITY,
    f64::NEG_INFINITY,
);

impl BoundingBox for Rect {
    type Space = f64;

    fn empty() -> Self {
        EMPTY_RECT
    }

    fn union(&self, other: &Self) -> Self {
        Self::new(
            self.x0.min(other.x0),
            self.y0.min(other.y0),
            self.x1.max(other.x1),
            self.y1.max(other.y1),
        )
    }

    fn intersection(&self, other: &Self) -> Self {
        if !BoundingBox::intersects(self, other) {
            return EMPTY_RECT;
        }
        Self::new(
            self.x0.max(other.x0),
            self.y0.max(other.y0),
            self.x1.min(other.x1),
            self.y1.min(other.y1),
        )
    }

    fn intersects(&self, other: &Self) -> bool {
        !BoundingBox::is_empty(self)
            && !BoundingBox::is_empty(other)
            && self.x0 <= other.x1
            && other.x0 <= self.x1
            && self.y0 <= other.y1
            && other.y0 <= self.y1
    }

    fn contains(&self, other: &Self) -> bool {
        if BoundingBox::is_empty(other) {
            return true;
        }
        !BoundingBox::is_empty(self)
            && self.x0 <= other.x0
            && self.y0 <= other.y0
            && other.x1 <= self.x1
            && other.y1 <= self.y1
    }

    fn box_space(&self) -> f64 {
        if BoundingBox::is_empty(self) {
            0.0
        } else {
            self.area()
        }
    }

    fn is_empty(&self) -> bool {
        self.x1 < self.x0 || self.y1 < self.y0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Tree;
    use alloc::vec::Vec;

    #[test]
    fn rect_contract() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 5.0, 20.0, 15.0);
        assert!(BoundingBox::intersects(&a, &b));
        assert_eq!(
            BoundingBox::intersection(&a, &b),
            Rect::new(10.0, 5.0, 10.0, 10.0)
        );
        let far = Rect::new(50.0, 50.0, 60.0, 60.0);
        assert!(BoundingBox::is_empty(&BoundingBox::intersection(&a, &far)));

        let e = <Rect as BoundingBox>::empty();
        assert_eq!(e.box_space(), 0.0);
        assert_eq!(BoundingBox::union(&a, &e), a);
        assert!(BoundingBox::contains(&a, &e));
        assert_eq!(BoundingBox::union(&a, &b).box_space(), 300.0);
    }

    #[test]
    fn tree_over_kurbo_rects() {
        let mut tree = Tree::new(|r: &Rect| *r, |r: &mut Rect, b: Rect| {
            *r = b;
            true
        });
        for i in 0..8 {
            let x = f64::from(i) * 20.0;
            tree.add(Rect::new(x, 0.0, x + 10.0, 10.0));
        }
        let hits: Vec<_> = tree
            .query(Rect::new(25.0, 2.0, 45.0, 4.0))
            .copied()
            .collect();
        assert_eq!(hits.len(), 2);
        assert!(hits.contains(&Rect::new(20.0, 0.0, 30.0, 10.0)));
        assert!(hits.contains(&Rect::new(40.0, 0.0, 50.0, 10.0)));
        assert!(tree.validate().is_ok());
    }
}
