//! Free-rectangle bookkeeping for the load bed floor.
//!
//! The floor is tracked as a set of disjoint axis-aligned rectangles. Placing
//! an item inside a rectangle replaces it with up to four guillotine pieces
//! around the item, after which rectangles sharing a full edge are merged.

use u_loadplan_core::EPSILON;

/// An unoccupied rectangle of the floor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FreeRect {
    /// Min corner along the length.
    pub x: f64,
    /// Min corner along the width.
    pub y: f64,
    /// Extent along the length.
    pub length: f64,
    /// Extent along the width.
    pub width: f64,
}

impl FreeRect {
    /// Creates a new rectangle.
    pub fn new(x: f64, y: f64, length: f64, width: f64) -> Self {
        Self {
            x,
            y,
            length,
            width,
        }
    }

    /// Returns the max x coordinate.
    pub fn max_x(&self) -> f64 {
        self.x + self.length
    }

    /// Returns the max y coordinate.
    pub fn max_y(&self) -> f64 {
        self.y + self.width
    }

    /// Returns the area.
    pub fn area(&self) -> f64 {
        self.length * self.width
    }

    /// Checks if a footprint of the given size fits inside.
    pub fn fits(&self, length: f64, width: f64) -> bool {
        length <= self.length + EPSILON && width <= self.width + EPSILON
    }

    /// Returns the four corner anchors for a footprint of the given size.
    pub fn corners(&self, length: f64, width: f64) -> [(f64, f64); 4] {
        let far_x = self.max_x() - length;
        let far_y = self.max_y() - width;
        [
            (self.x, self.y),
            (far_x, self.y),
            (self.x, far_y),
            (far_x, far_y),
        ]
    }

    /// Moves an anchor so the footprint lies inside the rectangle.
    pub fn clamp_anchor(&self, x: f64, y: f64, length: f64, width: f64) -> (f64, f64) {
        let clamp = |v: f64, lo: f64, hi: f64| v.min(hi.max(lo)).max(lo);
        (
            clamp(x, self.x, self.max_x() - length),
            clamp(y, self.y, self.max_y() - width),
        )
    }

    /// Returns the anchors that slide a footprint at `(x, y)` against each
    /// edge of the rectangle, after clamping it inside.
    pub fn edge_anchors(&self, x: f64, y: f64, length: f64, width: f64) -> [(f64, f64); 4] {
        let (x, y) = self.clamp_anchor(x, y, length, width);
        let far_x = self.max_x() - length;
        let far_y = self.max_y() - width;
        [(self.x, y), (far_x, y), (x, self.y), (x, far_y)]
    }

    fn is_degenerate(&self) -> bool {
        self.length <= EPSILON || self.width <= EPSILON
    }

    /// Returns the union of two rectangles if they share a full edge.
    fn merged_with(&self, other: &FreeRect) -> Option<FreeRect> {
        let close = |a: f64, b: f64| (a - b).abs() <= EPSILON;

        if close(self.y, other.y) && close(self.width, other.width) {
            if close(self.max_x(), other.x) {
                return Some(FreeRect::new(self.x, self.y, self.length + other.length, self.width));
            }
            if close(other.max_x(), self.x) {
                return Some(FreeRect::new(other.x, self.y, self.length + other.length, self.width));
            }
        }

        if close(self.x, other.x) && close(self.length, other.length) {
            if close(self.max_y(), other.y) {
                return Some(FreeRect::new(self.x, self.y, self.length, self.width + other.width));
            }
            if close(other.max_y(), self.y) {
                return Some(FreeRect::new(self.x, other.y, self.length, self.width + other.width));
            }
        }

        None
    }
}

/// Set of free floor rectangles.
#[derive(Debug, Clone)]
pub struct FreeSpace {
    rects: Vec<FreeRect>,
}

impl FreeSpace {
    /// Creates a free space covering a whole `length` x `width` floor.
    pub fn new(length: f64, width: f64) -> Self {
        Self {
            rects: vec![FreeRect::new(0.0, 0.0, length, width)],
        }
    }

    /// Returns the free rectangles.
    pub fn rects(&self) -> &[FreeRect] {
        &self.rects
    }

    /// Returns the number of free rectangles.
    pub fn len(&self) -> usize {
        self.rects.len()
    }

    /// Returns true if no floor space remains.
    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    /// Returns the total free area.
    pub fn total_area(&self) -> f64 {
        self.rects.iter().map(FreeRect::area).sum()
    }

    /// Occupies a footprint inside the rectangle at `index`.
    ///
    /// The rectangle is replaced by its guillotine pieces around the footprint,
    /// then adjacent rectangles are merged.
    pub fn occupy(&mut self, index: usize, x: f64, y: f64, length: f64, width: f64) {
        if index >= self.rects.len() {
            return;
        }

        let rect = self.rects.remove(index);
        self.rects.extend(split(&rect, x, y, length, width));
        self.merge();
    }

    /// Merges pairs of rectangles sharing a full edge until none remain.
    fn merge(&mut self) {
        'outer: loop {
            for i in 0..self.rects.len() {
                for j in (i + 1)..self.rects.len() {
                    if let Some(merged) = self.rects[i].merged_with(&self.rects[j]) {
                        self.rects[i] = merged;
                        self.rects.remove(j);
                        continue 'outer;
                    }
                }
            }
            break;
        }
    }
}

/// Splits `rect` around a footprint with guillotine cuts.
///
/// Two cut orders are possible: cuts across the length first (full-width side
/// pieces) or cuts across the width first (full-length side pieces). The order
/// whose largest piece is bigger is used; zero-area pieces are dropped.
pub fn split(rect: &FreeRect, x: f64, y: f64, length: f64, width: f64) -> Vec<FreeRect> {
    let item_max_x = x + length;
    let item_max_y = y + width;
    let before_x = x - rect.x;
    let after_x = rect.max_x() - item_max_x;
    let before_y = y - rect.y;
    let after_y = rect.max_y() - item_max_y;

    let length_first = [
        FreeRect::new(rect.x, rect.y, before_x, rect.width),
        FreeRect::new(item_max_x, rect.y, after_x, rect.width),
        FreeRect::new(x, rect.y, length, before_y),
        FreeRect::new(x, item_max_y, length, after_y),
    ];
    let width_first = [
        FreeRect::new(rect.x, rect.y, rect.length, before_y),
        FreeRect::new(rect.x, item_max_y, rect.length, after_y),
        FreeRect::new(rect.x, y, before_x, width),
        FreeRect::new(item_max_x, y, after_x, width),
    ];

    let largest = |pieces: &[FreeRect]| {
        pieces
            .iter()
            .filter(|r| !r.is_degenerate())
            .map(FreeRect::area)
            .fold(0.0, f64::max)
    };

    let chosen = if largest(&width_first) > largest(&length_first) + EPSILON {
        width_first
    } else {
        length_first
    };

    chosen.into_iter().filter(|r| !r.is_degenerate()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_initial_space() {
        let space = FreeSpace::new(6.0, 2.4);
        assert_eq!(space.len(), 1);
        assert_relative_eq!(space.total_area(), 14.4);
    }

    #[test]
    fn test_split_corner_keeps_largest_piece() {
        let rect = FreeRect::new(0.0, 0.0, 6.0, 2.4);

        // Item in the corner: a 4.0 x 2.4 strip beats a 6.0 x 0.9 strip
        let pieces = split(&rect, 0.0, 0.0, 2.0, 1.5);
        assert_eq!(pieces.len(), 2);
        assert_eq!(pieces[0], FreeRect::new(2.0, 0.0, 4.0, 2.4));
        assert_relative_eq!(pieces[1].area(), 2.0 * 0.9, epsilon = 1e-12);
    }

    #[test]
    fn test_split_centered_four_pieces() {
        let rect = FreeRect::new(0.0, 0.0, 6.0, 2.4);
        let pieces = split(&rect, 2.0, 0.45, 2.0, 1.5);

        assert_eq!(pieces.len(), 4);
        let area: f64 = pieces.iter().map(FreeRect::area).sum();
        assert_relative_eq!(area, 14.4 - 3.0, epsilon = 1e-9);
    }

    #[test]
    fn test_split_exact_fit() {
        let rect = FreeRect::new(1.0, 1.0, 2.0, 2.0);
        assert!(split(&rect, 1.0, 1.0, 2.0, 2.0).is_empty());
    }

    #[test]
    fn test_occupy_preserves_free_area() {
        let mut space = FreeSpace::new(6.0, 2.4);
        space.occupy(0, 2.0, 0.45, 2.0, 1.5);
        assert_relative_eq!(space.total_area(), 11.4, epsilon = 1e-9);

        let index = space
            .rects()
            .iter()
            .position(|r| r.fits(1.0, 1.0))
            .unwrap();
        let rect = space.rects()[index];
        space.occupy(index, rect.x, rect.y, 1.0, 1.0);
        assert_relative_eq!(space.total_area(), 10.4, epsilon = 1e-9);
    }

    #[test]
    fn test_rects_stay_disjoint() {
        let mut space = FreeSpace::new(6.0, 2.4);
        space.occupy(0, 2.0, 0.45, 2.0, 1.5);

        let rects = space.rects();
        for (i, a) in rects.iter().enumerate() {
            for b in &rects[i + 1..] {
                let dx = a.max_x().min(b.max_x()) - a.x.max(b.x);
                let dy = a.max_y().min(b.max_y()) - a.y.max(b.y);
                assert!(dx <= EPSILON || dy <= EPSILON, "{:?} overlaps {:?}", a, b);
            }
        }
    }

    #[test]
    fn test_merge_full_edges() {
        let left = FreeRect::new(0.0, 0.0, 1.0, 2.0);
        let right = FreeRect::new(1.0, 0.0, 3.0, 2.0);
        assert_eq!(left.merged_with(&right), Some(FreeRect::new(0.0, 0.0, 4.0, 2.0)));
        assert_eq!(right.merged_with(&left), Some(FreeRect::new(0.0, 0.0, 4.0, 2.0)));

        let below = FreeRect::new(0.0, 2.0, 1.0, 0.5);
        assert_eq!(left.merged_with(&below), Some(FreeRect::new(0.0, 0.0, 1.0, 2.5)));

        // Partial edge
        let offset = FreeRect::new(1.0, 0.5, 3.0, 2.0);
        assert_eq!(left.merged_with(&offset), None);
    }

    #[test]
    fn test_clamp_anchor() {
        let rect = FreeRect::new(1.0, 0.0, 4.0, 2.0);

        assert_eq!(rect.clamp_anchor(-3.0, 5.0, 2.0, 1.0), (1.0, 1.0));
        assert_eq!(rect.clamp_anchor(2.0, 0.5, 2.0, 1.0), (2.0, 0.5));
        assert_eq!(rect.clamp_anchor(9.0, -1.0, 2.0, 1.0), (3.0, 0.0));
    }

    #[test]
    fn test_edge_anchors() {
        let rect = FreeRect::new(0.0, 0.0, 6.0, 2.4);
        let anchors = rect.edge_anchors(2.0, 0.45, 2.0, 1.5);

        assert_eq!(anchors[0], (0.0, 0.45));
        assert_eq!(anchors[1], (4.0, 0.45));
        assert_eq!(anchors[2], (2.0, 0.0));
        assert_relative_eq!(anchors[3].1, 0.9, epsilon = 1e-12);
    }

    #[test]
    fn test_corners() {
        let rect = FreeRect::new(0.0, 0.0, 6.0, 2.4);
        let corners = rect.corners(2.0, 1.5);

        assert_eq!(corners[0], (0.0, 0.0));
        assert_eq!(corners[1], (4.0, 0.0));
        assert_relative_eq!(corners[3].1, 0.9, epsilon = 1e-12);
    }
}
