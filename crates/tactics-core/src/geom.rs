//! Geometry primitives: [`Cell`] and [`Range`].

use std::fmt;
use std::ops::{Add, Sub};

// ---------------------------------------------------------------------------
// Cell
// ---------------------------------------------------------------------------

/// A grid coordinate. X grows right, Y grows down (screen coordinates).
///
/// `Cell` is a plain value: equality and hashing are by coordinate, and
/// the `Ord` impl is **row-major** (`y` first, then `x`). The path engine
/// defines its deterministic tie-break in terms of this ordering, so it
/// is part of the public contract rather than an arbitrary derive.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    /// Create a new cell.
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Return a cell shifted by (dx, dy).
    #[inline]
    pub const fn shift(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// The four cardinal neighbours (up, right, down, left), including
    /// any that fall outside a grid. Bounds filtering is the grid's job.
    #[inline]
    pub fn neighbors4(self) -> [Cell; 4] {
        [
            Self::new(self.x, self.y - 1),
            Self::new(self.x + 1, self.y),
            Self::new(self.x, self.y + 1),
            Self::new(self.x - 1, self.y),
        ]
    }

    /// Manhattan (L1) distance to another cell.
    #[inline]
    pub const fn manhattan(self, other: Cell) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }
}

impl PartialOrd for Cell {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Cell {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.y.cmp(&other.y).then(self.x.cmp(&other.x))
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl Add for Cell {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Cell {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

// ---------------------------------------------------------------------------
// Range
// ---------------------------------------------------------------------------

/// A half-open rectangle of cells: `min` inclusive, `max` exclusive.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Range {
    pub min: Cell,
    pub max: Cell,
}

impl Range {
    /// Create a new range from two corners and auto-canonicalize so that
    /// `min` ≤ `max` on each axis.
    #[inline]
    pub fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self {
            min: Cell::new(x0.min(x1), y0.min(y1)),
            max: Cell::new(x0.max(x1), y0.max(y1)),
        }
    }

    /// A range of the given size anchored at the origin.
    #[inline]
    pub fn with_size(width: i32, height: i32) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Width of the range.
    #[inline]
    pub fn width(self) -> i32 {
        self.max.x - self.min.x
    }

    /// Height of the range.
    #[inline]
    pub fn height(self) -> i32 {
        self.max.y - self.min.y
    }

    /// Total number of cells in the range.
    #[inline]
    pub fn len(self) -> usize {
        if self.is_empty() {
            return 0;
        }
        (self.width() as usize) * (self.height() as usize)
    }

    /// Whether the range has zero area.
    #[inline]
    pub fn is_empty(self) -> bool {
        self.min.x >= self.max.x || self.min.y >= self.max.y
    }

    /// Whether `c` is inside the half-open range.
    #[inline]
    pub fn contains(self, c: Cell) -> bool {
        c.x >= self.min.x && c.x < self.max.x && c.y >= self.min.y && c.y < self.max.y
    }

    /// Iterate over all cells in row-major order (left to right, then
    /// top to bottom).
    #[inline]
    pub fn iter(self) -> Cells {
        Cells {
            rng: self,
            next: self.min,
        }
    }
}

impl IntoIterator for Range {
    type Item = Cell;
    type IntoIter = Cells;

    fn into_iter(self) -> Cells {
        self.iter()
    }
}

/// Row-major iterator over the cells of a [`Range`].
#[derive(Clone, Debug)]
pub struct Cells {
    rng: Range,
    next: Cell,
}

impl Iterator for Cells {
    type Item = Cell;

    fn next(&mut self) -> Option<Cell> {
        if self.rng.is_empty() || self.next.y >= self.rng.max.y {
            return None;
        }
        let cur = self.next;
        self.next.x += 1;
        if self.next.x >= self.rng.max.x {
            self.next.x = self.rng.min.x;
            self.next.y += 1;
        }
        Some(cur)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.rng.is_empty() || self.next.y >= self.rng.max.y {
            return (0, Some(0));
        }
        let done = (self.next.y - self.rng.min.y) as usize * self.rng.width() as usize
            + (self.next.x - self.rng.min.x) as usize;
        let left = self.rng.len() - done;
        (left, Some(left))
    }
}

impl ExactSizeIterator for Cells {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ord_is_row_major() {
        let mut cells = vec![
            Cell::new(1, 1),
            Cell::new(0, 0),
            Cell::new(2, 0),
            Cell::new(0, 1),
        ];
        cells.sort();
        assert_eq!(
            cells,
            vec![
                Cell::new(0, 0),
                Cell::new(2, 0),
                Cell::new(0, 1),
                Cell::new(1, 1),
            ]
        );
    }

    #[test]
    fn neighbors4_order() {
        let c = Cell::new(3, 3);
        assert_eq!(
            c.neighbors4(),
            [
                Cell::new(3, 2),
                Cell::new(4, 3),
                Cell::new(3, 4),
                Cell::new(2, 3),
            ]
        );
    }

    #[test]
    fn manhattan_distance() {
        assert_eq!(Cell::new(0, 0).manhattan(Cell::new(2, 2)), 4);
        assert_eq!(Cell::new(5, 1).manhattan(Cell::new(1, 3)), 6);
        assert_eq!(Cell::new(2, 2).manhattan(Cell::new(2, 2)), 0);
    }

    #[test]
    fn range_contains_is_half_open() {
        let r = Range::new(0, 0, 3, 2);
        assert!(r.contains(Cell::new(0, 0)));
        assert!(r.contains(Cell::new(2, 1)));
        assert!(!r.contains(Cell::new(3, 1)));
        assert!(!r.contains(Cell::new(2, 2)));
        assert!(!r.contains(Cell::new(-1, 0)));
    }

    #[test]
    fn range_iter_row_major() {
        let r = Range::new(0, 0, 2, 2);
        let cells: Vec<_> = r.iter().collect();
        assert_eq!(
            cells,
            vec![
                Cell::new(0, 0),
                Cell::new(1, 0),
                Cell::new(0, 1),
                Cell::new(1, 1),
            ]
        );
        assert_eq!(r.iter().len(), 4);
    }

    #[test]
    fn empty_range() {
        let r = Range::new(2, 2, 2, 5);
        assert!(r.is_empty());
        assert_eq!(r.len(), 0);
        assert_eq!(r.iter().count(), 0);
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn cell_round_trip() {
        let c = Cell::new(3, 7);
        let json = serde_json::to_string(&c).unwrap();
        let back: Cell = serde_json::from_str(&json).unwrap();
        assert_eq!(c, back);
    }

    #[test]
    fn range_round_trip() {
        let r = Range::new(1, 2, 10, 20);
        let json = serde_json::to_string(&r).unwrap();
        let back: Range = serde_json::from_str(&json).unwrap();
        assert_eq!(r, back);
    }
}
