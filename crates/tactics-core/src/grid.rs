//! The immutable cost field the path engine searches over.

use std::fmt;

use crate::geom::{Cell, Range};

/// Error returned when a queried coordinate lies outside a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutOfBounds(pub Cell);

impl fmt::Display for OutOfBounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cell {} is outside the grid", self.0)
    }
}

impl std::error::Error for OutOfBounds {}

/// Errors that can occur when constructing a [`CostGrid`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// No rows, or a first row with no columns.
    Empty,
    /// A row whose width differs from the first row's.
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// A cost entry below zero.
    NegativeCost { cell: Cell, value: i32 },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "grid has no cells"),
            Self::RaggedRow {
                row,
                expected,
                found,
            } => {
                write!(
                    f,
                    "row {row} has {found} entries, expected {expected} (grid must be rectangular)"
                )
            }
            Self::NegativeCost { cell, value } => {
                write!(f, "cell {cell} has negative cost {value}")
            }
        }
    }
}

impl std::error::Error for GridError {}

/// An immutable rectangular field of non-negative traversal costs.
///
/// `cost(c)` is the price of *entering* (or standing on) cell `c`; there
/// is no separate cost for leaving a cell. Costs are fixed for the
/// grid's lifetime: a level loads, plays out, and is dropped wholesale.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CostGrid {
    costs: Vec<i32>,
    bounds: Range,
}

impl CostGrid {
    /// Build a grid from rows of entry costs (row 0 is the top).
    ///
    /// Fails with [`GridError::Empty`] on empty input,
    /// [`GridError::RaggedRow`] if any row's width differs from the
    /// first row's, and [`GridError::NegativeCost`] on a cost below zero.
    pub fn from_rows(rows: &[Vec<i32>]) -> Result<Self, GridError> {
        let height = rows.len();
        let width = rows.first().map(Vec::len).unwrap_or(0);
        if height == 0 || width == 0 {
            return Err(GridError::Empty);
        }

        let mut costs = Vec::with_capacity(width * height);
        for (y, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(GridError::RaggedRow {
                    row: y,
                    expected: width,
                    found: row.len(),
                });
            }
            for (x, &value) in row.iter().enumerate() {
                if value < 0 {
                    return Err(GridError::NegativeCost {
                        cell: Cell::new(x as i32, y as i32),
                        value,
                    });
                }
                costs.push(value);
            }
        }

        Ok(Self {
            costs,
            bounds: Range::with_size(width as i32, height as i32),
        })
    }

    /// A grid of the given size with every cell costing `cost`.
    ///
    /// Negative sizes are treated as empty; a negative cost is clamped
    /// to zero so the non-negativity invariant always holds.
    pub fn filled(width: i32, height: i32, cost: i32) -> Self {
        let bounds = Range::with_size(width.max(0), height.max(0));
        Self {
            costs: vec![cost.max(0); bounds.len()],
            bounds,
        }
    }

    /// The bounding range of the grid (origin-anchored).
    #[inline]
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    /// Width of the grid.
    #[inline]
    pub fn width(&self) -> i32 {
        self.bounds.width()
    }

    /// Height of the grid.
    #[inline]
    pub fn height(&self) -> i32 {
        self.bounds.height()
    }

    /// Whether the grid contains the given cell.
    #[inline]
    pub fn contains(&self, c: Cell) -> bool {
        self.bounds.contains(c)
    }

    #[inline]
    fn idx(&self, c: Cell) -> usize {
        (c.y * self.bounds.width() + c.x) as usize
    }

    /// Entry cost at a cell, or `None` if out of bounds.
    #[inline]
    pub fn get(&self, c: Cell) -> Option<i32> {
        if !self.contains(c) {
            return None;
        }
        Some(self.costs[self.idx(c)])
    }

    /// Entry cost at a cell.
    ///
    /// Fails with [`OutOfBounds`] if `c` lies outside the grid; a bad
    /// coordinate is never clamped.
    #[inline]
    pub fn cost(&self, c: Cell) -> Result<i32, OutOfBounds> {
        self.get(c).ok_or(OutOfBounds(c))
    }

    /// Append the in-bounds cardinal neighbours of `c` into `buf`.
    ///
    /// The caller clears `buf` beforehand. Enumeration order is not part
    /// of this contract; ordering policy belongs to the path engine.
    pub fn neighbors(&self, c: Cell, buf: &mut Vec<Cell>) {
        for n in c.neighbors4() {
            if self.contains(n) {
                buf.push(n);
            }
        }
    }
}
