use tactics_core::{Cell, CostGrid};

/// The engine's view of terrain: neighbor enumeration plus entry cost.
///
/// The grid model underneath is immutable for the duration of a query;
/// implementations must not report different neighbors or costs across
/// calls within one query.
pub trait MoveField {
    /// Append the traversable neighbors of `c` into `buf`. The caller
    /// clears `buf` before calling. Enumeration order does not matter:
    /// the engine re-sorts neighbors before relaxing them, so filtered
    /// or exotic implementations cannot perturb results.
    fn neighbors(&self, c: Cell, buf: &mut Vec<Cell>);

    /// Cost of entering `c`. Must be non-negative. Only called with
    /// cells this field previously produced from [`Self::neighbors`].
    fn enter_cost(&self, c: Cell) -> i32;
}

impl MoveField for CostGrid {
    fn neighbors(&self, c: Cell, buf: &mut Vec<Cell>) {
        CostGrid::neighbors(self, c, buf);
    }

    fn enter_cost(&self, c: Cell) -> i32 {
        self.get(c).unwrap_or(0)
    }
}
