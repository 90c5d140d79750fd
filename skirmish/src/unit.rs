//! Units and turn order.
//!
//! All movement state is explicit and passed into the engine per query:
//! the active unit is an index here, not a global, and the reachable
//! set is recomputed for each decision rather than cached across turns.

use std::fmt;

use tactics_core::Cell;
use tactics_paths::{MoveError, MoveField, Path, PathEngine, ReachableSet};

/// A unit on the map: a position and a per-turn movement allowance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Unit {
    pub pos: Cell,
    pub move_points: i32,
}

impl Unit {
    pub const fn new(pos: Cell, move_points: i32) -> Self {
        Self { pos, move_points }
    }
}

/// Errors from turn actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnError {
    /// The turn order holds no units.
    NoUnits,
    /// The destination is not affordable within the active unit's
    /// movement allowance (or not reachable at all).
    NotReachable(Cell),
    /// A contract violation reported by the engine.
    Engine(MoveError),
}

impl fmt::Display for TurnError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoUnits => write!(f, "no units in the turn order"),
            Self::NotReachable(c) => write!(f, "cell {c} is not reachable this turn"),
            Self::Engine(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for TurnError {}

impl From<MoveError> for TurnError {
    fn from(e: MoveError) -> Self {
        Self::Engine(e)
    }
}

/// The units of a skirmish and whose turn it is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnOrder {
    units: Vec<Unit>,
    active: usize,
}

impl TurnOrder {
    pub fn new(units: Vec<Unit>) -> Self {
        Self { units, active: 0 }
    }

    /// All units, in turn order.
    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    /// The unit whose turn it is.
    pub fn active(&self) -> Option<&Unit> {
        self.units.get(self.active)
    }

    /// Movement options for the active unit this turn.
    pub fn reachable<F: MoveField>(
        &self,
        engine: &mut PathEngine,
        field: &F,
    ) -> Result<ReachableSet, TurnError> {
        let unit = self.units.get(self.active).ok_or(TurnError::NoUnits)?;
        Ok(engine.reachable_set(field, unit.pos, unit.move_points)?)
    }

    /// Move the active unit to `dest` and pass the turn.
    ///
    /// `dest` must be inside the unit's reachable set; moving to the
    /// unit's own cell is the zero-cost "stand still" move and also
    /// passes the turn. On rejection nothing changes — the same unit
    /// stays active.
    pub fn move_active<F: MoveField>(
        &mut self,
        engine: &mut PathEngine,
        field: &F,
        dest: Cell,
    ) -> Result<Path, TurnError> {
        let reachable = self.reachable(engine, field)?;
        let path = reachable
            .path(dest)
            .cloned()
            .ok_or(TurnError::NotReachable(dest))?;
        self.units[self.active].pos = dest;
        self.active = (self.active + 1) % self.units.len();
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tactics_core::CostGrid;

    fn setup() -> (CostGrid, PathEngine, TurnOrder) {
        let grid = CostGrid::filled(5, 5, 1);
        let engine = PathEngine::new(grid.bounds());
        let order = TurnOrder::new(vec![
            Unit::new(Cell::new(0, 0), 3),
            Unit::new(Cell::new(4, 4), 2),
        ]);
        (grid, engine, order)
    }

    #[test]
    fn successful_move_updates_position_and_rotates() {
        let (grid, mut engine, mut order) = setup();
        let dest = Cell::new(2, 1);
        let path = order.move_active(&mut engine, &grid, dest).unwrap();
        assert_eq!(path.cost(), 3);
        assert_eq!(path.destination(), Some(dest));
        assert_eq!(order.units()[0].pos, dest);
        // Turn passed to the second unit.
        assert_eq!(order.active(), Some(&Unit::new(Cell::new(4, 4), 2)));
    }

    #[test]
    fn over_budget_destination_is_rejected_without_state_change() {
        let (grid, mut engine, mut order) = setup();
        let before = order.clone();
        let err = order
            .move_active(&mut engine, &grid, Cell::new(4, 0))
            .unwrap_err();
        assert_eq!(err, TurnError::NotReachable(Cell::new(4, 0)));
        assert_eq!(order, before);
    }

    #[test]
    fn standing_still_passes_the_turn() {
        let (grid, mut engine, mut order) = setup();
        let here = order.active().unwrap().pos;
        let path = order.move_active(&mut engine, &grid, here).unwrap();
        assert!(path.is_empty());
        assert_eq!(order.units()[0].pos, here);
        assert_eq!(order.active().unwrap().pos, Cell::new(4, 4));
    }

    #[test]
    fn turn_order_wraps_around() {
        let (grid, mut engine, mut order) = setup();
        let a = order.active().unwrap().pos;
        order.move_active(&mut engine, &grid, a).unwrap();
        let b = order.active().unwrap().pos;
        order.move_active(&mut engine, &grid, b).unwrap();
        // Back to the first unit.
        assert_eq!(order.active().unwrap().pos, a);
    }

    #[test]
    fn empty_turn_order_reports_no_units() {
        let grid = CostGrid::filled(2, 2, 1);
        let mut engine = PathEngine::new(grid.bounds());
        let mut order = TurnOrder::new(Vec::new());
        assert_eq!(order.active(), None);
        assert_eq!(
            order.move_active(&mut engine, &grid, Cell::new(0, 0)),
            Err(TurnError::NoUnits)
        );
    }

    #[test]
    fn engine_errors_pass_through() {
        let (grid, mut engine, mut order) = setup();
        let mut bad = TurnOrder::new(vec![Unit::new(Cell::new(9, 9), 3)]);
        assert_eq!(
            bad.move_active(&mut engine, &grid, Cell::new(0, 0)),
            Err(TurnError::Engine(MoveError::OutOfBounds(Cell::new(9, 9))))
        );
        // A unit with a negative allowance surfaces InvalidBudget.
        order.units[0].move_points = -1;
        assert_eq!(
            order.move_active(&mut engine, &grid, Cell::new(0, 0)),
            Err(TurnError::Engine(MoveError::InvalidBudget(-1)))
        );
    }
}
