use std::collections::BTreeMap;
use std::collections::btree_map;
use std::fmt;

use tactics_core::{Cell, OutOfBounds};

/// Errors reported by [`PathEngine`](crate::PathEngine) queries.
///
/// Contract violations only: an unreachable destination is not an error
/// (it is a `None` path, or an absent reachable-set entry).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveError {
    /// A supplied coordinate lies outside the engine's range.
    OutOfBounds(Cell),
    /// A negative movement budget.
    InvalidBudget(i32),
}

impl fmt::Display for MoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds(c) => write!(f, "cell {c} is outside the searchable range"),
            Self::InvalidBudget(b) => write!(f, "movement budget {b} is negative"),
        }
    }
}

impl std::error::Error for MoveError {}

impl From<OutOfBounds> for MoveError {
    fn from(e: OutOfBounds) -> Self {
        Self::OutOfBounds(e.0)
    }
}

/// A route between two cells: the step sequence from (but excluding) the
/// start to (and including) the destination, plus its total cost.
///
/// The empty path is a valid result meaning "start equals end"; it is
/// distinct from *no* path, which queries report as `None`.
///
/// Invariants upheld by the engine: consecutive steps (with the implicit
/// start prepended) are 4-adjacent, no cell repeats, and `cost` equals
/// the sum of entry costs over every step (the start is free).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Path {
    steps: Vec<Cell>,
    cost: i32,
}

impl Path {
    /// The zero-length path (start equals end, cost 0).
    pub const fn empty() -> Self {
        Self {
            steps: Vec::new(),
            cost: 0,
        }
    }

    pub(crate) fn new(steps: Vec<Cell>, cost: i32) -> Self {
        Self { steps, cost }
    }

    /// The steps of the path, start-exclusive, destination-inclusive.
    #[inline]
    pub fn steps(&self) -> &[Cell] {
        &self.steps
    }

    /// Total cost of the path (sum of entry costs over all steps).
    #[inline]
    pub fn cost(&self) -> i32 {
        self.cost
    }

    /// Number of steps.
    #[inline]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether this is the zero-length path.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// The destination, or `None` for the zero-length path (the
    /// destination is then the start, which the path does not record).
    #[inline]
    pub fn destination(&self) -> Option<Cell> {
        self.steps.last().copied()
    }

    /// Iterate over the steps.
    pub fn iter(&self) -> std::slice::Iter<'_, Cell> {
        self.steps.iter()
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a Cell;
    type IntoIter = std::slice::Iter<'a, Cell>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

/// Every destination affordable within a movement budget, mapped to the
/// path used to reach it.
///
/// The origin is always present, mapped to the empty path. Iteration is
/// row-major over destinations (the [`Cell`] ordering), so rendering a
/// reachable set is deterministic without sorting on the caller's side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReachableSet {
    origin: Cell,
    paths: BTreeMap<Cell, Path>,
}

impl ReachableSet {
    pub(crate) fn new(origin: Cell) -> Self {
        let mut paths = BTreeMap::new();
        paths.insert(origin, Path::empty());
        Self { origin, paths }
    }

    pub(crate) fn insert(&mut self, dest: Cell, path: Path) {
        self.paths.insert(dest, path);
    }

    /// The shared origin of every path in the set.
    #[inline]
    pub fn origin(&self) -> Cell {
        self.origin
    }

    /// Number of reachable destinations (the origin counts).
    #[inline]
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Always `false`: the origin itself is always reachable.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Whether `dest` is affordable within the queried budget.
    #[inline]
    pub fn contains(&self, dest: Cell) -> bool {
        self.paths.contains_key(&dest)
    }

    /// The path to `dest`, or `None` if it is not reachable.
    #[inline]
    pub fn path(&self, dest: Cell) -> Option<&Path> {
        self.paths.get(&dest)
    }

    /// The cost of reaching `dest`, or `None` if it is not reachable.
    #[inline]
    pub fn cost(&self, dest: Cell) -> Option<i32> {
        self.paths.get(&dest).map(Path::cost)
    }

    /// Iterate over `(destination, path)` pairs in row-major order.
    pub fn iter(&self) -> btree_map::Iter<'_, Cell, Path> {
        self.paths.iter()
    }

    /// Iterate over reachable destinations in row-major order.
    pub fn cells(&self) -> btree_map::Keys<'_, Cell, Path> {
        self.paths.keys()
    }
}

impl<'a> IntoIterator for &'a ReachableSet {
    type Item = (&'a Cell, &'a Path);
    type IntoIter = btree_map::Iter<'a, Cell, Path>;

    fn into_iter(self) -> Self::IntoIter {
        self.paths.iter()
    }
}

// Formats like JSON only accept string map keys, so the mapping is
// serialized as a sequence of (destination, path) pairs instead of a
// map keyed by `Cell`.
#[cfg(feature = "serde")]
impl serde::Serialize for ReachableSet {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        let pairs: Vec<(&Cell, &Path)> = self.paths.iter().collect();
        let mut s = serializer.serialize_struct("ReachableSet", 2)?;
        s.serialize_field("origin", &self.origin)?;
        s.serialize_field("paths", &pairs)?;
        s.end()
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for ReachableSet {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(serde::Deserialize)]
        struct Repr {
            origin: Cell,
            paths: Vec<(Cell, Path)>,
        }

        let repr = Repr::deserialize(deserializer)?;
        let mut set = ReachableSet::new(repr.origin);
        for (dest, path) in repr.paths {
            set.insert(dest, path);
        }
        Ok(set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_path_is_not_no_path() {
        let p = Path::empty();
        assert!(p.is_empty());
        assert_eq!(p.cost(), 0);
        assert_eq!(p.destination(), None);
        // `Some(empty)` and `None` must stay distinguishable.
        assert_ne!(Some(p), None::<Path>);
    }

    #[test]
    fn reachable_set_always_contains_origin() {
        let origin = Cell::new(2, 3);
        let set = ReachableSet::new(origin);
        assert_eq!(set.len(), 1);
        assert!(set.contains(origin));
        assert_eq!(set.path(origin), Some(&Path::empty()));
        assert_eq!(set.cost(origin), Some(0));
    }

    #[test]
    fn reachable_set_iterates_row_major() {
        let mut set = ReachableSet::new(Cell::new(1, 1));
        set.insert(Cell::new(0, 2), Path::new(vec![Cell::new(0, 2)], 3));
        set.insert(Cell::new(2, 0), Path::new(vec![Cell::new(2, 0)], 1));
        let order: Vec<Cell> = set.cells().copied().collect();
        assert_eq!(
            order,
            vec![Cell::new(2, 0), Cell::new(1, 1), Cell::new(0, 2)]
        );
    }

    #[test]
    fn move_error_display() {
        let e = MoveError::OutOfBounds(Cell::new(9, -1));
        assert_eq!(e.to_string(), "cell (9, -1) is outside the searchable range");
        let e = MoveError::InvalidBudget(-4);
        assert_eq!(e.to_string(), "movement budget -4 is negative");
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn path_round_trip() {
        let p = Path::new(vec![Cell::new(1, 0), Cell::new(1, 1)], 5);
        let json = serde_json::to_string(&p).unwrap();
        let back: Path = serde_json::from_str(&json).unwrap();
        assert_eq!(p, back);
    }

    #[test]
    fn reachable_set_round_trip() {
        let mut set = ReachableSet::new(Cell::new(0, 0));
        set.insert(Cell::new(1, 0), Path::new(vec![Cell::new(1, 0)], 2));
        set.insert(
            Cell::new(1, 1),
            Path::new(vec![Cell::new(1, 0), Cell::new(1, 1)], 5),
        );
        // Cell keys are not valid JSON map keys, so the mapping must
        // serialize as (destination, path) pairs.
        let json = serde_json::to_string(&set).unwrap();
        assert!(json.contains("\"paths\":[["));
        let back: ReachableSet = serde_json::from_str(&json).unwrap();
        assert_eq!(set, back);
        assert_eq!(back.cost(Cell::new(1, 1)), Some(5));
    }
}
