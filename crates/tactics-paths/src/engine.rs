use tactics_core::{Cell, Range};

// ---------------------------------------------------------------------------
// Internal node bookkeeping for the cost-ordered search
// ---------------------------------------------------------------------------

#[derive(Clone)]
pub(crate) struct Node {
    /// Best known accumulated cost.
    pub(crate) g: i32,
    /// Flat index of the predecessor, `usize::MAX` at the origin.
    pub(crate) parent: usize,
    /// Entries from older generations are stale and ignored.
    pub(crate) generation: u32,
    pub(crate) open: bool,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            g: 0,
            parent: usize::MAX,
            generation: 0,
            open: false,
        }
    }
}

/// Reference into the node array, ordered for use in `BinaryHeap`.
///
/// Greater means "popped earlier": the heap pops the smallest
/// accumulated cost first, and among equal costs the smallest flat
/// (row-major) index. The index tie-break is what makes query results
/// reproducible across runs and platforms.
#[derive(Clone, Copy, Eq, PartialEq)]
pub(crate) struct NodeRef {
    pub(crate) idx: usize,
    pub(crate) cost: i32,
}

impl Ord for NodeRef {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Reverse so BinaryHeap (max-heap) pops smallest (cost, idx) first.
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.idx.cmp(&self.idx))
    }
}

impl PartialOrd for NodeRef {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

// ---------------------------------------------------------------------------
// PathEngine
// ---------------------------------------------------------------------------

/// Movement-query service over a rectangular grid range.
///
/// The engine owns its internal search state (node array, neighbor
/// scratch buffer) and reuses it across queries so that repeated calls
/// incur no allocations after the first use. A generation counter
/// invalidates all per-query state wholesale at the start of each query,
/// so no result of one query can leak into the next — every call is
/// query-scoped, as if the engine were freshly constructed.
///
/// The grid itself is not held here; queries borrow a
/// [`MoveField`](crate::MoveField) for their duration.
pub struct PathEngine {
    pub(crate) rng: Range,
    pub(crate) width: usize,
    pub(crate) nodes: Vec<Node>,
    pub(crate) generation: u32,
    // Shared scratch buffer for neighbor queries.
    pub(crate) nbuf: Vec<Cell>,
}

impl PathEngine {
    /// Create a new engine for the given grid range.
    pub fn new(rng: Range) -> Self {
        Self {
            rng,
            width: rng.width().max(0) as usize,
            nodes: vec![Node::default(); rng.len()],
            generation: 0,
            nbuf: Vec::with_capacity(4),
        }
    }

    /// Replace the underlying range, e.g. when a new level loads.
    ///
    /// If the new size fits within existing capacity the node array is
    /// kept and the generation counter bumped so stale entries are
    /// ignored; otherwise it is reallocated.
    pub fn set_range(&mut self, rng: Range) {
        let new_len = rng.len();
        let capacity = self.nodes.len();
        self.rng = rng;
        self.width = rng.width().max(0) as usize;

        if new_len <= capacity {
            self.generation = self.generation.wrapping_add(1);
            return;
        }

        self.nodes.clear();
        self.nodes.resize(new_len, Node::default());
        self.generation = 0;
    }

    /// The grid range being searched.
    #[inline]
    pub fn range(&self) -> Range {
        self.rng
    }

    // -----------------------------------------------------------------------
    // Coordinate helpers
    // -----------------------------------------------------------------------

    /// Convert a `Cell` to a flat row-major index. `None` if out of range.
    #[inline]
    pub(crate) fn idx(&self, c: Cell) -> Option<usize> {
        if !self.rng.contains(c) {
            return None;
        }
        let x = (c.x - self.rng.min.x) as usize;
        let y = (c.y - self.rng.min.y) as usize;
        Some(y * self.width + x)
    }

    /// Convert a flat index back to a `Cell`.
    #[inline]
    pub(crate) fn cell_at(&self, idx: usize) -> Cell {
        let x = (idx % self.width) as i32 + self.rng.min.x;
        let y = (idx / self.width) as i32 + self.rng.min.y;
        Cell::new(x, y)
    }
}
