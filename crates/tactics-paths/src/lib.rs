//! Weighted-grid movement engine for turn-based tactics.
//!
//! Two queries make up the whole surface, both on [`PathEngine`]:
//!
//! - [`PathEngine::shortest_path`] — minimum-total-cost route between two
//!   cells (Dijkstra over the 4-connected grid, edge weight = cost of
//!   entering the destination cell)
//! - [`PathEngine::reachable_set`] — every cell affordable within a
//!   movement budget, each mapped to the exact path used to reach it
//!
//! Terrain is abstracted behind [`MoveField`], implemented for
//! [`tactics_core::CostGrid`]; tests and hosts may supply filtered
//! fields (blocked tiles, unit-occupied cells) without the engine
//! caring.
//!
//! Results are deterministic: for a fixed field, start, and end/budget,
//! the returned step sequences are identical across runs and platforms.
//! The tie-break is documented on [`PathEngine::shortest_path`].
//!
//! [`PathEngine`] owns and reuses its internal search caches, so
//! repeated queries (hover, click, selection) incur no allocations
//! after warm-up.

mod engine;
mod path;
mod search;
mod traits;

pub use engine::PathEngine;
pub use path::{MoveError, Path, ReachableSet};
pub use traits::MoveField;
