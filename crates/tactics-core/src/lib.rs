//! Core grid model for turn-based tactics movement.
//!
//! This crate is the leaf of the workspace: it defines the geometry
//! primitives ([`Cell`], [`Range`]) and the immutable [`CostGrid`] of
//! per-cell traversal costs that the path engine searches over. It knows
//! nothing about pathfinding, units, or rendering.

mod geom;
mod grid;

pub use geom::{Cell, Cells, Range};
pub use grid::{CostGrid, GridError, OutOfBounds};
