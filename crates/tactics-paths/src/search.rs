//! The two movement queries: point-to-point shortest path and
//! budget-capped reachability.
//!
//! Both are cost-ordered (Dijkstra-class) searches: the frontier is a
//! priority queue keyed by accumulated cost, never a plain FIFO, so
//! returned paths are cost-minimal even when tile costs vary wildly.

use std::collections::BinaryHeap;

use tactics_core::Cell;

use crate::PathEngine;
use crate::engine::NodeRef;
use crate::path::{MoveError, Path, ReachableSet};
use crate::traits::MoveField;

impl PathEngine {
    /// Compute a minimum-cost path from `start` to `end`.
    ///
    /// The cost of a path is the sum of [`MoveField::enter_cost`] over
    /// every cell entered; the start cell is free. Returns:
    ///
    /// - `Ok(Some(path))` — a cost-minimal route; the empty path if
    ///   `start == end` (a valid zero-length result, not an absence)
    /// - `Ok(None)` — `end` is unreachable from `start`
    /// - `Err(MoveError::OutOfBounds)` — an endpoint lies outside the
    ///   engine's range
    ///
    /// # Tie-breaking
    ///
    /// Among equal-cost routes the result is fixed by policy, not by
    /// data-structure iteration order: the frontier pops the smallest
    /// `(accumulated cost, row-major index)` pair, neighbors are relaxed
    /// in row-major order regardless of how the field enumerates them,
    /// and a cell keeps its first recorded predecessor unless strictly
    /// improved. Identical inputs therefore yield identical step
    /// sequences on every run and platform.
    pub fn shortest_path<F: MoveField>(
        &mut self,
        field: &F,
        start: Cell,
        end: Cell,
    ) -> Result<Option<Path>, MoveError> {
        let start_idx = self.idx(start).ok_or(MoveError::OutOfBounds(start))?;
        let goal_idx = self.idx(end).ok_or(MoveError::OutOfBounds(end))?;

        if start_idx == goal_idx {
            return Ok(Some(Path::empty()));
        }

        // Bump generation to lazily invalidate all nodes.
        self.generation = self.generation.wrapping_add(1);
        let cur_gen = self.generation;

        {
            let node = &mut self.nodes[start_idx];
            node.g = 0;
            node.parent = usize::MAX;
            node.generation = cur_gen;
            node.open = true;
        }

        let mut open: BinaryHeap<NodeRef> = BinaryHeap::new();
        open.push(NodeRef {
            idx: start_idx,
            cost: 0,
        });

        let mut nbuf = std::mem::take(&mut self.nbuf);
        let mut goal_cost = None;

        while let Some(current) = open.pop() {
            let ci = current.idx;

            // Skip stale entries.
            if self.nodes[ci].generation != cur_gen || !self.nodes[ci].open {
                continue;
            }

            if ci == goal_idx {
                goal_cost = Some(self.nodes[ci].g);
                break;
            }

            self.nodes[ci].open = false;
            let current_g = self.nodes[ci].g;
            let current_cell = self.cell_at(ci);

            nbuf.clear();
            field.neighbors(current_cell, &mut nbuf);
            // Relax in row-major order so the tie-break does not depend
            // on the field's enumeration order.
            nbuf.sort_unstable();

            for &nc in nbuf.iter() {
                let Some(ni) = self.idx(nc) else {
                    continue;
                };
                let step = field.enter_cost(nc);
                debug_assert!(step >= 0, "enter_cost must be non-negative");
                let tentative = current_g + step;

                let n = &mut self.nodes[ni];
                if n.generation == cur_gen {
                    if tentative >= n.g {
                        continue;
                    }
                } else {
                    n.generation = cur_gen;
                }

                n.g = tentative;
                n.parent = ci;
                n.open = true;
                open.push(NodeRef {
                    idx: ni,
                    cost: tentative,
                });
            }
        }

        self.nbuf = nbuf;

        let Some(cost) = goal_cost else {
            return Ok(None);
        };
        Ok(Some(Path::new(self.walk_parents(start_idx, goal_idx), cost)))
    }

    /// Compute every cell whose minimum path cost from `start` is within
    /// `budget`, mapped to the path used to reach it.
    ///
    /// Observably equivalent to running [`Self::shortest_path`] from
    /// `start` to every cell of the range and keeping those with
    /// `cost <= budget` — but done in a single budget-capped sweep. The
    /// origin is always included with the empty path. Cells that cost 0
    /// to enter are reachable even at budget 0; on the strictly positive
    /// grids of a typical tactics map, budget 0 yields the origin alone.
    ///
    /// Fails with [`MoveError::OutOfBounds`] if `start` is outside the
    /// range and [`MoveError::InvalidBudget`] if `budget` is negative.
    pub fn reachable_set<F: MoveField>(
        &mut self,
        field: &F,
        start: Cell,
        budget: i32,
    ) -> Result<ReachableSet, MoveError> {
        let start_idx = self.idx(start).ok_or(MoveError::OutOfBounds(start))?;
        if budget < 0 {
            return Err(MoveError::InvalidBudget(budget));
        }

        self.generation = self.generation.wrapping_add(1);
        let cur_gen = self.generation;

        {
            let node = &mut self.nodes[start_idx];
            node.g = 0;
            node.parent = usize::MAX;
            node.generation = cur_gen;
            node.open = true;
        }

        let mut open: BinaryHeap<NodeRef> = BinaryHeap::new();
        open.push(NodeRef {
            idx: start_idx,
            cost: 0,
        });

        let mut nbuf = std::mem::take(&mut self.nbuf);
        let mut reached: Vec<usize> = Vec::new();

        while let Some(current) = open.pop() {
            let ci = current.idx;

            if self.nodes[ci].generation != cur_gen || !self.nodes[ci].open {
                continue;
            }

            self.nodes[ci].open = false;
            reached.push(ci);
            let current_g = self.nodes[ci].g;
            let current_cell = self.cell_at(ci);

            nbuf.clear();
            field.neighbors(current_cell, &mut nbuf);
            nbuf.sort_unstable();

            for &nc in nbuf.iter() {
                let Some(ni) = self.idx(nc) else {
                    continue;
                };
                let step = field.enter_cost(nc);
                debug_assert!(step >= 0, "enter_cost must be non-negative");
                let tentative = current_g + step;
                if tentative > budget {
                    continue;
                }

                let n = &mut self.nodes[ni];
                if n.generation == cur_gen {
                    if tentative >= n.g {
                        continue;
                    }
                } else {
                    n.generation = cur_gen;
                }

                n.g = tentative;
                n.parent = ci;
                n.open = true;
                open.push(NodeRef {
                    idx: ni,
                    cost: tentative,
                });
            }
        }

        self.nbuf = nbuf;

        let mut set = ReachableSet::new(start);
        for &ci in reached.iter() {
            if ci == start_idx {
                continue;
            }
            let cost = self.nodes[ci].g;
            set.insert(self.cell_at(ci), Path::new(self.walk_parents(start_idx, ci), cost));
        }
        Ok(set)
    }

    /// Walk predecessor links from `goal_idx` back to `start_idx` and
    /// return the steps in forward order, start-exclusive.
    fn walk_parents(&self, start_idx: usize, goal_idx: usize) -> Vec<Cell> {
        let mut steps = Vec::new();
        let mut ci = goal_idx;
        while ci != start_idx {
            steps.push(self.cell_at(ci));
            ci = self.nodes[ci].parent;
        }
        steps.reverse();
        steps
    }
}
