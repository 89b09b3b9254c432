//! Shortest routes to a goal line. Only fences block a route, pawns never do.
//!
//! Every edge costs one step, so a breadth first search is enough. Visited state is a
//! table local to each call, there is nothing to reset between calls.

use std::collections::VecDeque;

use tracing::instrument;

use crate::board::{EdgeState, Grid};
use crate::types::Direction;
use crate::wire_representation::Position;

/// Number of steps from `from` to the nearest cell of the `goal` line, or None if fences
/// cut `from` off from it.
#[instrument(level = "trace", skip(grid, edges))]
pub fn distance_to_goal(
    grid: &Grid,
    edges: &EdgeState,
    goal: Direction,
    from: Position,
) -> Option<u32> {
    if grid.is_on_goal(from, goal) {
        return Some(0);
    }

    let mut dist: Vec<Option<u32>> = vec![None; grid.cell_count()];
    let mut queue = VecDeque::new();
    dist[grid.cell_index(from).as_usize()] = Some(0);
    queue.push_back((from, 0));

    while let Some((pos, d)) = queue.pop_front() {
        for (_, next) in edges.open_neighbors(pos) {
            let slot = &mut dist[grid.cell_index(next).as_usize()];
            if slot.is_some() {
                continue;
            }
            if grid.is_on_goal(next, goal) {
                return Some(d + 1);
            }
            *slot = Some(d + 1);
            queue.push_back((next, d + 1));
        }
    }

    None
}

/// Distance labels towards one goal line for every cell of the board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistanceMap {
    grid: Grid,
    goal: Direction,
    labels: Vec<Option<u32>>,
}

impl DistanceMap {
    /// the label of pos, None when pos can't reach the goal
    pub fn get(&self, pos: Position) -> Option<u32> {
        if self.grid.off_board(pos) {
            return None;
        }
        self.labels[self.grid.cell_index(pos).as_usize()]
    }

    /// the goal these labels lead to
    pub fn goal(&self) -> Direction {
        self.goal
    }

    /// cells with no route to the goal
    pub fn wayless(&self) -> impl Iterator<Item = Position> + '_ {
        self.grid.positions().filter(move |p| self.get(*p).is_none())
    }
}

/// Label every cell with its distance to the goal line, searching inwards from the
/// whole goal line at once.
#[instrument(level = "trace", skip(grid, edges))]
pub fn distance_map(grid: &Grid, edges: &EdgeState, goal: Direction) -> DistanceMap {
    let mut labels: Vec<Option<u32>> = vec![None; grid.cell_count()];
    let mut queue = VecDeque::new();

    for pos in grid.goal_line(goal) {
        labels[grid.cell_index(pos).as_usize()] = Some(0);
        queue.push_back((pos, 0));
    }

    while let Some((pos, d)) = queue.pop_front() {
        // edges are symmetric, so an open edge out of pos is an open edge into it
        for (_, next) in edges.open_neighbors(pos) {
            let slot = &mut labels[grid.cell_index(next).as_usize()];
            if slot.is_none() {
                *slot = Some(d + 1);
                queue.push_back((next, d + 1));
            }
        }
    }

    DistanceMap {
        grid: *grid,
        goal,
        labels,
    }
}
