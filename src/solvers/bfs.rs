use std::collections::{HashMap, HashSet, VecDeque};

use super::{Solution, reconstruct_path};
use crate::maze::Grid;

/// Uniform-cost search over the unit-weight cell graph.
///
/// With every edge costing 1, a FIFO frontier visits cells in distance
/// order, so a cell's distance is final the first time it is discovered and
/// no relaxation pass is needed afterwards.
pub(super) fn solve_uniform_cost(grid: &Grid) -> Solution {
    let start = grid.start();
    let goal = grid.goal();

    let mut came_from = HashMap::new();
    let mut discovered = HashSet::from([start]);
    let mut queue = VecDeque::from([start]);
    let mut expanded = HashSet::new();

    while let Some(cell) = queue.pop_front() {
        if cell == goal {
            return Solution {
                path: reconstruct_path(&came_from, start, goal),
                expanded,
            };
        }
        expanded.insert(cell);

        for neighbor in grid.neighbors(cell) {
            if discovered.insert(neighbor) {
                came_from.insert(neighbor, cell);
                queue.push_back(neighbor);
            }
        }
    }

    // Frontier drained without popping the goal
    Solution {
        path: Vec::new(),
        expanded,
    }
}
