use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap, HashSet};

use super::{OpenEntry, Solution, reconstruct_path};
use crate::maze::Grid;

/// A* search with the Manhattan-distance heuristic.
///
/// The frontier is a min-heap over `f = g + h`; equal-`f` entries pop in
/// discovery order via the sequence counter in [`OpenEntry`]. A neighbor is
/// re-inserted whenever it is reached with a strictly lower tentative `g`;
/// finalized cells are never reopened.
pub(super) fn solve_astar(grid: &Grid) -> Solution {
    let start = grid.start();
    let goal = grid.goal();

    let mut came_from = HashMap::new();
    let mut g_score = HashMap::from([(start, 0u64)]);
    let mut closed: HashSet<_> = HashSet::new();
    let mut seq = 0u64;

    // Reverse turns the max-heap into a min-heap
    let mut open = BinaryHeap::new();
    open.push(Reverse(OpenEntry {
        f: start.manhattan(goal),
        seq,
        cell: start,
    }));

    while let Some(Reverse(entry)) = open.pop() {
        let cell = entry.cell;
        if closed.contains(&cell) {
            // Stale entry: the cell was re-inserted with a better g and
            // already finalized through that entry
            continue;
        }
        if cell == goal {
            return Solution {
                path: reconstruct_path(&came_from, start, goal),
                expanded: closed,
            };
        }
        closed.insert(cell);

        let tentative = g_score[&cell] + 1;
        for neighbor in grid.neighbors(cell) {
            if closed.contains(&neighbor) {
                continue;
            }
            if g_score.get(&neighbor).is_none_or(|&g| tentative < g) {
                g_score.insert(neighbor, tentative);
                came_from.insert(neighbor, cell);
                seq += 1;
                open.push(Reverse(OpenEntry {
                    f: tentative + neighbor.manhattan(goal),
                    seq,
                    cell: neighbor,
                }));
            }
        }
    }

    Solution {
        path: Vec::new(),
        expanded: closed,
    }
}
