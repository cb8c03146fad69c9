mod all_paths;
mod astar;
mod bfs;
mod stepwise;

pub use all_paths::find_all_paths;
pub use stepwise::{Frontier, Step, StepwiseSearch};

use std::collections::{HashMap, HashSet};

use crate::maze::{Cell, Grid};

/// One-shot search strategies available behind [`solve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Solver {
    /// Unweighted breadth-first search. All edges cost 1, so the first
    /// discovery of a cell fixes its distance from the start.
    UniformCost,
    /// A* with the Manhattan-distance heuristic, which is admissible and
    /// consistent on a unit-cost grid.
    AStar,
}

impl std::fmt::Display for Solver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Solver::UniformCost => write!(f, "Uniform-Cost Search (BFS)"),
            Solver::AStar => write!(f, "A* Search"),
        }
    }
}

/// Outcome of a one-shot search: the route from start to goal (empty when no
/// route exists) and the set of cells finalized before the goal was popped.
#[derive(Debug, Clone)]
pub struct Solution {
    pub path: Vec<Cell>,
    pub expanded: HashSet<Cell>,
}

/// Searches `grid` from its start to its goal with the chosen strategy.
///
/// An unreachable goal yields an empty path, not an error. Results are
/// deterministic: neighbor order is fixed and equal-priority frontier
/// entries pop in discovery order.
pub fn solve(grid: &Grid, solver: Solver) -> Solution {
    let solution = match solver {
        Solver::UniformCost => bfs::solve_uniform_cost(grid),
        Solver::AStar => astar::solve_astar(grid),
    };
    tracing::debug!(
        "[solve] {} finished: path length {}, {} cells expanded",
        solver,
        solution.path.len(),
        solution.expanded.len()
    );
    solution
}

/// Frontier entry for the heap-based searches, ordered by `f` and then by
/// discovery sequence so equal-`f` entries pop FIFO.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct OpenEntry {
    pub f: u64,
    pub seq: u64,
    pub cell: Cell,
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // The cell is a last resort so the ordering agrees with Eq; seq is
        // unique per insertion, so it decides every real comparison
        self.f
            .cmp(&other.f)
            .then(self.seq.cmp(&other.seq))
            .then(self.cell.cmp(&other.cell))
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Walks the predecessor map from `goal` back to `start` and reverses.
/// Only meaningful once the goal has actually been reached.
pub(crate) fn reconstruct_path(
    came_from: &HashMap<Cell, Cell>,
    start: Cell,
    goal: Cell,
) -> Vec<Cell> {
    let mut path = vec![goal];
    let mut current = goal;
    while current != start {
        match came_from.get(&current) {
            Some(&previous) => {
                path.push(previous);
                current = previous;
            }
            // Broken chain: the goal was never reached
            None => return Vec::new(),
        }
    }
    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::generate;

    /// Checks that consecutive path cells are grid-adjacent and wall-open.
    fn assert_walkable(grid: &Grid, path: &[Cell]) {
        for pair in path.windows(2) {
            assert!(pair[0].is_adjacent(pair[1]));
            assert!(!grid.wall_between(pair[0], pair[1]).unwrap());
        }
    }

    #[test]
    fn both_solvers_walk_from_start_to_goal() {
        let grid = generate(12, 9, 3, 6).unwrap();
        for solver in [Solver::UniformCost, Solver::AStar] {
            let solution = solve(&grid, solver);
            assert_eq!(solution.path.first(), Some(&grid.start()));
            assert_eq!(solution.path.last(), Some(&grid.goal()));
            assert_walkable(&grid, &solution.path);
        }
    }

    #[test]
    fn astar_matches_uniform_cost_length() {
        // Optimality under an admissible heuristic: A* must find routes as
        // short as BFS on every grid
        for seed in 0..12 {
            let grid = generate(10, 10, seed, 8).unwrap();
            let bfs = solve(&grid, Solver::UniformCost);
            let astar = solve(&grid, Solver::AStar);
            assert_eq!(
                bfs.path.len(),
                astar.path.len(),
                "seed {} produced different optimal lengths",
                seed
            );
        }
    }

    #[test]
    fn uniform_cost_finds_the_shortest_route() {
        // 3x1 corridor: the only route has exactly 3 cells
        let grid = generate(3, 1, 0, 0).unwrap();
        let solution = solve(&grid, Solver::UniformCost);
        assert_eq!(
            solution.path,
            vec![Cell::new(0, 0), Cell::new(1, 0), Cell::new(2, 0)]
        );
    }

    #[test]
    fn walled_grid_yields_empty_path() {
        // A freshly built grid has every wall up, so the goal is unreachable
        let grid = Grid::new(4, 4).unwrap();
        for solver in [Solver::UniformCost, Solver::AStar] {
            let solution = solve(&grid, solver);
            assert!(solution.path.is_empty());
        }
    }

    #[test]
    fn single_cell_grid_solves_trivially() {
        let grid = generate(1, 1, 0, 0).unwrap();
        let solution = solve(&grid, Solver::AStar);
        assert_eq!(solution.path, vec![Cell::new(0, 0)]);
        assert!(solution.expanded.is_empty());
    }

    #[test]
    fn solving_is_deterministic() {
        // Rerunning generation with identical inputs must reproduce both the
        // wall layout and the search result
        let first_grid = generate(3, 3, 42, 0).unwrap();
        let second_grid = generate(3, 3, 42, 0).unwrap();
        assert_eq!(first_grid, second_grid);
        let first = solve(&first_grid, Solver::AStar);
        let second = solve(&second_grid, Solver::AStar);
        assert_eq!(first.path, second.path);
        assert_eq!(first.expanded, second.expanded);
    }

    #[test]
    fn open_entry_ordering_is_consistent_with_equality() {
        use std::cmp::Ordering;
        let a = OpenEntry { f: 3, seq: 1, cell: Cell::new(0, 0) };
        let b = OpenEntry { f: 3, seq: 1, cell: Cell::new(1, 0) };
        // Entries that differ only by cell must not compare Equal
        assert_ne!(a, b);
        assert_ne!(a.cmp(&b), Ordering::Equal);
        assert_eq!(a.cmp(&a), Ordering::Equal);
        // f dominates, then seq: discovery order breaks f ties
        let earlier = OpenEntry { f: 3, seq: 0, cell: Cell::new(9, 9) };
        let cheaper = OpenEntry { f: 2, seq: 7, cell: Cell::new(9, 9) };
        assert!(earlier < a);
        assert!(cheaper < earlier);
    }

    #[test]
    fn expanded_cells_exclude_the_goal() {
        let grid = generate(6, 6, 11, 0).unwrap();
        for solver in [Solver::UniformCost, Solver::AStar] {
            let solution = solve(&grid, solver);
            assert!(!solution.expanded.contains(&grid.goal()));
        }
    }
}
