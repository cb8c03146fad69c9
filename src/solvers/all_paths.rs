use std::collections::HashSet;

use crate::maze::{Cell, Grid};

/// Enumerates every simple path (no repeated cell) from the grid's start to
/// its goal, by depth-first backtracking.
///
/// The number of simple paths grows exponentially with passage density, so
/// this is only suitable for small or sparsely-looped grids; callers must
/// bound grid size or passage count accordingly. That cost is inherent to
/// exhaustive enumeration, not an implementation defect. Recursion depth is
/// bounded by the cell count, which the u16 dimensions keep manageable.
pub fn find_all_paths(grid: &Grid) -> Vec<Vec<Cell>> {
    let mut paths = Vec::new();
    let mut visited = HashSet::new();
    let mut current = Vec::new();
    collect_paths(grid, grid.start(), &mut visited, &mut current, &mut paths);
    tracing::debug!(
        "[all_paths] enumerated {} simple path(s) on a {}x{} grid",
        paths.len(),
        grid.cols(),
        grid.rows()
    );
    paths
}

fn collect_paths(
    grid: &Grid,
    cell: Cell,
    visited: &mut HashSet<Cell>,
    current: &mut Vec<Cell>,
    paths: &mut Vec<Vec<Cell>>,
) {
    visited.insert(cell);
    current.push(cell);

    if cell == grid.goal() {
        paths.push(current.clone());
    } else {
        for neighbor in grid.neighbors(cell) {
            if !visited.contains(&neighbor) {
                collect_paths(grid, neighbor, visited, current, paths);
            }
        }
    }

    // Un-visit on the way back out, or sibling branches would be pruned
    visited.remove(&cell);
    current.pop();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::generate;
    use crate::solvers::{Solver, solve};

    #[test]
    fn spanning_tree_maze_has_exactly_one_path() {
        // With no extra passages the maze is a tree, so the sole simple path
        // is the BFS-optimal one
        for seed in [0, 7, 42] {
            let grid = generate(6, 6, seed, 0).unwrap();
            let paths = find_all_paths(&grid);
            assert_eq!(paths.len(), 1, "seed {} is not a tree", seed);
            assert_eq!(paths[0], solve(&grid, Solver::UniformCost).path);
        }
    }

    #[test]
    fn open_two_by_two_has_two_paths() {
        let mut grid = Grid::new(2, 2).unwrap();
        for (a, b) in [
            (Cell::new(0, 0), Cell::new(1, 0)),
            (Cell::new(0, 0), Cell::new(0, 1)),
            (Cell::new(1, 0), Cell::new(1, 1)),
            (Cell::new(0, 1), Cell::new(1, 1)),
        ] {
            grid.open_between(a, b).unwrap();
        }
        let paths = find_all_paths(&grid);
        assert_eq!(paths.len(), 2);
        for path in &paths {
            assert_eq!(path.first(), Some(&grid.start()));
            assert_eq!(path.last(), Some(&grid.goal()));
        }
    }

    #[test]
    fn paths_never_repeat_a_cell() {
        let grid = generate(5, 5, 3, 6).unwrap();
        for path in find_all_paths(&grid) {
            let unique: HashSet<Cell> = path.iter().copied().collect();
            assert_eq!(unique.len(), path.len(), "path repeats a cell");
        }
    }

    #[test]
    fn walled_grid_has_no_paths() {
        let grid = Grid::new(3, 3).unwrap();
        assert!(find_all_paths(&grid).is_empty());
    }

    #[test]
    fn single_cell_grid_has_the_trivial_path() {
        let grid = Grid::new(1, 1).unwrap();
        assert_eq!(find_all_paths(&grid), vec![vec![Cell::new(0, 0)]]);
    }
}
