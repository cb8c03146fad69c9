use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::error::MazeError;
use crate::maze::{Cell, Direction, Grid};

/// Generates a `cols x rows` maze with a randomized depth-first spanning-tree
/// carve, then knocks down `extra_passages` additional random walls.
///
/// The carve visits every cell exactly once, so the resulting grid is
/// connected by construction: a path from the top-left to the bottom-right
/// corner always exists, with no verify-and-retry loop. Extra passages only
/// ever add connectivity (turning the tree into a graph with loops), never
/// remove it.
///
/// The same `(cols, rows, seed, extra_passages)` always produces the same
/// wall layout.
pub fn generate(
    cols: u16,
    rows: u16,
    seed: u64,
    extra_passages: usize,
) -> Result<Grid, MazeError> {
    let mut grid = Grid::new(cols, rows)?;
    let mut rng = StdRng::seed_from_u64(seed);

    carve_spanning_tree(&mut grid, &mut rng);
    add_extra_passages(&mut grid, &mut rng, extra_passages);

    tracing::debug!(
        "[generate] carved {}x{} maze (seed {}, {} extra passages)",
        cols,
        rows,
        seed,
        extra_passages
    );
    Ok(grid)
}

/// Iterative randomized DFS starting at the top-left corner. An explicit
/// stack keeps the carve depth off the call stack, so large grids cannot
/// overflow it.
fn carve_spanning_tree(grid: &mut Grid, rng: &mut StdRng) {
    let cols = grid.cols() as usize;
    let mut visited = vec![false; grid.cell_count()];
    let index = |cell: Cell| cell.y as usize * cols + cell.x as usize;

    let start = grid.start();
    visited[index(start)] = true;
    // The stack keeps only visited cells
    let mut stack = vec![start];

    while let Some(cell) = stack.pop() {
        let unvisited: Vec<Cell> = Direction::ALL
            .into_iter()
            .filter_map(|dir| grid.adjacent(cell, dir))
            .filter(|&c| !visited[index(c)])
            .collect();

        if !unvisited.is_empty() {
            let neighbor = unvisited[rng.random_range(0..unvisited.len())];
            grid.open_between(cell, neighbor)
                .expect("carve only touches adjacent in-bounds cells");
            visited[index(neighbor)] = true;
            // Put the cell back first so another of its neighbors can be
            // tried later, then carve onward from the neighbor
            stack.push(cell);
            stack.push(neighbor);
        }
    }
}

/// Second pass: pick a random cell and direction `extra_passages` times and
/// open the wall if a neighbor exists there. Removing an already-open wall
/// is a no-op, so the count is an upper bound on new passages.
fn add_extra_passages(grid: &mut Grid, rng: &mut StdRng, extra_passages: usize) {
    for _ in 0..extra_passages {
        let cell = Cell::new(
            rng.random_range(0..grid.cols()),
            rng.random_range(0..grid.rows()),
        );
        let dir = Direction::ALL[rng.random_range(0..Direction::ALL.len())];
        if let Some(neighbor) = grid.adjacent(cell, dir) {
            grid.open_between(cell, neighbor)
                .expect("adjacent() only yields in-bounds neighbors");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{HashSet, VecDeque};

    /// Ground-truth reachability check, independent of the solver modules.
    fn reachable_cells(grid: &Grid) -> HashSet<Cell> {
        let mut seen = HashSet::from([grid.start()]);
        let mut queue = VecDeque::from([grid.start()]);
        while let Some(cell) = queue.pop_front() {
            for next in grid.neighbors(cell) {
                if seen.insert(next) {
                    queue.push_back(next);
                }
            }
        }
        seen
    }

    #[test]
    fn carve_connects_every_cell() {
        for (cols, rows) in [(1, 1), (1, 8), (8, 1), (5, 5), (13, 7)] {
            for seed in [0, 1, 42, u64::MAX] {
                let grid = generate(cols, rows, seed, 0).unwrap();
                let reachable = reachable_cells(&grid);
                assert_eq!(
                    reachable.len(),
                    grid.cell_count(),
                    "{}x{} seed {} left cells unreachable",
                    cols,
                    rows,
                    seed
                );
                assert!(reachable.contains(&grid.goal()));
            }
        }
    }

    #[test]
    fn generation_is_deterministic() {
        let a = generate(3, 3, 42, 0).unwrap();
        let b = generate(3, 3, 42, 0).unwrap();
        assert_eq!(a, b);
        // The seed must actually steer the carve: at least one nearby seed
        // has to produce a different layout
        assert!(
            (43..48).any(|seed| generate(3, 3, seed, 0).unwrap() != a),
            "seed does not influence the wall layout"
        );
    }

    #[test]
    fn extra_passages_keep_connectivity() {
        let grid = generate(9, 9, 7, 20).unwrap();
        assert_eq!(reachable_cells(&grid).len(), grid.cell_count());
    }

    #[test]
    fn extra_passages_only_remove_walls() {
        let tree = generate(9, 9, 7, 0).unwrap();
        let looped = generate(9, 9, 7, 20).unwrap();
        for cell in tree.cells() {
            for dir in Direction::ALL {
                if !tree.walls(cell).is_solid(dir) {
                    assert!(
                        !looped.walls(cell).is_solid(dir),
                        "extra-passage pass re-added a wall at {}",
                        cell
                    );
                }
            }
        }
    }

    #[test]
    fn single_cell_grid_generates() {
        let grid = generate(1, 1, 0, 5).unwrap();
        assert_eq!(grid.start(), grid.goal());
        assert_eq!(grid.walls(grid.start()), crate::maze::Walls::SOLID);
    }

    #[test]
    fn rejects_zero_dimensions() {
        assert!(generate(0, 3, 0, 0).is_err());
    }
}
