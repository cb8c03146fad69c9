use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap, HashSet};

use super::{OpenEntry, reconstruct_path};
use crate::maze::{Cell, Grid};

/// Open/closed frontier state published after each step, for display only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frontier {
    /// Cells discovered but not yet finalized.
    pub open: HashSet<Cell>,
    /// Cells finalized with known optimal cost.
    pub closed: HashSet<Cell>,
}

/// Result of a single [`StepwiseSearch::step`] call.
///
/// `InProgress` is the only non-terminal state; once `Found` or `Exhausted`
/// is returned, every further `step` call returns the same result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    InProgress(Frontier),
    Found(Vec<Cell>),
    Exhausted,
}

/// A* decomposed into a resumable state machine.
///
/// The caller drives the search one expansion at a time at whatever cadence
/// it likes, rendering the frontier snapshots in between. Run to completion
/// it produces exactly the path the one-shot A* solver would. Dropping the
/// state is the only cancellation needed; no external resources are held.
/// `step` must not be called concurrently from two owners, which the `&mut`
/// receiver already enforces.
pub struct StepwiseSearch<'g> {
    grid: &'g Grid,
    open: BinaryHeap<Reverse<OpenEntry>>,
    open_set: HashSet<Cell>,
    closed: HashSet<Cell>,
    came_from: HashMap<Cell, Cell>,
    g_score: HashMap<Cell, u64>,
    seq: u64,
    /// Terminal result, set once the search finds the goal or drains the
    /// frontier.
    outcome: Option<Step>,
}

impl<'g> StepwiseSearch<'g> {
    pub fn new(grid: &'g Grid) -> Self {
        let start = grid.start();
        let mut open = BinaryHeap::new();
        open.push(Reverse(OpenEntry {
            f: start.manhattan(grid.goal()),
            seq: 0,
            cell: start,
        }));
        StepwiseSearch {
            grid,
            open,
            open_set: HashSet::from([start]),
            closed: HashSet::new(),
            came_from: HashMap::new(),
            g_score: HashMap::from([(start, 0)]),
            seq: 0,
            outcome: None,
        }
    }

    /// Advances the search by one cell expansion.
    pub fn step(&mut self) -> Step {
        if let Some(outcome) = &self.outcome {
            return outcome.clone();
        }

        // Pop the lowest-f entry, discarding stale ones for cells that were
        // finalized through a later, cheaper insertion
        let cell = loop {
            match self.open.pop() {
                None => {
                    tracing::debug!("[stepwise] frontier drained without reaching the goal");
                    self.outcome = Some(Step::Exhausted);
                    return Step::Exhausted;
                }
                Some(Reverse(entry)) if self.closed.contains(&entry.cell) => continue,
                Some(Reverse(entry)) => break entry.cell,
            }
        };
        self.open_set.remove(&cell);

        if cell == self.grid.goal() {
            let path = reconstruct_path(&self.came_from, self.grid.start(), cell);
            tracing::debug!("[stepwise] goal reached, path length {}", path.len());
            let found = Step::Found(path);
            self.outcome = Some(found.clone());
            return found;
        }

        self.closed.insert(cell);
        let tentative = self.g_score[&cell] + 1;
        for neighbor in self.grid.neighbors(cell) {
            if self.closed.contains(&neighbor) {
                continue;
            }
            if self.g_score.get(&neighbor).is_none_or(|&g| tentative < g) {
                self.g_score.insert(neighbor, tentative);
                self.came_from.insert(neighbor, cell);
                self.seq += 1;
                self.open.push(Reverse(OpenEntry {
                    f: tentative + neighbor.manhattan(self.grid.goal()),
                    seq: self.seq,
                    cell: neighbor,
                }));
                self.open_set.insert(neighbor);
            }
        }

        Step::InProgress(self.frontier())
    }

    /// Current frontier snapshot, also available between steps.
    pub fn frontier(&self) -> Frontier {
        Frontier {
            open: self.open_set.clone(),
            closed: self.closed.clone(),
        }
    }

    /// Whether the search has reached `Found` or `Exhausted`.
    pub fn is_finished(&self) -> bool {
        self.outcome.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::generate;
    use crate::solvers::{Solver, solve};

    fn run_to_completion(search: &mut StepwiseSearch<'_>) -> Step {
        loop {
            match search.step() {
                Step::InProgress(_) => continue,
                terminal => return terminal,
            }
        }
    }

    #[test]
    fn stepwise_matches_one_shot_astar() {
        for seed in [0, 5, 42, 99] {
            let grid = generate(11, 8, seed, 4).unwrap();
            let one_shot = solve(&grid, Solver::AStar);
            let mut search = StepwiseSearch::new(&grid);
            match run_to_completion(&mut search) {
                Step::Found(path) => assert_eq!(path, one_shot.path, "seed {} diverged", seed),
                other => panic!("expected Found, got {:?}", other),
            }
        }
    }

    #[test]
    fn terminal_state_is_sticky() {
        let grid = generate(5, 5, 1, 0).unwrap();
        let mut search = StepwiseSearch::new(&grid);
        let first = run_to_completion(&mut search);
        assert!(matches!(first, Step::Found(_)));
        assert!(search.is_finished());
        // Further steps are no-ops returning the same result
        assert_eq!(search.step(), first);
        assert_eq!(search.step(), first);
    }

    #[test]
    fn walled_grid_exhausts() {
        let grid = Grid::new(3, 3).unwrap();
        let mut search = StepwiseSearch::new(&grid);
        // Only the start cell can ever be expanded
        assert!(matches!(search.step(), Step::InProgress(_)));
        assert_eq!(search.step(), Step::Exhausted);
        assert_eq!(search.step(), Step::Exhausted);
    }

    #[test]
    fn snapshots_partition_discovered_cells() {
        let grid = generate(9, 9, 13, 5).unwrap();
        let mut search = StepwiseSearch::new(&grid);
        while let Step::InProgress(frontier) = search.step() {
            assert!(
                frontier.open.is_disjoint(&frontier.closed),
                "a cell must not be open and closed at once"
            );
        }
    }

    #[test]
    fn single_cell_grid_finds_immediately() {
        let grid = generate(1, 1, 0, 0).unwrap();
        let mut search = StepwiseSearch::new(&grid);
        assert_eq!(search.step(), Step::Found(vec![Cell::new(0, 0)]));
    }
}
