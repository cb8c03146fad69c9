//! Maze generation, graph search, and path scoring.
//!
//! The core pipeline: [`generators::generate`] carves a connected [`maze::Grid`],
//! the solvers search it ([`solvers::solve`] one-shot, [`solvers::StepwiseSearch`]
//! step-by-step for visualization, [`solvers::find_all_paths`] exhaustively),
//! and [`score::score`] rates a user-walked path against the optimal one.
//! [`storage`] round-trips grids through a flat persisted encoding.
//!
//! Everything is single-threaded and synchronous; a grid behind a shared
//! reference is read-only, so any number of searches may run over it.

pub mod error;
pub mod generators;
pub mod maze;
pub mod score;
pub mod solvers;
pub mod storage;

pub use error::MazeError;
pub use generators::generate;
pub use maze::{Cell, Direction, Grid, Walls};
pub use score::score;
pub use solvers::{Frontier, Solution, Solver, Step, StepwiseSearch, find_all_paths, solve};
