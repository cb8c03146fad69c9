use thiserror::Error;

/// Errors produced by the maze core.
///
/// The absence of a route is deliberately *not* an error: searches report it
/// as an empty path, since an unreachable goal is an expected outcome rather
/// than a failure.
#[derive(Debug, Error)]
pub enum MazeError {
    /// A caller passed something structurally invalid: zero grid dimensions,
    /// non-adjacent cells to a wall query, or an empty reference path.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// A persisted maze failed structural or invariant validation on decode.
    #[error("corrupt maze data: {0}")]
    CorruptMazeData(String),
}
