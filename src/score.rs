use crate::error::MazeError;
use crate::maze::Cell;

/// Scores a walked path against the reference optimal path, on a 0..=10
/// scale.
///
/// Only the longest common *prefix* counts: comparison stops at the first
/// position where the two paths disagree, so a walker who strays and later
/// rejoins the optimal route gets no credit for the coincidental overlap.
/// The prefix length is divided by the reference length and scaled to 10,
/// rounding to nearest.
///
/// Fails with `InvalidArgument` when the reference path is empty.
pub fn score(candidate: &[Cell], reference: &[Cell]) -> Result<u8, MazeError> {
    if reference.is_empty() {
        return Err(MazeError::InvalidArgument(
            "reference path must not be empty".into(),
        ));
    }

    let matched = candidate
        .iter()
        .zip(reference)
        .take_while(|(walked, optimal)| walked == optimal)
        .count();

    let similarity = matched as f64 / reference.len() as f64;
    Ok((similarity * 10.0).round() as u8)
}
