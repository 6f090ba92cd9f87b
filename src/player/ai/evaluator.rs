//! Evaluator trait for task evaluation
//!
//! Workers only see this trait, so the farm can be driven by something other
//! than the full search (tests use it to stall or fail on purpose).

use super::predict::predict;
use crate::core::{Board, TaskKey};
use crate::error::BoardError;

/// Trait for scoring one task against a round's board
pub trait Evaluator: Send + Sync {
    /// Score of playing `key` from `board`, from the Maximizer's perspective
    ///
    /// Returns:
    ///   - 1.0: forced win for the Maximizer
    ///   - -1.0: forced win for the Minimizer
    ///   - anything in between: mean outcome over the explored subtree
    fn evaluate(&self, board: &Board, key: TaskKey) -> Result<f64, BoardError>;

    /// Get evaluator name for debugging
    fn name(&self) -> &str;
}

/// Forced two-ply prefix followed by a `depth`-ply exhaustive search.
#[derive(Debug, Clone, Copy)]
pub struct DepthSearch {
    pub depth: usize,
}

impl DepthSearch {
    pub fn new(depth: usize) -> Self {
        Self { depth }
    }
}

impl Evaluator for DepthSearch {
    fn evaluate(&self, board: &Board, key: TaskKey) -> Result<f64, BoardError> {
        predict(board, self.depth, Some(&key.prefix()))
    }

    fn name(&self) -> &str {
        "depth-search"
    }
}
