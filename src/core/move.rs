use super::types::{Position, Side};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 実際に盤面に置かれた一手
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub side: Side,
    pub at: Position,
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} -> column {}", self.side, self.at.column + 1)
    }
}

/// Two-ply forced continuation: the searching side plays `first`, the
/// opponent answers with `second`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskKey {
    pub first: usize,
    pub second: usize,
}

impl TaskKey {
    pub fn new(first: usize, second: usize) -> Self {
        TaskKey { first, second }
    }

    pub fn prefix(&self) -> [usize; 2] {
        [self.first, self.second]
    }
}

impl fmt::Display for TaskKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[{}, {}]", self.first, self.second)
    }
}
