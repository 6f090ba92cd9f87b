use serde::{Deserialize, Serialize};
use std::fmt;

/// 手番 (エンジン = Maximizer, 相手 = Minimizer)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Side {
    #[default]
    Maximizer,
    Minimizer,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Maximizer => Side::Minimizer,
            Side::Minimizer => Side::Maximizer,
        }
    }

    /// Score of a position won by this side.
    pub fn win_score(self) -> f64 {
        match self {
            Side::Maximizer => 1.0,
            Side::Minimizer => -1.0,
        }
    }

    pub fn token(self) -> char {
        match self {
            Side::Maximizer => 'o',
            Side::Minimizer => 'x',
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Side::Maximizer => write!(f, "CPU"),
            Side::Minimizer => write!(f, "Player"),
        }
    }
}

/// 盤面座標 (0-indexed, row 0 = 最下段)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub column: usize,
    pub row: usize,
}

impl Position {
    pub fn new(column: usize, row: usize) -> Self {
        Position { column, row }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.column, self.row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_side_is_the_default() {
        assert_eq!(Side::default(), Side::Maximizer);
        assert_eq!(Side::default().opponent().win_score(), -1.0);
    }
}
