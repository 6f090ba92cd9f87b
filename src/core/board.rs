use super::r#move::Placement;
use super::types::{Position, Side};
use crate::error::BoardError;
use serde::{Deserialize, Serialize};

pub const DEFAULT_COLUMNS: usize = 7;
pub const DEFAULT_ROWS: usize = 6;

/// 盤面
///
/// Cells are stored column-major. Inside a column the occupied cells always
/// form a contiguous run starting at row 0, so `heights[c]` is both the number
/// of tokens in column `c` and the row the next token lands on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BoardRepr")]
pub struct Board {
    pub columns: usize,
    pub rows: usize,
    cells: Vec<Option<Side>>,
    heights: Vec<usize>,
    /// 着手履歴 (末尾が直前の手)
    history: Vec<Placement>,
    /// 空の盤面で最初に指す側
    opening: Side,
}

/// Wire form of [`Board`], checked before it becomes one.
#[derive(Deserialize)]
struct BoardRepr {
    columns: usize,
    rows: usize,
    cells: Vec<Option<Side>>,
    heights: Vec<usize>,
    history: Vec<Placement>,
    opening: Side,
}

impl TryFrom<BoardRepr> for Board {
    type Error = BoardError;

    fn try_from(repr: BoardRepr) -> Result<Self, Self::Error> {
        let inconsistent = |reason| Err(BoardError::Inconsistent { reason });

        if repr.columns.checked_mul(repr.rows) != Some(repr.cells.len()) {
            return inconsistent("cell count does not match columns * rows");
        }
        if repr.heights.len() != repr.columns {
            return inconsistent("one height per column expected");
        }
        for (column, &height) in repr.heights.iter().enumerate() {
            if height > repr.rows {
                return inconsistent("column height exceeds rows");
            }
            let cells = &repr.cells[column * repr.rows..(column + 1) * repr.rows];
            // 下から詰まっていること
            if cells.iter().enumerate().any(|(row, c)| c.is_some() != (row < height)) {
                return inconsistent("column is not filled from the bottom");
            }
        }
        if repr.history.len() != repr.heights.iter().sum::<usize>() {
            return inconsistent("history does not match the tokens on the board");
        }
        for p in &repr.history {
            let Position { column, row } = p.at;
            if column >= repr.columns
                || row >= repr.rows
                || repr.cells[column * repr.rows + row] != Some(p.side)
            {
                return inconsistent("history placement does not match its cell");
            }
        }

        Ok(Board {
            columns: repr.columns,
            rows: repr.rows,
            cells: repr.cells,
            heights: repr.heights,
            history: repr.history,
            opening: repr.opening,
        })
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::new(DEFAULT_COLUMNS, DEFAULT_ROWS)
    }
}

impl Board {
    pub fn new(columns: usize, rows: usize) -> Self {
        Board {
            columns,
            rows,
            cells: vec![None; columns * rows],
            heights: vec![0; columns],
            history: Vec::new(),
            opening: Side::Maximizer,
        }
    }

    pub fn with_opening(mut self, side: Side) -> Self {
        self.opening = side;
        self
    }

    pub fn opening(&self) -> Side {
        self.opening
    }

    pub fn cell(&self, column: usize, row: usize) -> Option<Side> {
        if column >= self.columns || row >= self.rows {
            return None;
        }
        self.cells[column * self.rows + row]
    }

    pub fn height(&self, column: usize) -> usize {
        self.heights.get(column).copied().unwrap_or(self.rows)
    }

    pub fn last_move(&self) -> Option<&Placement> {
        self.history.last()
    }

    pub fn history(&self) -> &[Placement] {
        &self.history
    }

    pub fn move_count(&self) -> usize {
        self.history.len()
    }

    /// Side that made the most recent move. On an empty board this is the
    /// side that does not open, so that `side_to_move` is the opener.
    pub fn last_mover(&self) -> Side {
        match self.history.last() {
            Some(p) => p.side,
            None => self.opening.opponent(),
        }
    }

    pub fn side_to_move(&self) -> Side {
        self.last_mover().opponent()
    }

    pub fn is_column_full(&self, column: usize) -> bool {
        self.height(column) >= self.rows
    }

    pub fn is_full(&self) -> bool {
        self.history.len() >= self.columns * self.rows
    }

    pub fn legal_columns(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.columns).filter(move |&c| !self.is_column_full(c))
    }

    pub fn validate(&self, column: usize) -> Result<(), BoardError> {
        if column >= self.columns {
            return Err(BoardError::ColumnOutOfRange {
                column,
                columns: self.columns,
            });
        }
        if self.is_column_full(column) {
            return Err(BoardError::ColumnFull { column });
        }
        Ok(())
    }

    /// Drop a token for the side to move.
    pub fn play(&mut self, column: usize) -> Result<Placement, BoardError> {
        let side = self.side_to_move();
        self.play_as(column, side)
    }

    pub fn play_as(&mut self, column: usize, side: Side) -> Result<Placement, BoardError> {
        self.validate(column)?;
        let row = self.heights[column];
        self.cells[column * self.rows + row] = Some(side);
        self.heights[column] += 1;
        let placement = Placement {
            side,
            at: Position::new(column, row),
        };
        self.history.push(placement);
        Ok(placement)
    }

    /// Take back the most recent placement.
    pub fn undo(&mut self) -> Option<Placement> {
        let placement = self.history.pop()?;
        let Position { column, row } = placement.at;
        self.cells[column * self.rows + row] = None;
        self.heights[column] -= 1;
        Some(placement)
    }

    /// Same position with every token (and the opener) handed to the other side.
    pub fn with_sides_swapped(&self) -> Board {
        Board {
            columns: self.columns,
            rows: self.rows,
            cells: self.cells.iter().map(|c| c.map(Side::opponent)).collect(),
            heights: self.heights.clone(),
            history: self
                .history
                .iter()
                .map(|p| Placement {
                    side: p.side.opponent(),
                    at: p.at,
                })
                .collect(),
            opening: self.opening.opponent(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_play_stacks_from_bottom() {
        let mut board = Board::new(7, 6);
        let a = board.play(3).unwrap();
        let b = board.play(3).unwrap();

        assert_eq!(a.at, Position::new(3, 0));
        assert_eq!(a.side, Side::Maximizer);
        assert_eq!(b.at, Position::new(3, 1));
        assert_eq!(b.side, Side::Minimizer);
        assert_eq!(board.height(3), 2);
        assert_eq!(board.last_move(), Some(&b));
    }

    #[test]
    fn test_full_column_is_rejected() {
        let mut board = Board::new(2, 2);
        board.play(0).unwrap();
        board.play(0).unwrap();
        let before = board.clone();

        assert_eq!(board.play(0), Err(BoardError::ColumnFull { column: 0 }));
        assert_eq!(board, before);
        assert_eq!(
            board.play(5),
            Err(BoardError::ColumnOutOfRange {
                column: 5,
                columns: 2
            })
        );
    }

    #[test]
    fn test_undo_restores_position() {
        let mut board = Board::default();
        board.play(1).unwrap();
        let snapshot = board.clone();
        board.play(4).unwrap();
        board.undo();

        assert_eq!(board, snapshot);
        assert_eq!(board.side_to_move(), Side::Minimizer);
    }

    #[test]
    fn test_opening_side() {
        let board = Board::default().with_opening(Side::Minimizer);
        assert_eq!(board.side_to_move(), Side::Minimizer);
        assert_eq!(board.last_mover(), Side::Maximizer);
    }

    #[test]
    fn test_decoded_board_is_checked() {
        let mut board = Board::new(4, 3);
        board.play(1).unwrap();
        board.play(1).unwrap();
        let json = serde_json::to_value(&board).unwrap();

        let decoded: Board = serde_json::from_value(json.clone()).unwrap();
        assert_eq!(decoded, board);

        let mut short = json.clone();
        short["cells"].as_array_mut().unwrap().truncate(5);
        assert!(serde_json::from_value::<Board>(short).is_err());

        let mut tall = json.clone();
        tall["heights"][2] = serde_json::json!(9);
        assert!(serde_json::from_value::<Board>(tall).is_err());

        let mut missing = json;
        missing["heights"].as_array_mut().unwrap().pop();
        assert!(serde_json::from_value::<Board>(missing).is_err());
    }

    #[test]
    fn test_swapped_board() {
        let mut board = Board::default();
        board.play(0).unwrap();
        board.play(1).unwrap();
        let swapped = board.with_sides_swapped();

        assert_eq!(swapped.cell(0, 0), Some(Side::Minimizer));
        assert_eq!(swapped.cell(1, 0), Some(Side::Maximizer));
        assert_eq!(swapped.side_to_move(), Side::Minimizer);
    }
}
