use crate::core::{Board, Side};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// 棋譜 (書き出し専用)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    pub columns: usize,
    pub rows: usize,
    pub opening: Side,
    pub moves: Vec<usize>,
    pub winner: Option<Side>,
}

impl GameRecord {
    pub fn from_board(board: &Board, winner: Option<Side>) -> Self {
        Self {
            columns: board.columns,
            rows: board.rows,
            opening: board.opening(),
            moves: board.history().iter().map(|p| p.at.column).collect(),
            winner,
        }
    }

    /// Write the record as JSON under `dir`, named after the local time.
    pub fn save(&self, dir: impl AsRef<Path>) -> anyhow::Result<PathBuf> {
        std::fs::create_dir_all(&dir)?;
        let filename = dir.as_ref().join(format!(
            "game_{}.json",
            chrono::Local::now().format("%Y%m%d_%H%M%S_%3f")
        ));
        let file = std::fs::File::create(&filename)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(filename)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_is_written_as_json() {
        let mut board = Board::new(7, 6);
        for column in [3, 3, 4] {
            board.play(column).unwrap();
        }
        let record = GameRecord::from_board(&board, None);
        assert_eq!(record.moves, vec![3, 3, 4]);

        let dir = std::env::temp_dir().join(format!("four_farm_records_{}", std::process::id()));
        let path = record.save(&dir).unwrap();
        let written: GameRecord =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        let _ = std::fs::remove_dir_all(&dir);

        assert_eq!(written, record);
        assert_eq!(written.opening, Side::Maximizer);
    }
}
