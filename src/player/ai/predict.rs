//! Depth-bounded exhaustive scorer.
//!
//! The score of a node is the mean of its children's scores, except that a
//! child won by the side to move ends the node immediately, and a node whose
//! children are all forced results for one side takes that result.

use crate::core::Board;
use crate::error::BoardError;
use crate::logic::has_win;

pub const DEFAULT_DEPTH: usize = 4;

/// Score `board` from the Maximizer's point of view, in [-1, 1].
///
/// `forced_prefix` moves are played first, alternating from the side to move.
/// An illegal prefix move is returned as an error.
pub fn predict(
    board: &Board,
    depth: usize,
    forced_prefix: Option<&[usize]>,
) -> Result<f64, BoardError> {
    // 作業用のコピーは1回だけ。探索中は play/undo で戻す
    let mut work = board.clone();

    if let Some(prefix) = forced_prefix {
        for &column in prefix {
            let placement = work.play(column)?;
            if has_win(&work) {
                return Ok(placement.side.win_score());
            }
        }
    }

    Ok(search(&mut work, depth))
}

fn search(board: &mut Board, depth: usize) -> f64 {
    if has_win(board) {
        return board.last_mover().win_score();
    }
    if depth == 0 {
        return 0.0;
    }

    let mover = board.side_to_move();
    let cutoff = mover.win_score();

    let mut total = 0.0;
    let mut children = 0usize;
    let mut forced_max = 0usize;
    let mut forced_min = 0usize;

    for column in 0..board.columns {
        if board.play(column).is_err() {
            continue; // 満杯の列
        }
        let score = search(board, depth - 1);
        board.undo();

        if score == cutoff {
            return score;
        }

        children += 1;
        total += score;
        if score == 1.0 {
            forced_max += 1;
        } else if score == -1.0 {
            forced_min += 1;
        }
    }

    if children == 0 {
        // 盤面が埋まった: 引き分け
        return 0.0;
    }
    if forced_max == children {
        return 1.0;
    }
    if forced_min == children {
        return -1.0;
    }
    total / children as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Side;

    /// Maximizer to move with three in a row on the bottom rank (columns 0..3).
    fn one_move_from_win() -> Board {
        let mut board = Board::new(7, 6);
        for column in 0..3 {
            board.play(column).unwrap(); // o
            board.play(column).unwrap(); // x on top
        }
        board
    }

    #[test]
    fn test_depth_zero_is_neutral() {
        let mut board = Board::default();
        board.play(3).unwrap();
        assert_eq!(predict(&board, 0, None).unwrap(), 0.0);
    }

    #[test]
    fn test_depth_zero_reports_existing_win() {
        let mut board = Board::new(7, 6);
        for _ in 0..4 {
            board.play_as(2, Side::Minimizer).unwrap();
        }
        assert_eq!(predict(&board, 0, None).unwrap(), -1.0);

        let mut board = Board::new(7, 6);
        for _ in 0..4 {
            board.play_as(2, Side::Maximizer).unwrap();
        }
        assert_eq!(predict(&board, 0, None).unwrap(), 1.0);
    }

    #[test]
    fn test_winning_move_prefix_scores_one() {
        let board = one_move_from_win();
        assert_eq!(board.side_to_move(), Side::Maximizer);
        assert_eq!(predict(&board, 1, Some(&[3])).unwrap(), 1.0);
    }

    #[test]
    fn test_immediate_win_cuts_off_search() {
        let board = one_move_from_win();
        assert_eq!(predict(&board, 1, None).unwrap(), 1.0);
        assert_eq!(predict(&board, 3, None).unwrap(), 1.0);
    }

    #[test]
    fn test_missed_win_lets_opponent_block_and_is_not_forced() {
        let board = one_move_from_win();
        // o plays elsewhere, x blocks at 3 on its reply
        let score = predict(&board, 0, Some(&[6, 3])).unwrap();
        assert_eq!(score, 0.0);
    }

    #[test]
    fn test_forced_loss_for_minimizer_to_move() {
        // x to move; o threatens on both ends of an open three -> every reply loses.
        let mut board = Board::new(7, 6);
        board.play_as(1, Side::Maximizer).unwrap();
        board.play_as(2, Side::Maximizer).unwrap();
        board.play_as(3, Side::Maximizer).unwrap();
        assert_eq!(board.side_to_move(), Side::Minimizer);

        assert_eq!(predict(&board, 2, None).unwrap(), 1.0);
    }

    #[test]
    fn test_illegal_prefix_is_an_error() {
        let mut board = Board::new(3, 1);
        board.play(0).unwrap();
        assert_eq!(
            predict(&board, 2, Some(&[0, 1])),
            Err(BoardError::ColumnFull { column: 0 })
        );
        assert_eq!(
            predict(&board, 2, Some(&[9])),
            Err(BoardError::ColumnOutOfRange {
                column: 9,
                columns: 3
            })
        );
    }

    #[test]
    fn test_label_swap_negates_score() {
        let mut board = Board::new(5, 5);
        for column in [2, 2, 1, 3, 0] {
            board.play(column).unwrap();
        }
        let swapped = board.with_sides_swapped();

        for prefix in [[0usize, 1usize], [3, 3], [4, 0]] {
            let a = predict(&board, 2, Some(&prefix)).unwrap();
            let b = predict(&swapped, 2, Some(&prefix)).unwrap();
            assert_eq!(a, -b, "prefix {:?}", prefix);
        }
    }

    #[test]
    fn test_mixed_forced_and_neutral_children_average() {
        // 1行の盤: 勝ちは横のみ。o が [0,1,2] を持ち、列3が最後の勝ち筋
        // Columns: 0..=2 o, 3 empty, 4 empty, 5 x. x to move.
        let mut board = Board::new(6, 1);
        board.play_as(0, Side::Maximizer).unwrap();
        board.play_as(1, Side::Maximizer).unwrap();
        board.play_as(5, Side::Minimizer).unwrap();
        board.play_as(2, Side::Maximizer).unwrap();
        assert_eq!(board.side_to_move(), Side::Minimizer);

        // x at 3 blocks: o's only reply is 4 -> full board, neutral.
        // x at 4: o wins at 3. That child is +1, not the x cutoff value.
        // Mean over {0 (block), +1} = 0.5
        assert_eq!(predict(&board, 2, None).unwrap(), 0.5);
    }

    #[test]
    fn test_full_board_is_neutral() {
        let mut board = Board::new(2, 1);
        board.play(0).unwrap();
        board.play(1).unwrap();
        assert!(board.is_full());
        assert_eq!(predict(&board, 3, None).unwrap(), 0.0);
    }
}
