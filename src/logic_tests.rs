#[cfg(test)]
mod tests {
    use crate::core::{Board, Side};
    use crate::logic::{has_win, winner};

    fn drop_all(board: &mut Board, moves: &[(usize, Side)]) {
        for &(column, side) in moves {
            board.play_as(column, side).unwrap();
        }
    }

    #[test]
    fn test_horizontal_win() {
        let mut board = Board::new(7, 6);
        drop_all(
            &mut board,
            &[
                (1, Side::Maximizer),
                (2, Side::Maximizer),
                (4, Side::Maximizer),
            ],
        );
        assert!(!has_win(&board));

        // 真ん中を埋めて4つ並ぶ
        board.play_as(3, Side::Maximizer).unwrap();
        assert!(has_win(&board));
        assert_eq!(winner(&board), Some(Side::Maximizer));
    }

    #[test]
    fn test_vertical_win() {
        let mut board = Board::new(7, 6);
        for _ in 0..3 {
            board.play_as(5, Side::Minimizer).unwrap();
            assert!(!has_win(&board));
        }
        board.play_as(5, Side::Minimizer).unwrap();
        assert_eq!(winner(&board), Some(Side::Minimizer));
    }

    #[test]
    fn test_rising_diagonal_win() {
        let mut board = Board::new(7, 6);
        // x の土台
        drop_all(
            &mut board,
            &[
                (1, Side::Minimizer),
                (2, Side::Minimizer),
                (2, Side::Minimizer),
                (3, Side::Minimizer),
                (3, Side::Minimizer),
                (3, Side::Minimizer),
            ],
        );
        drop_all(
            &mut board,
            &[
                (0, Side::Maximizer),
                (1, Side::Maximizer),
                (2, Side::Maximizer),
            ],
        );
        assert!(!has_win(&board));
        board.play_as(3, Side::Maximizer).unwrap();
        assert!(has_win(&board));
    }

    #[test]
    fn test_falling_diagonal_win() {
        let mut board = Board::new(7, 6);
        drop_all(
            &mut board,
            &[
                (3, Side::Minimizer),
                (3, Side::Minimizer),
                (3, Side::Minimizer),
                (4, Side::Minimizer),
                (4, Side::Minimizer),
                (5, Side::Minimizer),
            ],
        );
        drop_all(
            &mut board,
            &[
                (3, Side::Maximizer),
                (4, Side::Maximizer),
                (6, Side::Maximizer),
            ],
        );
        assert!(!has_win(&board));
        // (5,1) で (3,3)-(4,2)-(5,1)-(6,0) がつながる
        board.play_as(5, Side::Maximizer).unwrap();
        assert!(has_win(&board));
    }

    #[test]
    fn test_win_checked_only_through_last_move() {
        let mut board = Board::new(7, 6);
        drop_all(
            &mut board,
            &[
                (0, Side::Maximizer),
                (1, Side::Maximizer),
                (2, Side::Maximizer),
                (3, Side::Maximizer),
            ],
        );
        assert!(has_win(&board));

        // 直前の手を通らない並びは見ない
        board.play_as(6, Side::Maximizer).unwrap();
        assert!(!has_win(&board));
        board.play_as(6, Side::Minimizer).unwrap();
        assert!(!has_win(&board));
    }

    #[test]
    fn test_mixed_line_is_not_a_win() {
        let mut board = Board::new(7, 6);
        drop_all(
            &mut board,
            &[
                (0, Side::Maximizer),
                (1, Side::Maximizer),
                (2, Side::Minimizer),
                (3, Side::Maximizer),
            ],
        );
        assert!(!has_win(&board));
    }

    #[test]
    fn test_empty_board_has_no_winner() {
        let board = Board::default();
        assert!(!has_win(&board));
        assert_eq!(winner(&board), None);
    }

    #[test]
    fn test_five_in_a_row_counts() {
        let mut board = Board::new(7, 6);
        drop_all(
            &mut board,
            &[
                (0, Side::Minimizer),
                (1, Side::Minimizer),
                (3, Side::Minimizer),
                (4, Side::Minimizer),
            ],
        );
        assert!(!has_win(&board));
        board.play_as(2, Side::Minimizer).unwrap();
        assert!(has_win(&board));
    }
}
