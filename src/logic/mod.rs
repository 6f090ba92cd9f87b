use crate::core::{Board, Position, Side};

/// 何個並べば勝ちか
pub const LINE_LENGTH: usize = 4;

/// (dx, dy): 横, 縦, 右上がり斜め, 左上がり斜め
const DIRECTIONS: [(isize, isize); 4] = [(1, 0), (0, 1), (1, 1), (1, -1)];

/// 直前の手で勝ちが成立したか判定
///
/// A win can only be created by the token just dropped, so only the four
/// lines through the last move are scanned.
pub fn has_win(board: &Board) -> bool {
    match board.last_move() {
        Some(placement) => has_line_through(board, placement.at, placement.side),
        None => false,
    }
}

/// Whether `side` owns `LINE_LENGTH` consecutive cells on some line through `at`.
pub fn has_line_through(board: &Board, at: Position, side: Side) -> bool {
    DIRECTIONS
        .iter()
        .any(|&(dx, dy)| run_length(board, at, side, dx, dy) >= LINE_LENGTH)
}

/// Length of the run of `side` tokens through `at` along (dx, dy), counting both ways.
fn run_length(board: &Board, at: Position, side: Side, dx: isize, dy: isize) -> usize {
    if board.cell(at.column, at.row) != Some(side) {
        return 0;
    }
    1 + count_direction(board, at, side, dx, dy) + count_direction(board, at, side, -dx, -dy)
}

fn count_direction(board: &Board, at: Position, side: Side, dx: isize, dy: isize) -> usize {
    let mut count = 0;
    let mut x = at.column as isize + dx;
    let mut y = at.row as isize + dy;
    // 盤外か別の駒で止まる。勝ち判定には LINE_LENGTH - 1 個で十分
    while count < LINE_LENGTH - 1 && x >= 0 && y >= 0 {
        if board.cell(x as usize, y as usize) != Some(side) {
            break;
        }
        count += 1;
        x += dx;
        y += dy;
    }
    count
}

/// Winner of the position, judged from the last move only.
pub fn winner(board: &Board) -> Option<Side> {
    if has_win(board) {
        Some(board.last_mover())
    } else {
        None
    }
}
