use crate::core::{Board, Side};
use crossterm::{cursor, execute, style::Stylize, terminal};
use std::io::{self, stdout};

#[derive(Default)]
pub struct DisplayState {
    pub status_msg: Option<String>,
    /// 画面をクリアしてから描画する
    pub clear: bool,
}

pub fn render_board(board: &Board, state: &DisplayState) -> io::Result<()> {
    if state.clear {
        execute!(
            stdout(),
            terminal::Clear(terminal::ClearType::All),
            cursor::MoveTo(0, 0)
        )?;
    }

    print!("=== Four in a Row ===\r\n");
    if let Some(msg) = &state.status_msg {
        print!("{}\r\n", msg.clone().bold().yellow());
    } else {
        print!("\r\n");
    }
    print!("\r\n");

    let last = board.last_move().map(|p| p.at);
    let top = (0..board.columns)
        .map(|c| board.height(c))
        .max()
        .unwrap_or(0);

    // 上の段から
    for row in (0..top).rev() {
        print!("|");
        for column in 0..board.columns {
            let text = match board.cell(column, row) {
                Some(side) => side.token().to_string(),
                None => " ".to_string(),
            };
            let is_last = last.map(|p| p.column == column && p.row == row).unwrap_or(false);
            match board.cell(column, row) {
                _ if is_last => print!("{}", text.red().bold()),
                Some(Side::Maximizer) => print!("{}", text.magenta()),
                Some(Side::Minimizer) => print!("{}", text.cyan()),
                None => print!("{}", text),
            }
            print!("|");
        }
        print!("\r\n");
    }

    print!("+{}\r\n", "-+".repeat(board.columns));
    print!(" ");
    for column in 0..board.columns {
        print!("{} ", (column + 1) % 10);
    }
    print!("\r\n\r\n");
    Ok(())
}
