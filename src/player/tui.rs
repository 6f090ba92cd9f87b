use crate::core::Board;
use crate::player::PlayerController;
use std::cell::RefCell;
use std::io::{self, BufRead, Write};

/// Human at a terminal, typing 1-based column numbers.
pub struct TuiController<R: BufRead> {
    name: String,
    input: RefCell<R>,
}

impl TuiController<io::StdinLock<'static>> {
    pub fn stdin(name: &str) -> Self {
        Self::new(name, io::stdin().lock())
    }
}

impl<R: BufRead> TuiController<R> {
    pub fn new(name: &str, input: R) -> Self {
        Self {
            name: name.to_string(),
            input: RefCell::new(input),
        }
    }
}

impl<R: BufRead> PlayerController for TuiController<R> {
    fn name(&self) -> &str {
        &self.name
    }

    fn choose_move(&self, board: &Board, legal_columns: &[usize]) -> anyhow::Result<Option<usize>> {
        let mut input = self.input.borrow_mut();
        loop {
            print!(
                "Play your move! [1-{}] ([q]: Resign): ",
                board.columns
            );
            io::stdout().flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                // 入力が閉じた = 投了
                return Ok(None);
            }
            let line = line.trim();
            if line.eq_ignore_ascii_case("q") {
                return Ok(None);
            }

            match line.parse::<usize>() {
                Ok(n) if n >= 1 && legal_columns.contains(&(n - 1)) => return Ok(Some(n - 1)),
                Ok(n) if n >= 1 && n <= board.columns => println!("Column {} is full.", n),
                _ => println!("Enter a column number between 1 and {}.", board.columns),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_invalid_input_is_reprompted() {
        let board = Board::new(7, 6);
        let human = TuiController::new("Human", Cursor::new("9\nabc\n0\n3\n"));
        let legal: Vec<usize> = (0..7).collect();
        assert_eq!(human.choose_move(&board, &legal).unwrap(), Some(2));
    }

    #[test]
    fn test_full_column_is_refused() {
        let board = Board::new(7, 6);
        let human = TuiController::new("Human", Cursor::new("1\n2\n"));
        assert_eq!(human.choose_move(&board, &[1, 2]).unwrap(), Some(1));
    }

    #[test]
    fn test_q_and_eof_resign() {
        let board = Board::new(7, 6);
        let legal: Vec<usize> = (0..7).collect();
        let human = TuiController::new("Human", Cursor::new("q\n"));
        assert_eq!(human.choose_move(&board, &legal).unwrap(), None);
        let human = TuiController::new("Human", Cursor::new(""));
        assert_eq!(human.choose_move(&board, &legal).unwrap(), None);
    }
}
