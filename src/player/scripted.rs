use crate::core::Board;
use crate::player::PlayerController;
use std::cell::RefCell;
use std::collections::VecDeque;

/// Plays a fixed list of columns, then resigns.
pub struct ScriptedController {
    name: String,
    moves: RefCell<VecDeque<usize>>,
}

impl ScriptedController {
    pub fn new(name: &str, moves: impl IntoIterator<Item = usize>) -> Self {
        Self {
            name: name.to_string(),
            moves: RefCell::new(moves.into_iter().collect()),
        }
    }
}

impl PlayerController for ScriptedController {
    fn name(&self) -> &str {
        &self.name
    }

    fn choose_move(&self, _board: &Board, _legal: &[usize]) -> anyhow::Result<Option<usize>> {
        Ok(self.moves.borrow_mut().pop_front())
    }
}
