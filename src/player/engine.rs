use crate::core::Board;
use crate::farm::{Coordinator, RoundReport};
use crate::player::PlayerController;
use std::cell::RefCell;

/// Farm-backed player: every decision is one coordinator round.
pub struct EngineController {
    name: String,
    coordinator: RefCell<Coordinator>,
    last_report: RefCell<Option<RoundReport>>,
    announce: bool,
}

impl EngineController {
    pub fn new(name: &str, coordinator: Coordinator) -> Self {
        Self {
            name: name.to_string(),
            coordinator: RefCell::new(coordinator),
            last_report: RefCell::new(None),
            announce: false,
        }
    }

    /// Print the round time after every decision.
    pub fn announcing(mut self) -> Self {
        self.announce = true;
        self
    }

    pub fn last_report(&self) -> Option<RoundReport> {
        self.last_report.borrow().clone()
    }

    pub fn shutdown(&self) {
        self.coordinator.borrow_mut().shutdown();
    }
}

impl PlayerController for EngineController {
    fn name(&self) -> &str {
        &self.name
    }

    fn choose_move(&self, board: &Board, legal_columns: &[usize]) -> anyhow::Result<Option<usize>> {
        let report = self.coordinator.borrow_mut().run_round(board)?;
        if self.announce {
            print!("Calculated in: {:.3}s\r\n", report.elapsed.as_secs_f64());
        }

        // 全タスクが失敗した場合 (ワーカー全滅など) は合法手の先頭
        let column = report
            .column
            .filter(|c| legal_columns.contains(c))
            .or_else(|| legal_columns.first().copied());
        *self.last_report.borrow_mut() = Some(report);
        Ok(column)
    }
}
