pub mod record;

pub use record::GameRecord;

use crate::core::{Board, Side};
use crate::display::{render_board, DisplayState};
use crate::logic::winner;
use crate::player::PlayerController;
use log::info;

#[derive(Debug, Clone, PartialEq)]
pub struct GameOutcome {
    /// None = 引き分け (盤面が埋まった)
    pub winner: Option<Side>,
    pub moves: usize,
    pub resigned: bool,
}

pub struct Game {
    pub board: Board,
    pub display: bool,
    /// 描画のたびに画面をクリア
    pub clear_screen: bool,
}

impl Game {
    pub fn new(board: Board) -> Self {
        Game {
            board,
            display: false,
            clear_screen: false,
        }
    }

    pub fn with_display(mut self, display: bool) -> Self {
        self.display = display;
        self
    }

    pub fn with_clear_screen(mut self, clear: bool) -> Self {
        self.clear_screen = clear;
        self
    }

    /// Alternate the two controllers until someone connects four, the board
    /// fills up, or a controller resigns.
    pub fn play(
        &mut self,
        maximizer: &dyn PlayerController,
        minimizer: &dyn PlayerController,
    ) -> anyhow::Result<GameOutcome> {
        self.render(None)?;

        while !self.board.is_full() {
            let side = self.board.side_to_move();
            let controller = match side {
                Side::Maximizer => maximizer,
                Side::Minimizer => minimizer,
            };

            let legal: Vec<usize> = self.board.legal_columns().collect();
            let Some(column) = controller.choose_move(&self.board, &legal)? else {
                info!("{} resigned", controller.name());
                let outcome = GameOutcome {
                    winner: Some(side.opponent()),
                    moves: self.board.move_count(),
                    resigned: true,
                };
                self.render(Some(format!("{} resigned. {} wins!", controller.name(), side.opponent())))?;
                return Ok(outcome);
            };

            let placement = self.board.play(column)?;
            info!("{} ({}) played {}", controller.name(), side, placement);

            if let Some(w) = winner(&self.board) {
                self.render(Some(format!("***{} WON***", w.to_string().to_uppercase())))?;
                return Ok(GameOutcome {
                    winner: Some(w),
                    moves: self.board.move_count(),
                    resigned: false,
                });
            }
            self.render(Some(format!("{} played column {}", controller.name(), column + 1)))?;
        }

        self.render(Some("Board full. Draw!".to_string()))?;
        Ok(GameOutcome {
            winner: None,
            moves: self.board.move_count(),
            resigned: false,
        })
    }

    fn render(&self, status: Option<String>) -> anyhow::Result<()> {
        if !self.display {
            return Ok(());
        }
        render_board(&self.board, &self.display_state(status))?;
        Ok(())
    }

    fn display_state(&self, status: Option<String>) -> DisplayState {
        DisplayState {
            status_msg: status,
            clear: self.clear_screen,
        }
    }

    pub fn record(&self, outcome: &GameOutcome) -> GameRecord {
        GameRecord::from_board(&self.board, outcome.winner)
    }
}
