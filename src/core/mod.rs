pub mod board;
pub mod r#move;
pub mod types;

pub use board::{Board, DEFAULT_COLUMNS, DEFAULT_ROWS};
pub use r#move::{Placement, TaskKey};
pub use types::{Position, Side};
