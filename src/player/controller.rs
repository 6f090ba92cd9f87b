use crate::core::Board;

/// プレイヤー操作のtrait
pub trait PlayerController {
    /// Column to play, or `None` to resign. `legal_columns` is never empty.
    fn choose_move(&self, board: &Board, legal_columns: &[usize]) -> anyhow::Result<Option<usize>>;
    fn name(&self) -> &str;
}
