use super::tasks::TaskSet;
use crate::core::{Board, TaskKey};
use crate::player::ai::Evaluator;
use rayon::prelude::*;

/// Score every task key of `board` without the farm, in parallel with rayon.
///
/// Used to check the farm's answer and as the `bench` baseline.
pub fn evaluate_all(board: &Board, evaluator: &dyn Evaluator) -> TaskSet {
    let columns = board.columns;
    let scores: Vec<_> = (0..columns * columns)
        .into_par_iter()
        .map(|i| evaluator.evaluate(board, TaskKey::new(i / columns, i % columns)))
        .collect();

    let mut tasks = TaskSet::new(columns);
    for score in scores {
        // next() は同じ順序でキーを返す
        let Some(key) = tasks.next() else { break };
        let res = match score {
            Ok(score) => tasks.resolve(key, score),
            Err(_) => tasks.fail(key),
        };
        debug_assert!(res.is_ok());
    }
    tasks
}
