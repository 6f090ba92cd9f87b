use crate::core::TaskKey;
use crate::error::TaskError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TaskState {
    Unresolved,
    InFlight,
    Resolved(f64),
    /// 評価できなかった (不正な手順) か、担当できるワーカーが残っていない
    Failed,
}

/// Every two-ply continuation of one round, indexed by `first * columns + second`.
#[derive(Debug, Clone)]
pub struct TaskSet {
    columns: usize,
    states: Vec<TaskState>,
    /// Lowest index that may still be unresolved.
    cursor: usize,
}

impl TaskSet {
    pub fn new(columns: usize) -> Self {
        Self {
            columns,
            states: vec![TaskState::Unresolved; columns * columns],
            cursor: 0,
        }
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    fn index(&self, key: TaskKey) -> Result<usize, TaskError> {
        if key.first >= self.columns || key.second >= self.columns {
            return Err(TaskError::OutOfRange { key });
        }
        Ok(key.first * self.columns + key.second)
    }

    fn key_at(&self, index: usize) -> TaskKey {
        TaskKey::new(index / self.columns, index % self.columns)
    }

    pub fn state(&self, key: TaskKey) -> Option<TaskState> {
        self.index(key).ok().map(|i| self.states[i])
    }

    /// Hand out the first unresolved key in enumeration order.
    pub fn next(&mut self) -> Option<TaskKey> {
        while self.cursor < self.states.len() {
            let i = self.cursor;
            self.cursor += 1;
            if self.states[i] == TaskState::Unresolved {
                self.states[i] = TaskState::InFlight;
                return Some(self.key_at(i));
            }
        }
        None
    }

    pub fn resolve(&mut self, key: TaskKey, score: f64) -> Result<(), TaskError> {
        let i = self.in_flight_index(key)?;
        self.states[i] = TaskState::Resolved(score);
        Ok(())
    }

    pub fn fail(&mut self, key: TaskKey) -> Result<(), TaskError> {
        let i = self.in_flight_index(key)?;
        self.states[i] = TaskState::Failed;
        Ok(())
    }

    /// Put an in-flight key back so another worker can pick it up.
    pub fn requeue(&mut self, key: TaskKey) -> Result<(), TaskError> {
        let i = self.in_flight_index(key)?;
        self.states[i] = TaskState::Unresolved;
        self.cursor = self.cursor.min(i);
        Ok(())
    }

    /// Give up on everything that is not resolved yet.
    pub fn abandon_unresolved(&mut self) -> usize {
        let mut abandoned = 0;
        for state in self.states.iter_mut() {
            if matches!(state, TaskState::Unresolved | TaskState::InFlight) {
                *state = TaskState::Failed;
                abandoned += 1;
            }
        }
        self.cursor = self.states.len();
        abandoned
    }

    fn in_flight_index(&self, key: TaskKey) -> Result<usize, TaskError> {
        let i = self.index(key)?;
        if self.states[i] != TaskState::InFlight {
            return Err(TaskError::NotInFlight { key });
        }
        Ok(i)
    }

    pub fn unresolved_count(&self) -> usize {
        self.count(|s| *s == TaskState::Unresolved)
    }

    pub fn in_flight_count(&self) -> usize {
        self.count(|s| *s == TaskState::InFlight)
    }

    pub fn resolved_count(&self) -> usize {
        self.count(|s| matches!(s, TaskState::Resolved(_)))
    }

    pub fn failed_count(&self) -> usize {
        self.count(|s| *s == TaskState::Failed)
    }

    /// No key is waiting for dispatch or for a result.
    pub fn is_settled(&self) -> bool {
        self.unresolved_count() == 0 && self.in_flight_count() == 0
    }

    fn count(&self, pred: impl Fn(&TaskState) -> bool) -> usize {
        self.states.iter().filter(|s| pred(s)).count()
    }

    pub fn resolved(&self) -> impl Iterator<Item = (TaskKey, f64)> + '_ {
        self.states
            .iter()
            .enumerate()
            .filter_map(move |(i, s)| match s {
                TaskState::Resolved(score) => Some((self.key_at(i), *score)),
                _ => None,
            })
    }

    /// Per first-move totals; `None` for columns with nothing resolved.
    pub fn column_totals(&self) -> Vec<Option<f64>> {
        let mut totals = vec![None; self.columns];
        for (key, score) in self.resolved() {
            let slot: &mut Option<f64> = &mut totals[key.first];
            *slot = Some(slot.unwrap_or(0.0) + score);
        }
        totals
    }

    /// First move with the highest total score; ties go to the lowest column.
    pub fn best_column(&self) -> Option<usize> {
        best_of(&self.column_totals())
    }
}

/// Stable argmax over the columns that have a total.
pub fn best_of(totals: &[Option<f64>]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (column, total) in totals.iter().enumerate() {
        let Some(total) = *total else { continue };
        match best {
            Some((_, b)) if total <= b => {}
            _ => best = Some((column, total)),
        }
    }
    best.map(|(column, _)| column)
}
