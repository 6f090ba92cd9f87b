//! Error types shared across the board, task and protocol layers.

use crate::core::TaskKey;
use thiserror::Error;

/// Rejected moves. The board is left untouched when one of these is returned.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardError {
    #[error("column {column} is full")]
    ColumnFull { column: usize },

    #[error("column {column} is out of range (board has {columns} columns)")]
    ColumnOutOfRange { column: usize, columns: usize },

    /// Decoded board whose fields contradict each other.
    #[error("inconsistent board: {reason}")]
    Inconsistent { reason: &'static str },
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskError {
    #[error("task {key} is not in flight")]
    NotInFlight { key: TaskKey },

    #[error("task {key} is outside the task set")]
    OutOfRange { key: TaskKey },
}

/// Coordinator/worker exchange failures. Fatal to the current round.
#[derive(Error, Debug)]
pub enum ProtocolError {
    #[error("malformed message from worker {worker}: got {kind} while {state}")]
    MalformedMessage {
        worker: usize,
        state: &'static str,
        kind: &'static str,
    },

    #[error("message from unknown worker {worker}")]
    UnknownWorker { worker: usize },

    #[error("failed to send to worker {worker}")]
    Send { worker: usize },

    #[error("peer disconnected")]
    Disconnected,

    #[error("no live workers")]
    NoWorkers,

    #[error(transparent)]
    Task(#[from] TaskError),
}
