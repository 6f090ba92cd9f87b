use crate::error::ProtocolError;
use crate::network::protocol::NetMessage;
use crate::network::transport::{Outbox, WorkerId};
use crate::player::ai::Evaluator;
use log::{debug, info, warn};
use std::sync::mpsc::Receiver;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkerStats {
    pub rounds: usize,
    pub tasks: usize,
    pub rejected: usize,
}

/// Serve rounds until `Stop`.
///
/// Between rounds the worker waits for a `Board`; inside a round it keeps
/// requesting tasks until the coordinator answers `Wait`.
pub fn run_worker<O: Outbox + ?Sized>(
    id: WorkerId,
    inbox: &Receiver<NetMessage>,
    outbox: &O,
    evaluator: &dyn Evaluator,
) -> Result<WorkerStats, ProtocolError> {
    let mut stats = WorkerStats::default();

    loop {
        let board = match inbox.recv().map_err(|_| ProtocolError::Disconnected)? {
            NetMessage::Board { board } => board,
            NetMessage::Stop => {
                info!("worker {} stopping after {} tasks", id, stats.tasks);
                return Ok(stats);
            }
            other => {
                return Err(ProtocolError::MalformedMessage {
                    worker: id,
                    state: "idle",
                    kind: other.kind(),
                })
            }
        };
        stats.rounds += 1;

        loop {
            outbox.deliver(NetMessage::Request)?;

            let key = match inbox.recv().map_err(|_| ProtocolError::Disconnected)? {
                NetMessage::Task { key } => key,
                NetMessage::Wait => break,
                NetMessage::Stop => {
                    info!("worker {} stopped mid-round", id);
                    return Ok(stats);
                }
                other => {
                    return Err(ProtocolError::MalformedMessage {
                        worker: id,
                        state: "requesting",
                        kind: other.kind(),
                    })
                }
            };

            match evaluator.evaluate(&board, key) {
                Ok(score) => {
                    debug!("worker {} scored {} = {:.4}", id, key, score);
                    stats.tasks += 1;
                    outbox.deliver(NetMessage::Result { key, score })?;
                }
                Err(e) => {
                    warn!("worker {} rejected {}: {}", id, key, e);
                    stats.rejected += 1;
                    outbox.deliver(NetMessage::Rejected {
                        key,
                        reason: e.to_string(),
                    })?;
                }
            }
        }
    }
}
