use super::tasks::{best_of, TaskSet};
use crate::core::{Board, TaskKey};
use crate::error::ProtocolError;
use crate::network::protocol::NetMessage;
use crate::network::transport::{CoordinatorLinks, Envelope, Outbox};
use log::{debug, info, warn};
use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WorkerState {
    /// ラウンド外
    Idle,
    /// Board を受け取った / 結果を返した。次は Request のはず
    Awaiting,
    /// Request を受けたが、まだ返事をしていない
    Parked,
    Busy(TaskKey),
    /// このラウンドは Wait 済み
    Retired,
    Dead,
}

impl WorkerState {
    fn describe(self) -> &'static str {
        match self {
            WorkerState::Idle => "idle",
            WorkerState::Awaiting => "awaiting a request",
            WorkerState::Parked => "waiting for a reply",
            WorkerState::Busy(_) => "evaluating a task",
            WorkerState::Retired => "retired for the round",
            WorkerState::Dead => "dead",
        }
    }

    fn owes_message(self) -> bool {
        matches!(self, WorkerState::Awaiting | WorkerState::Busy(_))
    }
}

struct WorkerSlot {
    outbox: Box<dyn Outbox>,
    state: WorkerState,
    last_heard: Instant,
}

#[derive(Debug, Clone)]
pub struct RoundReport {
    /// None when no first move could be scored (full board)
    pub column: Option<usize>,
    pub totals: Vec<Option<f64>>,
    pub elapsed: Duration,
    pub resolved: usize,
    pub failed: usize,
    pub lost_workers: usize,
}

/// Master side of the farm. Owns the task set of the current round and
/// talks to every worker through its link.
pub struct Coordinator {
    workers: Vec<WorkerSlot>,
    inbound: Receiver<Envelope>,
    timeout: Option<Duration>,
    stopped: bool,
}

impl Coordinator {
    pub fn new(links: CoordinatorLinks, timeout: Option<Duration>) -> Self {
        let now = Instant::now();
        let workers = links
            .outboxes
            .into_iter()
            .map(|outbox| WorkerSlot {
                outbox,
                state: WorkerState::Idle,
                last_heard: now,
            })
            .collect();
        Self {
            workers,
            inbound: links.inbound,
            timeout,
            stopped: false,
        }
    }

    pub fn worker_count(&self) -> usize {
        self.workers.len()
    }

    pub fn live_workers(&self) -> usize {
        self.workers
            .iter()
            .filter(|w| w.state != WorkerState::Dead)
            .count()
    }

    /// One decision cycle over the full two-ply task space of `board`.
    pub fn run_round(&mut self, board: &Board) -> Result<RoundReport, ProtocolError> {
        self.run_round_with(board, TaskSet::new(board.columns))
    }

    pub fn run_round_with(
        &mut self,
        board: &Board,
        mut tasks: TaskSet,
    ) -> Result<RoundReport, ProtocolError> {
        if self.stopped {
            return Err(ProtocolError::NoWorkers);
        }
        let start = Instant::now();
        let live_before = self.live_workers();

        // --- BROADCASTING ---
        let mut active = 0;
        for (id, slot) in self.workers.iter_mut().enumerate() {
            if slot.state == WorkerState::Dead {
                continue;
            }
            let msg = NetMessage::Board {
                board: board.clone(),
            };
            match slot.outbox.deliver(msg) {
                Ok(()) => {
                    slot.state = WorkerState::Awaiting;
                    slot.last_heard = Instant::now();
                    active += 1;
                }
                Err(_) => {
                    warn!("worker {} unreachable, dropping it", id);
                    slot.state = WorkerState::Dead;
                }
            }
        }
        if active == 0 {
            return Err(ProtocolError::NoWorkers);
        }
        info!(
            "round {}: {} tasks for {} workers",
            board.move_count(),
            tasks.len(),
            active
        );

        // --- COLLECTING ---
        loop {
            active -= self.reap_unresponsive(&mut tasks)?;
            active -= self.service_parked(&mut tasks)?;
            if active == 0 {
                break;
            }

            let Some((id, msg)) = self.receive()? else {
                continue;
            };
            let slot = self
                .workers
                .get_mut(id)
                .ok_or(ProtocolError::UnknownWorker { worker: id })?;
            if slot.state == WorkerState::Dead {
                warn!("ignoring {} from dead worker {}", msg.kind(), id);
                continue;
            }
            slot.last_heard = Instant::now();

            match (slot.state, msg) {
                (WorkerState::Awaiting, NetMessage::Request) => {
                    slot.state = WorkerState::Parked;
                }
                (WorkerState::Busy(owned), NetMessage::Result { key, score }) if owned == key => {
                    debug!("worker {}: {} = {:.4}", id, key, score);
                    tasks.resolve(key, score)?;
                    slot.state = WorkerState::Awaiting;
                }
                (WorkerState::Busy(owned), NetMessage::Rejected { key, reason })
                    if owned == key =>
                {
                    warn!("worker {} rejected {}: {}", id, key, reason);
                    tasks.fail(key)?;
                    slot.state = WorkerState::Awaiting;
                }
                (state, msg) => {
                    return Err(ProtocolError::MalformedMessage {
                        worker: id,
                        state: state.describe(),
                        kind: msg.kind(),
                    });
                }
            }
        }

        // --- DONE ---
        if !tasks.is_settled() {
            let abandoned = tasks.abandon_unresolved();
            warn!("no live worker left; {} tasks abandoned", abandoned);
        }
        for slot in self.workers.iter_mut() {
            if slot.state != WorkerState::Dead {
                slot.state = WorkerState::Idle;
            }
        }

        let totals = tasks.column_totals();
        let report = RoundReport {
            column: best_of(&totals),
            totals,
            elapsed: start.elapsed(),
            resolved: tasks.resolved_count(),
            failed: tasks.failed_count(),
            lost_workers: live_before - self.live_workers(),
        };
        info!(
            "round done in {:.3}s: column {:?}, {} resolved, {} failed",
            report.elapsed.as_secs_f64(),
            report.column,
            report.resolved,
            report.failed
        );
        Ok(report)
    }

    /// Next inbound message, or None once the earliest worker deadline passed.
    fn receive(&self) -> Result<Option<Envelope>, ProtocolError> {
        let Some(timeout) = self.timeout else {
            return self
                .inbound
                .recv()
                .map(Some)
                .map_err(|_| ProtocolError::Disconnected);
        };

        let wait = self
            .workers
            .iter()
            .filter(|w| w.state.owes_message())
            .map(|w| timeout.saturating_sub(w.last_heard.elapsed()))
            .min()
            .unwrap_or(timeout);

        match self.inbound.recv_timeout(wait) {
            Ok(envelope) => Ok(Some(envelope)),
            Err(RecvTimeoutError::Timeout) => Ok(None),
            Err(RecvTimeoutError::Disconnected) => Err(ProtocolError::Disconnected),
        }
    }

    /// Answer parked requests: a task if one is left, `Wait` once nothing is
    /// in flight. With a timeout configured a request is held while other
    /// workers still owe results, so a task requeued from a dead worker has
    /// somewhere to go. Returns how many workers left the round.
    fn service_parked(&mut self, tasks: &mut TaskSet) -> Result<usize, ProtocolError> {
        let hold = self.timeout.is_some();
        let mut left = 0;
        for (id, slot) in self.workers.iter_mut().enumerate() {
            if slot.state != WorkerState::Parked {
                continue;
            }
            if let Some(key) = tasks.next() {
                slot.state = WorkerState::Busy(key);
                slot.last_heard = Instant::now();
                if slot.outbox.deliver(NetMessage::Task { key }).is_err() {
                    warn!("worker {} went away before taking {}", id, key);
                    slot.state = WorkerState::Dead;
                    tasks.requeue(key)?;
                    left += 1;
                }
            } else if !hold || tasks.in_flight_count() == 0 {
                slot.state = WorkerState::Retired;
                if slot.outbox.deliver(NetMessage::Wait).is_err() {
                    slot.state = WorkerState::Dead;
                }
                left += 1;
                debug!("worker {} retired", id);
            }
        }
        Ok(left)
    }

    /// Declare silent workers dead and put their tasks back. Returns how many
    /// active workers were lost.
    fn reap_unresponsive(&mut self, tasks: &mut TaskSet) -> Result<usize, ProtocolError> {
        let Some(timeout) = self.timeout else {
            return Ok(0);
        };
        let mut lost = 0;
        for (id, slot) in self.workers.iter_mut().enumerate() {
            if !slot.state.owes_message() || slot.last_heard.elapsed() < timeout {
                continue;
            }
            warn!(
                "worker {} unresponsive for {:.1}s while {}",
                id,
                slot.last_heard.elapsed().as_secs_f64(),
                slot.state.describe()
            );
            if let WorkerState::Busy(key) = slot.state {
                tasks.requeue(key)?;
            }
            slot.state = WorkerState::Dead;
            lost += 1;
        }
        Ok(lost)
    }

    /// Tell every worker to exit. Only the first call sends anything.
    ///
    /// Workers declared dead get STOP too: a worker reaped for being slow is
    /// usually still running and would otherwise block on its inbox forever.
    pub fn shutdown(&mut self) {
        if self.stopped {
            return;
        }
        self.stopped = true;
        let mut sent = 0;
        for (id, slot) in self.workers.iter().enumerate() {
            match slot.outbox.deliver(NetMessage::Stop) {
                Ok(()) => sent += 1,
                Err(_) => debug!("worker {} already gone at shutdown", id),
            }
        }
        info!("sent STOP to {} of {} workers", sent, self.workers.len());
    }
}

impl Drop for Coordinator {
    fn drop(&mut self) {
        self.shutdown();
    }
}
