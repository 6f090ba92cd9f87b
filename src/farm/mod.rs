//! Task farming: the coordinator hands out two-ply tasks, workers score them.

pub mod coordinator;
pub mod reference;
pub mod tasks;
pub mod worker;

pub use coordinator::{Coordinator, RoundReport};
pub use reference::evaluate_all;
pub use tasks::{TaskSet, TaskState};
pub use worker::{run_worker, WorkerStats};

use crate::network::transport::{local_links, CoordinatorLinks};
use crate::player::ai::Evaluator;
use std::sync::Arc;
use std::thread::JoinHandle;

/// Worker threads of an in-process farm.
pub struct LocalPool {
    handles: Vec<JoinHandle<Result<WorkerStats, crate::error::ProtocolError>>>,
}

impl LocalPool {
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Wait for every worker to exit (send `Stop` through the coordinator first).
    pub fn join(self) -> anyhow::Result<Vec<WorkerStats>> {
        let mut stats = Vec::with_capacity(self.handles.len());
        for handle in self.handles {
            let res = handle
                .join()
                .map_err(|_| anyhow::anyhow!("worker thread panicked"))?;
            stats.push(res?);
        }
        Ok(stats)
    }
}

/// Spawn `count` worker threads sharing `evaluator`.
pub fn spawn_local_workers(
    count: usize,
    evaluator: Arc<dyn Evaluator>,
) -> std::io::Result<(CoordinatorLinks, LocalPool)> {
    let (links, workers) = local_links(count);
    let mut handles = Vec::with_capacity(count);

    for link in workers {
        let evaluator = Arc::clone(&evaluator);
        let handle = std::thread::Builder::new()
            .name(format!("worker-{}", link.id))
            .spawn(move || run_worker(link.id, &link.inbox, &link.outbox, evaluator.as_ref()))?;
        handles.push(handle);
    }

    Ok((links, LocalPool { handles }))
}
