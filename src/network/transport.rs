//! Point-to-point links between the coordinator and its workers.
//!
//! Both sides block on a `std::sync::mpsc::Receiver`. What sits behind the
//! sending half differs: another thread's channel for the local pool, or a
//! tokio writer task for TCP connections.

use super::protocol::NetMessage;
use crate::error::ProtocolError;
use std::sync::mpsc;

pub type WorkerId = usize;

/// A message tagged with the worker it came from.
pub type Envelope = (WorkerId, NetMessage);

/// Sending half of a link.
pub trait Outbox: Send {
    fn deliver(&self, msg: NetMessage) -> Result<(), ProtocolError>;
}

impl Outbox for mpsc::Sender<NetMessage> {
    fn deliver(&self, msg: NetMessage) -> Result<(), ProtocolError> {
        self.send(msg).map_err(|_| ProtocolError::Disconnected)
    }
}

impl Outbox for tokio::sync::mpsc::UnboundedSender<NetMessage> {
    fn deliver(&self, msg: NetMessage) -> Result<(), ProtocolError> {
        self.send(msg).map_err(|_| ProtocolError::Disconnected)
    }
}

/// Worker-side sender into the coordinator's shared inbound channel.
#[derive(Clone)]
pub struct Tagged {
    id: WorkerId,
    tx: mpsc::Sender<Envelope>,
}

impl Tagged {
    pub fn new(id: WorkerId, tx: mpsc::Sender<Envelope>) -> Self {
        Self { id, tx }
    }
}

impl Outbox for Tagged {
    fn deliver(&self, msg: NetMessage) -> Result<(), ProtocolError> {
        self.tx
            .send((self.id, msg))
            .map_err(|_| ProtocolError::Disconnected)
    }
}

/// Everything the coordinator needs: one outbox per worker, one shared inbox.
pub struct CoordinatorLinks {
    pub outboxes: Vec<Box<dyn Outbox>>,
    pub inbound: mpsc::Receiver<Envelope>,
}

pub struct WorkerLink {
    pub id: WorkerId,
    pub inbox: mpsc::Receiver<NetMessage>,
    pub outbox: Tagged,
}

/// In-process links for `count` workers.
pub fn local_links(count: usize) -> (CoordinatorLinks, Vec<WorkerLink>) {
    let (inbound_tx, inbound) = mpsc::channel();
    let mut outboxes: Vec<Box<dyn Outbox>> = Vec::with_capacity(count);
    let mut workers = Vec::with_capacity(count);

    for id in 0..count {
        let (tx, inbox) = mpsc::channel();
        outboxes.push(Box::new(tx));
        workers.push(WorkerLink {
            id,
            inbox,
            outbox: Tagged::new(id, inbound_tx.clone()),
        });
    }
    // inbound_tx はここで捨てる: 全ワーカーが落ちたら recv が Disconnected を返す

    (CoordinatorLinks { outboxes, inbound }, workers)
}
