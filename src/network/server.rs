use crate::network::protocol::NetMessage;
use crate::network::transport::{CoordinatorLinks, Envelope, Outbox, WorkerId};
use log::{debug, error, info, warn};
use std::sync::mpsc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc as tokio_mpsc;

pub async fn bind(addr: &str) -> anyhow::Result<TcpListener> {
    let listener = TcpListener::bind(addr).await?;
    info!("coordinator listening on {}", listener.local_addr()?);
    Ok(listener)
}

/// Accept `count` workers and wire each connection into coordinator links.
///
/// Every connection must open with `Join`. After that a reader task forwards
/// its messages, tagged with the worker id, into the shared inbound channel,
/// and a writer task drains the worker's outbound channel onto the socket.
pub async fn accept_workers(
    listener: &TcpListener,
    count: usize,
) -> anyhow::Result<CoordinatorLinks> {
    let (inbound_tx, inbound) = mpsc::channel::<Envelope>();
    let mut outboxes: Vec<Box<dyn Outbox>> = Vec::with_capacity(count);

    for id in 0..count {
        let (socket, peer) = listener.accept().await?;
        let (reader, writer) = socket.into_split();
        let mut lines = BufReader::new(reader).lines();

        let line = lines
            .next_line()
            .await?
            .ok_or_else(|| anyhow::anyhow!("{} closed before joining", peer))?;
        let name = match NetMessage::from_line(&line)? {
            NetMessage::Join { name } => name,
            other => return Err(anyhow::anyhow!("Expected Join message, got {}", other.kind())),
        };
        info!("worker {} joined: {} ({})", id, name, peer);

        let (out_tx, out_rx) = tokio_mpsc::unbounded_channel();
        tokio::spawn(forward_inbound(id, lines, inbound_tx.clone()));
        tokio::spawn(async move {
            if let Err(e) = drain_outbound(writer, out_rx).await {
                warn!("worker {} write failed: {}", id, e);
            }
        });
        outboxes.push(Box::new(out_tx));
    }

    Ok(CoordinatorLinks { outboxes, inbound })
}

async fn forward_inbound(
    id: WorkerId,
    mut lines: tokio::io::Lines<BufReader<OwnedReadHalf>>,
    inbound: mpsc::Sender<Envelope>,
) {
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => {
                info!("worker {} disconnected", id);
                break;
            }
            Err(e) => {
                warn!("worker {} read failed: {}", id, e);
                break;
            }
        };
        match NetMessage::from_line(&line) {
            Ok(msg) => {
                if inbound.send((id, msg)).is_err() {
                    break; // coordinator gone
                }
            }
            Err(e) => {
                error!("worker {} sent an undecodable line: {}", id, e);
                break;
            }
        }
    }
}

async fn drain_outbound(
    mut writer: OwnedWriteHalf,
    mut outbound: tokio_mpsc::UnboundedReceiver<NetMessage>,
) -> anyhow::Result<()> {
    while let Some(msg) = outbound.recv().await {
        let stop = matches!(msg, NetMessage::Stop);
        writer.write_all(msg.to_line()?.as_bytes()).await?;
        if stop {
            debug!("STOP written, closing connection");
            break;
        }
    }
    writer.shutdown().await?;
    Ok(())
}

pub async fn send_msg(socket: &mut TcpStream, msg: &NetMessage) -> anyhow::Result<()> {
    socket.write_all(msg.to_line()?.as_bytes()).await?;
    Ok(())
}
