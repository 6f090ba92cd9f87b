use crate::farm::{run_worker, WorkerStats};
use crate::network::protocol::NetMessage;
use crate::network::server::send_msg;
use crate::player::ai::Evaluator;
use log::{info, warn};
use std::sync::mpsc;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tokio::sync::mpsc as tokio_mpsc;

/// Remote worker process: joins the coordinator at `addr` and serves rounds
/// until it receives `Stop` or the connection drops.
pub async fn run_remote_worker(
    addr: &str,
    name: &str,
    evaluator: Arc<dyn Evaluator>,
) -> anyhow::Result<WorkerStats> {
    let mut stream = TcpStream::connect(addr).await?;
    send_msg(
        &mut stream,
        &NetMessage::Join {
            name: name.to_string(),
        },
    )
    .await?;
    info!("joined coordinator at {} as {}", addr, name);

    let (reader, mut writer) = stream.into_split();

    // ソケット -> ワーカーループ (std チャネル)
    let (inbox_tx, inbox) = mpsc::channel::<NetMessage>();
    let reader_task = tokio::spawn(async move {
        let mut lines = BufReader::new(reader).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            match NetMessage::from_line(&line) {
                Ok(msg) => {
                    if inbox_tx.send(msg).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    warn!("undecodable line from coordinator: {}", e);
                    break;
                }
            }
        }
    });

    // ワーカーループ -> ソケット
    let (out_tx, mut out_rx) = tokio_mpsc::unbounded_channel::<NetMessage>();
    let writer_task = tokio::spawn(async move {
        while let Some(msg) = out_rx.recv().await {
            writer.write_all(msg.to_line()?.as_bytes()).await?;
        }
        Ok::<(), anyhow::Error>(())
    });

    let stats = tokio::task::spawn_blocking(move || {
        run_worker(0, &inbox, &out_tx, evaluator.as_ref())
    })
    .await??;

    reader_task.abort();
    writer_task.await??;
    info!(
        "worker {} done: {} rounds, {} tasks",
        name, stats.rounds, stats.tasks
    );
    Ok(stats)
}
