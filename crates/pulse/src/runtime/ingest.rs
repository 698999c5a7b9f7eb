//! Ingest — single consumer task feeding lines to the miner.
//!
//! Producers push lines into a bounded channel; one task drains it and calls
//! [`PatternMiner::analyze`] per line, strictly in order. A full channel
//! suspends producers, which is the only backpressure in the system.

use tokio::sync::{mpsc, oneshot};
use tokio::task::{JoinError, JoinHandle};
use tracing::{debug, info};

use crate::mine::{Analysis, PatternMiner};

/// Handle to the running consumer task.
#[derive(Debug)]
pub struct Consumer {
    stop: Option<oneshot::Sender<()>>,
    task: JoinHandle<PatternMiner>,
}

impl Consumer {
    /// Wait until every sender is dropped and the channel is drained.
    pub async fn join(&mut self) -> Result<PatternMiner, JoinError> {
        (&mut self.task).await
    }

    /// Close the channel, process what is already queued, and return the miner.
    /// Producers still holding a sender get an error on their next send.
    pub async fn stop(&mut self) -> Result<PatternMiner, JoinError> {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
        (&mut self.task).await
    }
}

/// Spawn the consumer.
pub fn spawn(miner: PatternMiner, capacity: usize) -> (mpsc::Sender<String>, Consumer) {
    let (tx, rx) = mpsc::channel(capacity);
    let (stop_tx, stop_rx) = oneshot::channel();
    let task = tokio::spawn(consume(miner, rx, stop_rx));
    (
        tx,
        Consumer {
            stop: Some(stop_tx),
            task,
        },
    )
}

/// Drain `rx` until it closes, or until `stop` fires and the queue is empty.
pub async fn consume(
    mut miner: PatternMiner,
    mut rx: mpsc::Receiver<String>,
    mut stop: oneshot::Receiver<()>,
) -> PatternMiner {
    debug!("ingest consumer started");
    let mut stop_armed = true;

    loop {
        tokio::select! {
            biased;
            next = rx.recv() => {
                let Some(line) = next else { break };
                if let Analysis::Matched { pattern, .. } = miner.analyze(&line) {
                    if let Some(p) = miner.patterns().get(pattern) {
                        info!(pattern = %p, "new pattern");
                    }
                }
            }
            signal = &mut stop, if stop_armed => {
                stop_armed = false;
                // A dropped handle is not a stop request.
                if signal.is_ok() {
                    debug!("ingest consumer stopping, draining queued lines");
                    rx.close();
                }
            }
        }
    }

    let stats = miner.stats();
    info!(
        lines = stats.lines_seen,
        patterns = stats.patterns_found,
        unmatched = miner.unmatched().len(),
        dropped = stats.lines_dropped,
        "ingest consumer finished"
    );
    miner
}
