//! Miner notifications.
//!
//! The miner reports progress through a [`Reporter`] instead of writing to a
//! fixed sink. Closures, a tracing sink and a channel sink are provided.

use std::fmt;
use tokio::sync::mpsc;

#[derive(Debug, Clone, PartialEq)]
pub enum MinerEvent {
    /// A pooled line scored above the threshold; token alignment starts.
    LookingForPattern { candidate: usize, score: f64 },
    /// A new pattern was appended at `index` of the discovered list.
    PatternFound { index: usize },
    /// No pattern; the line joined the unmatched pool.
    AddedToUnmatched,
    /// No pattern and the pool is at capacity; the line was discarded.
    PoolFull,
    /// Line exceeded the configured length limit and was not analyzed.
    LineTooLong { len: usize },
}

impl fmt::Display for MinerEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MinerEvent::LookingForPattern { .. } => f.write_str("Looking for pattern..."),
            MinerEvent::PatternFound { .. } => f.write_str("Found a pattern"),
            MinerEvent::AddedToUnmatched => f.write_str("Added line to unmatched"),
            MinerEvent::PoolFull => f.write_str("Unmatched pool full, dropping line"),
            MinerEvent::LineTooLong { .. } => f.write_str("Line too long, skipping"),
        }
    }
}

pub trait Reporter: Send {
    fn report(&self, event: &MinerEvent);
}

impl<F> Reporter for F
where
    F: Fn(&MinerEvent) + Send,
{
    fn report(&self, event: &MinerEvent) {
        self(event)
    }
}

/// Logs every event at debug level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn report(&self, event: &MinerEvent) {
        match event {
            MinerEvent::LookingForPattern { candidate, score } => {
                tracing::debug!(candidate, score, "{}", event)
            }
            MinerEvent::PatternFound { index } => tracing::debug!(index, "{}", event),
            MinerEvent::LineTooLong { len } => tracing::debug!(len, "{}", event),
            MinerEvent::AddedToUnmatched | MinerEvent::PoolFull => tracing::debug!("{}", event),
        }
    }
}

/// Forwards events to an unbounded channel. Events are dropped once the
/// receiver is gone.
#[derive(Debug, Clone)]
pub struct ChannelReporter {
    tx: mpsc::UnboundedSender<MinerEvent>,
}

impl ChannelReporter {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<MinerEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl Reporter for ChannelReporter {
    fn report(&self, event: &MinerEvent) {
        let _ = self.tx.send(event.clone());
    }
}
