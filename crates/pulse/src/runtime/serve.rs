//! Serve — wire stdin to the ingest consumer and print discovered patterns.
//!
//! Input is read on a plain OS thread rather than tokio's blocking pool: a
//! read stuck on an open terminal must not hold up runtime shutdown after
//! Ctrl-C.

use std::future::Future;
use std::io::{BufRead, BufReader, Write};
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::conf::{OutputFormat, PulseConfig};
use crate::mine::{Pattern, PatternMiner, TracingReporter};
use crate::runtime::ingest;
use crate::runtime::stop::shutdown_signal;

/// Forward every line of `reader` to `tx`. Blocking; call from a plain thread.
///
/// Stops at EOF, on a read error, or when the consumer is gone. Returns the
/// number of lines forwarded.
pub fn pump<R: BufRead>(reader: R, tx: mpsc::Sender<String>) -> u64 {
    let mut forwarded: u64 = 0;

    for next in reader.lines() {
        let line = match next {
            Ok(line) => line,
            Err(e) => {
                warn!("Failed to read input: {}", e);
                break;
            }
        };
        if tx.blocking_send(line).is_err() {
            warn!("Ingest consumer stopped, discarding remaining input");
            break;
        }
        forwarded += 1;
    }

    info!("End of input after {} lines", forwarded);
    forwarded
}

/// Mine stdin until EOF or Ctrl-C, then print the discovered patterns.
pub async fn run(config: PulseConfig) -> Result<(), Box<dyn std::error::Error>> {
    info!("Reading log lines from stdin");
    let stdin = BufReader::new(std::io::stdin());
    let mut stdout = std::io::stdout();
    run_until(config, stdin, shutdown_signal(), &mut stdout).await
}

/// Mine `reader` until it ends or `shutdown` resolves, then write patterns to `out`.
///
/// On shutdown, lines already queued are still analyzed; the reader thread is
/// left behind and exits on its next send.
pub async fn run_until<R, F, W>(
    config: PulseConfig,
    reader: R,
    shutdown: F,
    out: &mut W,
) -> Result<(), Box<dyn std::error::Error>>
where
    R: BufRead + Send + 'static,
    F: Future<Output = ()>,
    W: Write,
{
    let output = config.output;
    let capacity = config.channel_capacity;
    let miner = PatternMiner::new(config, TracingReporter);
    let (tx, mut consumer) = ingest::spawn(miner, capacity);

    std::thread::Builder::new()
        .name("pulse-input".to_string())
        .spawn(move || pump(reader, tx))?;

    tokio::pin!(shutdown);
    let miner = tokio::select! {
        joined = consumer.join() => joined?,
        _ = &mut shutdown => consumer.stop().await?,
    };

    write_patterns(out, miner.patterns(), output)?;
    out.flush()?;
    Ok(())
}

/// Write one pattern per line, as text or JSON.
pub fn write_patterns<W: Write>(
    out: &mut W,
    patterns: &[Pattern],
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    for pattern in patterns {
        match format {
            OutputFormat::Text => writeln!(out, "{}", pattern)?,
            OutputFormat::Json => {
                serde_json::to_writer(&mut *out, pattern)?;
                writeln!(out)?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mine::{Token, Variation};
    use std::io::{self, Cursor, Read};
    use std::sync::mpsc as std_mpsc;
    use tokio::sync::oneshot;

    /// Serves `data`, then reports that it is exhausted and blocks like an
    /// idle terminal until `hold` is dropped.
    struct IdleReader {
        data: Cursor<Vec<u8>>,
        exhausted: Option<oneshot::Sender<()>>,
        hold: std_mpsc::Receiver<()>,
    }

    impl Read for IdleReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            let n = {
                let available = self.fill_buf()?;
                let n = available.len().min(buf.len());
                buf[..n].copy_from_slice(&available[..n]);
                n
            };
            self.consume(n);
            Ok(n)
        }
    }

    impl BufRead for IdleReader {
        fn fill_buf(&mut self) -> io::Result<&[u8]> {
            if self.data.position() as usize >= self.data.get_ref().len() {
                if let Some(exhausted) = self.exhausted.take() {
                    let _ = exhausted.send(());
                }
                let _ = self.hold.recv();
            }
            self.data.fill_buf()
        }

        fn consume(&mut self, amt: usize) {
            self.data.consume(amt)
        }
    }

    // ─── pump ───────────────────────────────────────────────────

    #[test]
    fn test_pump_forwards_all_lines() {
        let input = Cursor::new(b"job 1 done\njob 2 done\r\nlast line without newline".to_vec());
        let (tx, mut rx) = mpsc::channel(8);

        assert_eq!(pump(input, tx), 3);

        let mut received = Vec::new();
        while let Ok(line) = rx.try_recv() {
            received.push(line);
        }
        assert_eq!(received, vec!["job 1 done", "job 2 done", "last line without newline"]);
    }

    #[test]
    fn test_pump_stops_when_consumer_gone() {
        let (tx, rx) = mpsc::channel(8);
        drop(rx);
        assert_eq!(pump(Cursor::new(b"a\nb\nc\n".to_vec()), tx), 0);
    }

    // ─── run_until ──────────────────────────────────────────────

    #[tokio::test]
    async fn test_run_until_end_of_input() {
        let input = Cursor::new(b"user bob logged in\nuser alice logged in\n".to_vec());
        let mut out = Vec::new();

        run_until(PulseConfig::default(), input, std::future::pending(), &mut out)
            .await
            .expect("run");

        assert_eq!(String::from_utf8(out).unwrap(), "user * logged in\n");
    }

    #[tokio::test]
    async fn test_run_until_shutdown_with_input_still_open() {
        let (exhausted_tx, exhausted_rx) = oneshot::channel();
        let (_hold_tx, hold_rx) = std_mpsc::channel::<()>();
        let reader = IdleReader {
            data: Cursor::new(b"user bob logged in\nuser alice logged in\n".to_vec()),
            exhausted: Some(exhausted_tx),
            hold: hold_rx,
        };

        // Shut down once both lines are queued and the reader sits idle.
        let shutdown = async {
            let _ = exhausted_rx.await;
        };

        let mut out = Vec::new();
        let finished = tokio::time::timeout(
            std::time::Duration::from_secs(5),
            run_until(PulseConfig::default(), reader, shutdown, &mut out),
        )
        .await;

        assert!(finished.is_ok(), "run_until did not return after shutdown");
        finished.unwrap().expect("run");
        assert_eq!(String::from_utf8(out).unwrap(), "user * logged in\n");
    }

    // ─── output ─────────────────────────────────────────────────

    #[test]
    fn test_write_patterns_text_and_json() {
        let patterns = vec![Pattern::new(vec![
            Token::literal("user"),
            Token::wildcard(vec![Variation::new("bob".into())]),
        ])];

        let mut text = Vec::new();
        write_patterns(&mut text, &patterns, OutputFormat::Text).expect("write text");
        assert_eq!(String::from_utf8(text).unwrap(), "user *\n");

        let mut json = Vec::new();
        write_patterns(&mut json, &patterns, OutputFormat::Json).expect("write json");
        let json = String::from_utf8(json).unwrap();
        assert_eq!(json.lines().count(), 1);
        let back: Pattern = serde_json::from_str(json.trim_end()).expect("valid json");
        assert_eq!(back, patterns[0]);
    }
}
