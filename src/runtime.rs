//! Async match loop
//!
//! The [`Match`] itself is synchronous and clock-agnostic; this module feeds
//! it wall-clock time. One task owns the match and waits on two things:
//!
//! - the control channel (input commands, redraw requests, quit)
//! - a sleep until the earliest step deadline, capped at one frame
//!
//! Whatever wakes it, elapsed time is measured from a fixed origin so rounding
//! never accumulates, the match is ticked, the pending message is applied, and
//! a frame is handed to the caller.

use std::path::Path;

use anyhow::{anyhow, Context, Result};
use log::{debug, warn};
use serde::Serialize;
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{sleep, Duration, Instant};

use crate::engine::{Match, MatchSnapshot};
use crate::types::MatchCommand;

/// Upper bound on the wait between two frames (timers and rainbow animate).
pub const FRAME_MS: u64 = 50;

/// Messages into the match loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Command(MatchCommand),
    /// Draw a frame without changing anything (e.g. after a resize).
    Redraw,
    Quit,
}

#[derive(Serialize)]
struct LogRecord<'a> {
    locks: u64,
    snapshot: &'a MatchSnapshot,
}

/// Append-only JSON-lines log of snapshots, written by a background task.
pub struct SnapshotLog {
    tx: mpsc::UnboundedSender<Vec<u8>>,
    task: JoinHandle<()>,
}

impl SnapshotLog {
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .await
            .with_context(|| format!("failed to open snapshot log {}", path.display()))?;

        let (tx, mut rx) = mpsc::unbounded_channel::<Vec<u8>>();
        let task = tokio::spawn(async move {
            while let Some(line) = rx.recv().await {
                if let Err(err) = file.write_all(&line).await {
                    warn!("snapshot log write failed: {}", err);
                    break;
                }
            }
            let _ = file.flush().await;
        });

        Ok(Self { tx, task })
    }

    /// Queue one line. Fails only if the writer task has stopped.
    pub fn record(&self, locks: u64, snapshot: &MatchSnapshot) -> Result<()> {
        let mut line = serde_json::to_vec(&LogRecord { locks, snapshot })?;
        line.push(b'\n');
        self.tx
            .send(line)
            .map_err(|_| anyhow!("snapshot log writer stopped"))
    }

    /// Flush everything queued so far and stop the writer.
    pub async fn close(self) -> Result<()> {
        drop(self.tx);
        self.task.await?;
        Ok(())
    }
}

/// Drive `duel` until [`Control::Quit`] arrives or every sender is dropped.
///
/// `on_frame` sees a fresh snapshot after every wake-up. When `log` is set, a
/// snapshot line is recorded after each wake-up in which a piece locked.
pub async fn run_match<F>(
    duel: &mut Match,
    mut rx: mpsc::Receiver<Control>,
    log: Option<&SnapshotLog>,
    mut on_frame: F,
) -> Result<()>
where
    F: FnMut(&MatchSnapshot) -> Result<()>,
{
    let origin = Instant::now();
    let mut accounted_ms = 0u64;

    on_frame(&duel.snapshot())?;

    loop {
        let wait_ms = duel
            .ms_until_next_step()
            .map_or(FRAME_MS, |ms| ms.min(FRAME_MS));

        let message = tokio::select! {
            msg = rx.recv() => Some(msg.unwrap_or(Control::Quit)),
            _ = sleep(Duration::from_millis(wait_ms)) => None,
        };

        let locks_before = duel.lock_count();

        let now_ms = origin.elapsed().as_millis() as u64;
        duel.tick(now_ms - accounted_ms);
        accounted_ms = now_ms;

        match message {
            Some(Control::Quit) => {
                debug!("quit at {}ms", duel.clock_ms());
                return Ok(());
            }
            Some(Control::Command(command)) => {
                duel.apply(command);
            }
            Some(Control::Redraw) | None => {}
        }

        let snapshot = duel.snapshot();
        if let Some(log) = log {
            if duel.lock_count() != locks_before {
                log.record(duel.lock_count(), &snapshot)?;
            }
        }
        on_frame(&snapshot)?;
    }
}
