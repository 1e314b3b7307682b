//! Replay of JSON-line events through the gate.
//!
//! # Responsibilities
//! - Read one `NodeEvent` per line from any async reader
//! - Skip blank lines; log and skip lines that are not valid events
//! - Apply configuration updates between lines
//!
//! # Design Decisions
//! - Pending updates are applied before the next line is read, so a line
//!   written after an update is judged by the new table
//! - Ends at end of input or when the reader fails

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;

use crate::config::GateConfig;
use crate::events::event::NodeEvent;
use crate::events::logger::EventLogger;

/// Counters for one replay run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplayStats {
    /// Valid events read.
    pub seen: usize,
    /// Events that passed the gate.
    pub emitted: usize,
    /// Non-blank lines that failed to parse.
    pub malformed: usize,
    /// Configuration updates applied.
    pub reloads: usize,
}

impl ReplayStats {
    pub fn suppressed(&self) -> usize {
        self.seen - self.emitted
    }
}

/// Gate every event read from `reader`, reconfiguring from `updates` as they arrive.
///
/// A closed `updates` channel just stops reconfiguration; replay continues
/// until the input ends.
pub async fn replay<R>(
    reader: R,
    logger: &EventLogger,
    updates: &mut mpsc::UnboundedReceiver<GateConfig>,
) -> std::io::Result<ReplayStats>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    let mut stats = ReplayStats::default();

    loop {
        tokio::select! {
            biased;

            Some(update) = updates.recv() => {
                logger.gate().configure(&update.categories);
                stats.reloads += 1;
                tracing::info!(entries = logger.gate().snapshot().len(), "Gate configuration reloaded");
            }
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                if line.trim().is_empty() {
                    continue;
                }
                match serde_json::from_str::<NodeEvent>(&line) {
                    Ok(event) => {
                        stats.seen += 1;
                        if logger.observe(&event) {
                            stats.emitted += 1;
                        }
                    }
                    Err(e) => {
                        stats.malformed += 1;
                        tracing::warn!(error = %e, line = %line, "Skipping malformed event");
                    }
                }
            }
        }
    }

    Ok(stats)
}
