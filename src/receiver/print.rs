//! Receiver that hands submissions back on stdout once the TUI is gone

use super::traits::SubmissionReceiver;
use crate::state::Submission;
use anyhow::Result;
use async_trait::async_trait;
use std::io::Write;

/// Buffers submissions while the terminal is in raw mode
#[derive(Debug, Default)]
pub struct PrintOnExit {
    received: Vec<Submission>,
}

impl PrintOnExit {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn received(&self) -> &[Submission] {
        &self.received
    }

    /// Write every buffered submission as pretty JSON, one after another
    pub fn write_to<W: Write>(&self, mut out: W) -> Result<()> {
        for submission in &self.received {
            serde_json::to_writer_pretty(&mut out, submission)?;
            writeln!(out)?;
        }
        out.flush()?;
        Ok(())
    }
}

#[async_trait]
impl SubmissionReceiver for PrintOnExit {
    async fn receive(&mut self, submission: &Submission) -> Result<()> {
        tracing::info!(
            "Received submission {} with {} occasion(s)",
            submission.id,
            submission.occasions.len()
        );
        self.received.push(submission.clone());
        Ok(())
    }

    fn received_count(&self) -> usize {
        self.received.len()
    }
}
