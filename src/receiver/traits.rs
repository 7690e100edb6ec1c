//! Trait abstraction for submission receivers to enable mocking in tests

use crate::state::Submission;
use anyhow::Result;
use async_trait::async_trait;

/// Whatever receives the form once it is submitted
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubmissionReceiver: Send + Sync {
    /// Accept one submission
    async fn receive(&mut self, submission: &Submission) -> Result<()>;

    /// Number of submissions accepted so far
    fn received_count(&self) -> usize;
}
