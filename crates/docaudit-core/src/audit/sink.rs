//! Destination for audit jobs.

use crate::audit::event::AuditJob;
use crate::errors::{AuditError, Result};
use std::sync::Mutex;

/// Accepts audit jobs for asynchronous processing.
///
/// The host's job queue implements this; the diff itself never waits on it.
pub trait AuditSink: Send + Sync {
    /// Enqueue one job.
    ///
    /// # Errors
    ///
    /// Returns `EnqueueFailed` if the queue rejects the job.
    fn enqueue(&self, job: AuditJob) -> Result<()>;
}

/// Sink that keeps jobs in memory, in enqueue order.
#[derive(Debug, Default)]
pub struct MemorySink {
    jobs: Mutex<Vec<AuditJob>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of every job enqueued so far.
    ///
    /// # Errors
    ///
    /// `Internal` if the lock was poisoned.
    pub fn jobs(&self) -> Result<Vec<AuditJob>> {
        Ok(self.lock()?.clone())
    }

    /// Remove and return every job enqueued so far.
    ///
    /// # Errors
    ///
    /// `Internal` if the lock was poisoned.
    pub fn drain(&self) -> Result<Vec<AuditJob>> {
        Ok(std::mem::take(&mut *self.lock()?))
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Vec<AuditJob>>> {
        self.jobs.lock().map_err(|e| AuditError::Internal {
            message: format!("audit sink lock poisoned: {}", e),
        })
    }
}

impl AuditSink for MemorySink {
    fn enqueue(&self, job: AuditJob) -> Result<()> {
        self.lock()?.push(job);
        Ok(())
    }
}

/// Sink that rejects every job with `EnqueueFailed`. Stands in when no
/// queue is configured, so a missing queue surfaces instead of dropping jobs.
pub struct RejectingSink;

impl AuditSink for RejectingSink {
    fn enqueue(&self, job: AuditJob) -> Result<()> {
        Err(AuditError::EnqueueFailed {
            slug: job.slug,
            reason: "no audit sink configured".to_string(),
        })
    }
}
