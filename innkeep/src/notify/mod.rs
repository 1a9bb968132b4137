//! Asynchronous notification dispatch.
//!
//! The booking engine never talks to a mail server. After a reservation
//! commits it hands a [`NotificationJob`] to a [`NotificationQueue`] and
//! moves on; delivery happens on the queue's own schedule with its own
//! retry policy, and a delivery failure can never unwind the committed
//! reservation.
//!
//! [`MailSpool`] is the bundled queue implementation: a background worker
//! thread draining a channel, retrying each job a bounded number of times
//! against a pluggable [`Mailer`] transport.

use std::fmt;
use std::sync::{Arc, Condvar, Mutex};
use std::time::{Duration, Instant};

mod message;
mod spool;

pub use message::booking_job;
pub use spool::{DeliveryError, LogMailer, Mailer, MailSpool, RetryPolicy};

/// A notification to be delivered to a set of recipients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationJob {
    /// Message subject line.
    pub subject: String,
    /// Message body.
    pub body: String,
    /// Recipient email addresses.
    pub recipients: Vec<String>,
}

/// The final fate of an enqueued notification job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryOutcome {
    /// The job was delivered.
    Delivered {
        /// Number of attempts made, including the successful one.
        attempts: u32,
    },
    /// The job exhausted its retries and was dropped.
    Failed {
        /// Number of attempts made.
        attempts: u32,
    },
}

/// An injected queue accepting notification jobs for delivery.
///
/// Implementations must guarantee at-least-once attempted delivery with
/// bounded retries, and must never propagate a delivery failure back to
/// the enqueueing caller.
pub trait NotificationQueue: Send + Sync {
    /// Accepts a job for asynchronous delivery.
    ///
    /// Returns immediately with a handle the caller may use to observe
    /// the eventual outcome; most callers just log the handle's id and
    /// drop it.
    fn enqueue(&self, job: NotificationJob) -> JobHandle;
}

// Outcome cell shared between a handle and its reporter.
type OutcomeCell = (Mutex<Option<DeliveryOutcome>>, Condvar);

/// A handle to an enqueued notification job.
///
/// Dropping the handle does not cancel the job.
#[derive(Debug, Clone)]
pub struct JobHandle {
    id: u64,
    cell: Arc<OutcomeCell>,
}

impl JobHandle {
    /// Creates a pending handle together with the reporter that resolves
    /// it.
    ///
    /// Queue implementations call this when accepting a job, keep the
    /// [`DeliveryReporter`], and hand the handle back to the caller.
    #[must_use]
    pub fn pending(id: u64) -> (Self, DeliveryReporter) {
        let cell: Arc<OutcomeCell> = Arc::new((Mutex::new(None), Condvar::new()));
        (
            Self {
                id,
                cell: Arc::clone(&cell),
            },
            DeliveryReporter { cell },
        )
    }

    /// Returns the queue-assigned job id.
    #[must_use]
    pub const fn id(&self) -> u64 {
        self.id
    }

    /// Returns the outcome if the job has already been resolved.
    #[must_use]
    pub fn outcome(&self) -> Option<DeliveryOutcome> {
        *self.cell.0.lock().expect("outcome lock poisoned")
    }

    /// Blocks until the job resolves or the timeout elapses.
    ///
    /// Returns `None` on timeout.
    #[must_use]
    pub fn wait_timeout(&self, timeout: Duration) -> Option<DeliveryOutcome> {
        let deadline = Instant::now() + timeout;
        let (lock, condvar) = &*self.cell;
        let mut outcome = lock.lock().expect("outcome lock poisoned");
        while outcome.is_none() {
            let remaining = deadline.checked_duration_since(Instant::now())?;
            let (guard, wait) = condvar
                .wait_timeout(outcome, remaining)
                .expect("outcome lock poisoned");
            outcome = guard;
            if wait.timed_out() && outcome.is_none() {
                return None;
            }
        }
        *outcome
    }
}

impl fmt::Display for JobHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "job #{}", self.id)
    }
}

/// The resolving side of a [`JobHandle`].
#[derive(Debug)]
pub struct DeliveryReporter {
    cell: Arc<OutcomeCell>,
}

impl DeliveryReporter {
    /// Records the final outcome and wakes any waiting handles.
    pub fn resolve(self, outcome: DeliveryOutcome) {
        let (lock, condvar) = &*self.cell;
        *lock.lock().expect("outcome lock poisoned") = Some(outcome);
        condvar.notify_all();
    }
}
