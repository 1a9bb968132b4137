//! The bundled notification queue: a worker thread with bounded retries.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use super::{DeliveryOutcome, DeliveryReporter, JobHandle, NotificationJob, NotificationQueue};

/// Error returned by a [`Mailer`] transport for a failed delivery attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryError {
    /// A description of the failure.
    pub message: String,
}

impl fmt::Display for DeliveryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for DeliveryError {}

/// A notification transport.
///
/// The spool retries a failing transport according to its
/// [`RetryPolicy`]; the transport itself should make a single attempt per
/// call.
pub trait Mailer: Send + 'static {
    /// Attempts to deliver the job once.
    ///
    /// # Errors
    ///
    /// Returns a [`DeliveryError`] describing the failed attempt.
    fn deliver(&self, job: &NotificationJob) -> Result<(), DeliveryError>;
}

/// A transport that logs messages instead of sending them.
///
/// Useful as a default when no real mail transport is wired up.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogMailer;

impl Mailer for LogMailer {
    fn deliver(&self, job: &NotificationJob) -> Result<(), DeliveryError> {
        log::info!(
            "mail to {}: {} ({} bytes)",
            job.recipients.join(", "),
            job.subject,
            job.body.len()
        );
        Ok(())
    }
}

/// Retry policy for notification delivery.
///
/// Defaults to 3 attempts with a fixed delay between them.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use innkeep::notify::RetryPolicy;
///
/// let policy = RetryPolicy::default();
/// assert_eq!(policy.max_attempts, 3);
///
/// let fast = RetryPolicy {
///     max_attempts: 2,
///     retry_delay: Duration::from_millis(10),
/// };
/// assert_eq!(fast.max_attempts, 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum delivery attempts per job (at least 1).
    pub max_attempts: u32,
    /// Fixed delay between attempts.
    pub retry_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            retry_delay: Duration::from_millis(500),
        }
    }
}

struct SpoolEntry {
    id: u64,
    job: NotificationJob,
    reporter: DeliveryReporter,
}

/// A notification queue backed by a single worker thread.
///
/// Jobs are accepted immediately and delivered in order. Each job is
/// attempted up to `max_attempts` times; after exhaustion it is logged
/// and dropped. Dropping the spool flushes the channel: the worker
/// finishes the jobs already accepted before the thread exits.
///
/// # Examples
///
/// ```
/// use innkeep::notify::{LogMailer, MailSpool, NotificationJob, NotificationQueue};
///
/// let spool = MailSpool::new(LogMailer);
/// let handle = spool.enqueue(NotificationJob {
///     subject: "Reservation Confirmation".into(),
///     body: "Hello!".into(),
///     recipients: vec!["ada@example.com".into()],
/// });
/// println!("queued {handle}");
/// spool.shutdown();
/// ```
pub struct MailSpool {
    sender: Option<mpsc::Sender<SpoolEntry>>,
    worker: Option<thread::JoinHandle<()>>,
    next_id: AtomicU64,
}

impl MailSpool {
    /// Creates a spool with the default retry policy.
    #[must_use]
    pub fn new<M: Mailer>(mailer: M) -> Self {
        Self::with_policy(mailer, RetryPolicy::default())
    }

    /// Creates a spool with an explicit retry policy.
    ///
    /// # Panics
    ///
    /// Panics if `policy.max_attempts` is zero.
    #[must_use]
    pub fn with_policy<M: Mailer>(mailer: M, policy: RetryPolicy) -> Self {
        assert!(policy.max_attempts >= 1, "max_attempts must be at least 1");

        let (sender, receiver) = mpsc::channel::<SpoolEntry>();
        let worker = thread::Builder::new()
            .name("innkeep-mail-spool".into())
            .spawn(move || Self::drain(&receiver, &mailer, policy))
            .expect("failed to spawn mail spool worker");

        Self {
            sender: Some(sender),
            worker: Some(worker),
            next_id: AtomicU64::new(1),
        }
    }

    /// Stops accepting jobs, delivers what was already queued, and joins
    /// the worker thread.
    pub fn shutdown(mut self) {
        self.close();
    }

    fn close(&mut self) {
        drop(self.sender.take());
        if let Some(worker) = self.worker.take() {
            // A panicking worker already logged its own failure.
            let _ = worker.join();
        }
    }

    fn drain(receiver: &mpsc::Receiver<SpoolEntry>, mailer: &dyn Mailer, policy: RetryPolicy) {
        while let Ok(entry) = receiver.recv() {
            let outcome = Self::deliver_with_retry(&entry, mailer, policy);
            if let DeliveryOutcome::Failed { attempts } = outcome {
                log::error!(
                    "notification job {} dropped after {attempts} attempt(s)",
                    entry.id
                );
            }
            entry.reporter.resolve(outcome);
        }
    }

    fn deliver_with_retry(
        entry: &SpoolEntry,
        mailer: &dyn Mailer,
        policy: RetryPolicy,
    ) -> DeliveryOutcome {
        let mut attempts = 0;
        loop {
            attempts += 1;
            match mailer.deliver(&entry.job) {
                Ok(()) => {
                    log::debug!(
                        "notification job {} delivered on attempt {attempts}",
                        entry.id
                    );
                    return DeliveryOutcome::Delivered { attempts };
                }
                Err(e) => {
                    log::warn!(
                        "notification job {} attempt {attempts} failed: {e}",
                        entry.id
                    );
                    if attempts >= policy.max_attempts {
                        return DeliveryOutcome::Failed { attempts };
                    }
                    thread::sleep(policy.retry_delay);
                }
            }
        }
    }
}

impl NotificationQueue for MailSpool {
    fn enqueue(&self, job: NotificationJob) -> JobHandle {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let (handle, reporter) = JobHandle::pending(id);

        let entry = SpoolEntry { id, job, reporter };
        match &self.sender {
            Some(sender) => {
                if let Err(mpsc::SendError(entry)) = sender.send(entry) {
                    log::error!("mail spool worker is gone; dropping job {id}");
                    entry.reporter.resolve(DeliveryOutcome::Failed { attempts: 0 });
                }
            }
            None => {
                log::error!("mail spool is shut down; dropping job {id}");
                entry.reporter.resolve(DeliveryOutcome::Failed { attempts: 0 });
            }
        }

        handle
    }
}

impl Drop for MailSpool {
    fn drop(&mut self) {
        self.close();
    }
}

impl fmt::Debug for MailSpool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MailSpool")
            .field("running", &self.sender.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicU32;
    use std::sync::{Arc, Mutex};

    fn sample_job() -> NotificationJob {
        NotificationJob {
            subject: "Reservation Confirmation".into(),
            body: "Hello Ada".into(),
            recipients: vec!["ada@example.com".into()],
        }
    }

    fn fast_policy(max_attempts: u32) -> RetryPolicy {
        RetryPolicy {
            max_attempts,
            retry_delay: Duration::from_millis(5),
        }
    }

    /// Records delivered jobs; fails the first `failures` attempts.
    struct FlakyMailer {
        failures: u32,
        attempts: Arc<AtomicU32>,
        delivered: Arc<Mutex<Vec<NotificationJob>>>,
    }

    impl Mailer for FlakyMailer {
        fn deliver(&self, job: &NotificationJob) -> Result<(), DeliveryError> {
            let attempt = self.attempts.fetch_add(1, Ordering::SeqCst) + 1;
            if attempt <= self.failures {
                return Err(DeliveryError {
                    message: format!("simulated failure on attempt {attempt}"),
                });
            }
            self.delivered.lock().unwrap().push(job.clone());
            Ok(())
        }
    }

    #[test]
    fn test_delivers_first_try() {
        let delivered = Arc::new(Mutex::new(Vec::new()));
        let attempts = Arc::new(AtomicU32::new(0));
        let spool = MailSpool::with_policy(
            FlakyMailer {
                failures: 0,
                attempts: Arc::clone(&attempts),
                delivered: Arc::clone(&delivered),
            },
            fast_policy(3),
        );

        let handle = spool.enqueue(sample_job());
        let outcome = handle.wait_timeout(Duration::from_secs(5)).unwrap();

        assert_eq!(outcome, DeliveryOutcome::Delivered { attempts: 1 });
        assert_eq!(delivered.lock().unwrap().len(), 1);
        spool.shutdown();
    }

    #[test]
    fn test_retries_then_delivers() {
        let delivered = Arc::new(Mutex::new(Vec::new()));
        let attempts = Arc::new(AtomicU32::new(0));
        let spool = MailSpool::with_policy(
            FlakyMailer {
                failures: 2,
                attempts: Arc::clone(&attempts),
                delivered: Arc::clone(&delivered),
            },
            fast_policy(3),
        );

        let handle = spool.enqueue(sample_job());
        let outcome = handle.wait_timeout(Duration::from_secs(5)).unwrap();

        assert_eq!(outcome, DeliveryOutcome::Delivered { attempts: 3 });
        assert_eq!(attempts.load(Ordering::SeqCst), 3);
        spool.shutdown();
    }

    #[test]
    fn test_exhausts_retries_and_drops() {
        let delivered = Arc::new(Mutex::new(Vec::new()));
        let attempts = Arc::new(AtomicU32::new(0));
        let spool = MailSpool::with_policy(
            FlakyMailer {
                failures: u32::MAX,
                attempts: Arc::clone(&attempts),
                delivered: Arc::clone(&delivered),
            },
            fast_policy(3),
        );

        let handle = spool.enqueue(sample_job());
        let outcome = handle.wait_timeout(Duration::from_secs(5)).unwrap();

        assert_eq!(outcome, DeliveryOutcome::Failed { attempts: 3 });
        assert!(delivered.lock().unwrap().is_empty());
        spool.shutdown();
    }

    #[test]
    fn test_jobs_delivered_in_order() {
        let delivered = Arc::new(Mutex::new(Vec::new()));
        let attempts = Arc::new(AtomicU32::new(0));
        let spool = MailSpool::with_policy(
            FlakyMailer {
                failures: 0,
                attempts,
                delivered: Arc::clone(&delivered),
            },
            fast_policy(1),
        );

        let mut handles = Vec::new();
        for i in 0..5 {
            let mut job = sample_job();
            job.subject = format!("message {i}");
            handles.push(spool.enqueue(job));
        }
        for handle in &handles {
            assert!(handle.wait_timeout(Duration::from_secs(5)).is_some());
        }

        let subjects: Vec<_> = delivered
            .lock()
            .unwrap()
            .iter()
            .map(|j| j.subject.clone())
            .collect();
        assert_eq!(
            subjects,
            (0..5).map(|i| format!("message {i}")).collect::<Vec<_>>()
        );
        spool.shutdown();
    }

    #[test]
    fn test_shutdown_flushes_queued_jobs() {
        let delivered = Arc::new(Mutex::new(Vec::new()));
        let attempts = Arc::new(AtomicU32::new(0));
        let spool = MailSpool::with_policy(
            FlakyMailer {
                failures: 0,
                attempts,
                delivered: Arc::clone(&delivered),
            },
            fast_policy(1),
        );

        for _ in 0..10 {
            let _handle = spool.enqueue(sample_job());
        }
        spool.shutdown();

        assert_eq!(delivered.lock().unwrap().len(), 10);
    }

    #[test]
    #[should_panic(expected = "max_attempts")]
    fn test_zero_attempts_rejected() {
        let _spool = MailSpool::with_policy(LogMailer, fast_policy(0));
    }
}
