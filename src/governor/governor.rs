// ABOUTME: Call governor serializing access to a rate-limited remote API.
// ABOUTME: Queues submitted operations FIFO and retries rate-limited failures.

use std::collections::VecDeque;
use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use futures::future::BoxFuture;
use tokio::sync::oneshot;
use tracing::debug;

use super::pacing::Pacer;
use super::retry::{RetryPolicy, ThrottleError};

/// Configuration for a call governor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GovernorConfig {
    /// Minimum gap between the start times of consecutive calls.
    pub min_interval: Duration,
    /// Retries allowed per submission, counted only against rate limits.
    pub max_retries: u32,
    /// Backoff applied when a rate-limit error carries no suggested wait.
    pub default_backoff: Duration,
}

impl Default for GovernorConfig {
    fn default() -> Self {
        Self {
            min_interval: Duration::from_millis(100),
            max_retries: 3,
            default_backoff: Duration::from_secs(1),
        }
    }
}

/// A queued unit of work. Runs one submitted operation to settlement and
/// delivers the outcome through its oneshot channel.
type Job = BoxFuture<'static, ()>;

/// Queue state protected by a single mutex. The lock is never held across
/// an await point.
struct QueueState {
    jobs: VecDeque<Job>,
    /// True while a drain task is consuming the queue.
    processing: bool,
}

/// Call governor for a shared rate-limited resource.
///
/// Submitted operations execute strictly one at a time, in submission
/// order, with a minimum gap between consecutive start times. An operation
/// that fails with a rate-limit signal is retried with backoff before the
/// next queued operation starts.
///
/// # Sharing
///
/// Cloning is cheap; clones share the same queue and pacing state. Hand a
/// clone to every caller that talks to the governed resource.
#[derive(Clone)]
pub struct Governor {
    inner: Arc<GovernorInner>,
}

struct GovernorInner {
    queue: Mutex<QueueState>,
    pacer: Arc<Pacer>,
    policy: RetryPolicy,
}

impl Governor {
    /// Create a governor with the given configuration.
    pub fn new(config: GovernorConfig) -> Self {
        Self {
            inner: Arc::new(GovernorInner {
                queue: Mutex::new(QueueState {
                    jobs: VecDeque::new(),
                    processing: false,
                }),
                pacer: Arc::new(Pacer::new(config.min_interval)),
                policy: RetryPolicy {
                    max_retries: config.max_retries,
                    default_backoff: config.default_backoff,
                },
            }),
        }
    }

    /// Submit an operation for governed execution.
    ///
    /// The operation is appended to the queue immediately and invoked once
    /// every call ahead of it, including retries, has settled. The returned
    /// future resolves with the operation's own success value, or with the
    /// final error once the retry budget is exhausted; the error is never
    /// wrapped or transformed.
    ///
    /// The operation is a closure so it can be re-invoked on retry; each
    /// attempt gets a fresh future.
    ///
    /// Dropping the returned future abandons the result only - the queued
    /// call still executes in order. There is no per-operation timeout; a
    /// hanging operation blocks the queue, so wrap the operation in
    /// [`tokio::time::timeout`] if that matters to you.
    ///
    /// Must be called from within a Tokio runtime.
    ///
    /// # Arguments
    ///
    /// * `operation` - Zero-argument closure producing the call's future.
    pub fn submit<F, Fut, T, E>(&self, operation: F) -> BoxFuture<'static, Result<T, E>>
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
        T: Send + 'static,
        E: ThrottleError + Send + 'static,
    {
        let (tx, rx) = oneshot::channel();
        let pacer = Arc::clone(&self.inner.pacer);
        let policy = self.inner.policy;

        let job: Job = Box::pin(async move {
            let result = run_with_retry(&pacer, policy, operation).await;
            // Caller may have dropped the receiver; the outcome is discarded then.
            let _ = tx.send(result);
        });

        let start_drain = {
            let mut state = self.inner.queue.lock().unwrap();
            state.jobs.push_back(job);
            if state.processing {
                false
            } else {
                state.processing = true;
                true
            }
        };

        if start_drain {
            tokio::spawn(drain(Arc::clone(&self.inner)));
        }

        Box::pin(async move {
            rx.await
                .expect("governor drain task dropped a queued call")
        })
    }
}

impl Default for Governor {
    fn default() -> Self {
        Self::new(GovernorConfig::default())
    }
}

/// Consume queued jobs one at a time until the queue is empty.
///
/// Each job is awaited to full settlement, retries included, before the
/// next is dequeued. The `processing` flag is cleared only when the queue
/// is observed empty under the lock, so at most one drain task exists at
/// any time.
async fn drain(inner: Arc<GovernorInner>) {
    loop {
        let job = {
            let mut state = inner.queue.lock().unwrap();
            match state.jobs.pop_front() {
                Some(job) => job,
                None => {
                    state.processing = false;
                    return;
                }
            }
        };
        job.await;
    }
}

/// Run one operation to settlement, pacing every attempt and retrying
/// rate-limited failures up to the policy budget.
async fn run_with_retry<F, Fut, T, E>(
    pacer: &Pacer,
    policy: RetryPolicy,
    mut operation: F,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: ThrottleError,
{
    let mut retries_left = policy.max_retries;

    loop {
        pacer.pace().await;

        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) if err.is_rate_limited() && retries_left > 0 => {
                let backoff = policy.backoff_for(&err);
                debug!(
                    backoff_ms = backoff.as_millis() as u64,
                    retries_left, "rate limited, backing off"
                );
                tokio::time::sleep(backoff).await;
                retries_left -= 1;
            }
            Err(err) => return Err(err),
        }
    }
}
