// ABOUTME: Minimum-interval spacing between consecutive call starts.
// ABOUTME: Tracks the last start time and sleeps out any remaining gap.

use std::time::{Duration, Instant};

use tokio::sync::Mutex;
use tracing::debug;

/// Mutable pacing state, protected by a single mutex.
struct PacerState {
    last_start: Option<Instant>,
}

/// Enforces a minimum gap between the start times of consecutive calls.
///
/// Spacing is measured start-to-start: a slow call does not widen the gap
/// for the call after it, and a fast call cannot shrink it. The first call
/// through a fresh pacer never waits.
pub struct Pacer {
    state: Mutex<PacerState>,
    min_interval: Duration,
}

impl Pacer {
    /// Create a pacer enforcing `min_interval` between call starts.
    pub fn new(min_interval: Duration) -> Self {
        Self {
            state: Mutex::new(PacerState { last_start: None }),
            min_interval,
        }
    }

    /// Wait until the next call may start, then record the start time.
    ///
    /// Returns immediately when at least `min_interval` has passed since
    /// the previous recorded start. The start time is recorded just before
    /// returning, so it marks the invocation, not the completion, of the
    /// paced call.
    pub async fn pace(&self) {
        let mut state = self.state.lock().await;

        if let Some(last) = state.last_start {
            let elapsed = last.elapsed();
            if elapsed < self.min_interval {
                let wait = self.min_interval - elapsed;
                debug!(wait_ms = wait.as_millis() as u64, "pacing next call");
                // Drop the lock before sleeping so other tasks aren't blocked
                drop(state);
                tokio::time::sleep(wait).await;
                state = self.state.lock().await;
            }
        }

        state.last_start = Some(Instant::now());
    }

    /// Minimum configured gap between call starts.
    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }
}
