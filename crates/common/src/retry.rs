//! Bounded-retry combinator
//!
//! Multi-step setup against the running application sometimes races the
//! backend (a just-submitted record not yet visible). Those steps are wrapped
//! in a bounded retry with an increasing delay schedule; when the schedule is
//! exhausted the last underlying failure is surfaced, labelled.

use std::future::Future;
use std::time::Duration;

use tracing::{debug, warn};

use crate::error::{Error, Result};

/// Delay schedule between attempts; attempt count is `delays.len() + 1`
#[derive(Debug, Clone)]
pub struct RetrySchedule {
    pub delays: Vec<Duration>,
}

impl Default for RetrySchedule {
    fn default() -> Self {
        Self {
            delays: vec![Duration::from_secs(1), Duration::from_secs(2)],
        }
    }
}

impl RetrySchedule {
    /// A schedule with no sleeps, for unit tests.
    pub fn immediate(attempts: usize) -> Self {
        Self {
            delays: vec![Duration::ZERO; attempts.saturating_sub(1)],
        }
    }

    pub fn attempts(&self) -> usize {
        self.delays.len() + 1
    }
}

/// Run `op` until it succeeds or the schedule is exhausted.
pub async fn retry<T, F, Fut>(label: &str, schedule: &RetrySchedule, mut op: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let attempts = schedule.attempts();
    let mut last = None;

    for (attempt, delay) in std::iter::once(None)
        .chain(schedule.delays.iter().map(Some))
        .enumerate()
    {
        if let Some(delay) = delay {
            tokio::time::sleep(*delay).await;
        }
        match op().await {
            Ok(value) => {
                if attempt > 0 {
                    debug!(label, attempt = attempt + 1, "succeeded after retry");
                }
                return Ok(value);
            }
            Err(e) => {
                warn!(label, attempt = attempt + 1, attempts, error = %e, "attempt failed");
                last = Some(e);
            }
        }
    }

    Err(Error::RetriesExhausted {
        label: label.to_string(),
        attempts,
        last: last.map(|e| e.to_string()).unwrap_or_default(),
    })
}
