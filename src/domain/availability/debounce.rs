//! Debounced, cancelable checks
//!
//! Every scheduled check gets a [`CheckToken`]. A single-slot
//! [`LatestToken`] register remembers the most recently issued token, and a
//! result is applied only while its token is still the latest one. Older
//! results are dropped even when they resolve after newer ones.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::trace;

/// Quiet period after the last edit before a lookup is issued
pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(500);

/// Identifies one scheduled check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckToken(u64);

/// Single-slot register holding the latest issued token
#[derive(Debug, Default)]
pub struct LatestToken {
    generation: AtomicU64,
}

impl LatestToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a new token, superseding every earlier one
    pub fn issue(&self) -> CheckToken {
        CheckToken(self.generation.fetch_add(1, Ordering::AcqRel) + 1)
    }

    pub fn is_current(&self, token: CheckToken) -> bool {
        self.generation.load(Ordering::Acquire) == token.0
    }

    /// Supersede every issued token without handing out a new one
    pub fn invalidate(&self) {
        self.generation.fetch_add(1, Ordering::AcqRel);
    }
}

/// Handle given to a scheduled task for applying its result
#[derive(Debug, Clone)]
pub struct Ticket {
    token: CheckToken,
    latest: Arc<LatestToken>,
    commit: Arc<Mutex<()>>,
}

impl Ticket {
    pub fn token(&self) -> CheckToken {
        self.token
    }

    pub fn is_current(&self) -> bool {
        self.latest.is_current(self.token)
    }

    /// Run `apply` only if this ticket is still the latest one
    ///
    /// The check and the update happen under the same lock that guards
    /// token issuance, so a superseded ticket can never apply after its
    /// successor was issued. Returns whether `apply` ran.
    pub fn commit<F: FnOnce()>(&self, apply: F) -> bool {
        let _guard = self.commit.lock().unwrap_or_else(PoisonError::into_inner);

        if !self.latest.is_current(self.token) {
            trace!(token = self.token.0, "Discarding superseded result");
            return false;
        }

        apply();
        true
    }
}

/// Delays work until input has been quiet, keeping only the latest request
///
/// Must be used from within a Tokio runtime.
#[derive(Debug)]
pub struct Debouncer {
    quiet_period: Duration,
    latest: Arc<LatestToken>,
    commit: Arc<Mutex<()>>,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_QUIET_PERIOD)
    }
}

impl Debouncer {
    pub fn new(quiet_period: Duration) -> Self {
        Self {
            quiet_period,
            latest: Arc::new(LatestToken::new()),
            commit: Arc::new(Mutex::new(())),
            pending: Mutex::new(None),
        }
    }

    pub fn quiet_period(&self) -> Duration {
        self.quiet_period
    }

    /// Schedule a task to run after the quiet period
    ///
    /// Any previously scheduled task is superseded: it is aborted, and if it
    /// is already running its results are rejected by [`Ticket::commit`].
    pub fn schedule<F, W>(&self, task: F) -> CheckToken
    where
        F: FnOnce(Ticket) -> W,
        W: Future<Output = ()> + Send + 'static,
    {
        let ticket = self.issue_ticket();
        let token = ticket.token();
        let gate = ticket.clone();
        let work = task(ticket);
        let quiet_period = self.quiet_period;

        let handle = tokio::spawn(async move {
            tokio::time::sleep(quiet_period).await;

            if gate.is_current() {
                work.await;
            }
        });

        if let Some(previous) = self.replace_pending(Some(handle)) {
            previous.abort();
        }

        token
    }

    /// Supersede and abort whatever is scheduled or in flight
    pub fn cancel(&self) {
        {
            let _guard = self.commit.lock().unwrap_or_else(PoisonError::into_inner);
            self.latest.invalidate();
        }

        if let Some(previous) = self.replace_pending(None) {
            previous.abort();
        }
    }

    pub fn is_current(&self, token: CheckToken) -> bool {
        self.latest.is_current(token)
    }

    fn issue_ticket(&self) -> Ticket {
        let _guard = self.commit.lock().unwrap_or_else(PoisonError::into_inner);

        Ticket {
            token: self.latest.issue(),
            latest: Arc::clone(&self.latest),
            commit: Arc::clone(&self.commit),
        }
    }

    fn replace_pending(&self, handle: Option<JoinHandle<()>>) -> Option<JoinHandle<()>> {
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *pending, handle)
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        if let Some(pending) = self.replace_pending(None) {
            pending.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recorder() -> Arc<Mutex<Vec<String>>> {
        Arc::new(Mutex::new(Vec::new()))
    }

    #[test]
    fn test_latest_token_register() {
        let latest = LatestToken::new();
        let first = latest.issue();
        assert!(latest.is_current(first));

        let second = latest.issue();
        assert!(!latest.is_current(first));
        assert!(latest.is_current(second));

        latest.invalidate();
        assert!(!latest.is_current(second));
    }

    #[tokio::test(start_paused = true)]
    async fn test_rapid_edits_issue_single_lookup() {
        let debouncer = Debouncer::default();
        let lookups = recorder();

        for value in ["a", "ab", "abc"] {
            let lookups = Arc::clone(&lookups);
            debouncer.schedule(move |_ticket| async move {
                lookups.lock().unwrap().push(value.to_string());
            });
            tokio::time::sleep(Duration::from_millis(100)).await;
        }

        tokio::time::sleep(Duration::from_millis(600)).await;
        assert_eq!(*lookups.lock().unwrap(), vec!["abc".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_nothing_runs_before_quiet_period() {
        let debouncer = Debouncer::default();
        let lookups = recorder();

        let recorded = Arc::clone(&lookups);
        debouncer.schedule(move |_ticket| async move {
            recorded.lock().unwrap().push("abc".to_string());
        });

        tokio::time::sleep(Duration::from_millis(499)).await;
        assert!(lookups.lock().unwrap().is_empty());

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert_eq!(lookups.lock().unwrap().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_drops_pending_work() {
        let debouncer = Debouncer::default();
        let lookups = recorder();

        let recorded = Arc::clone(&lookups);
        let token = debouncer.schedule(move |_ticket| async move {
            recorded.lock().unwrap().push("abc".to_string());
        });
        debouncer.cancel();

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert!(lookups.lock().unwrap().is_empty());
        assert!(!debouncer.is_current(token));
    }

    #[tokio::test(start_paused = true)]
    async fn test_superseded_ticket_cannot_commit() {
        let debouncer = Debouncer::new(Duration::ZERO);
        let applied = recorder();
        let (release_tx, release_rx) = tokio::sync::oneshot::channel::<()>();
        let (ticket_tx, ticket_rx) = tokio::sync::oneshot::channel::<Ticket>();

        // Smuggle the first ticket out so it outlives its aborted task
        debouncer.schedule(move |ticket| {
            let _ = ticket_tx.send(ticket);
            async move {
                let _ = release_rx.await;
            }
        });
        let stale = ticket_rx.await.unwrap();

        let recorded = Arc::clone(&applied);
        debouncer.schedule(move |ticket| async move {
            ticket.commit(|| recorded.lock().unwrap().push("fresh".to_string()));
        });
        tokio::time::sleep(Duration::from_millis(10)).await;

        let recorded = Arc::clone(&applied);
        assert!(!stale.commit(|| recorded.lock().unwrap().push("stale".to_string())));
        drop(release_tx);

        assert_eq!(*applied.lock().unwrap(), vec!["fresh".to_string()]);
    }
}
