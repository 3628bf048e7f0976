//! Cancellable delayed search scheduling.
//!
//! Each `submit` replaces whatever was pending and restarts the quiet
//! period, so rapid keystrokes coalesce and only the most recent query is
//! ever searched. The ordering guarantee is "last scheduled wins", not
//! "all keystrokes processed".

use std::time::Duration;
use tokio::time::Instant;

pub struct SearchDebouncer {
    delay: Duration,
    pending: Option<(String, Instant)>,
}

impl SearchDebouncer {
    pub fn new(delay: Duration) -> Self {
        Self { delay, pending: None }
    }

    /// Schedule `query`, discarding any superseded pending query.
    pub fn submit(&mut self, query: &str) {
        self.pending = Some((query.to_string(), Instant::now() + self.delay));
    }

    pub fn is_armed(&self) -> bool {
        self.pending.is_some()
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Wait out the quiet period and yield the pending query.
    ///
    /// Cancellation-safe: the pending slot is only consumed once the sleep
    /// has elapsed, so dropping this future (a `select!` losing the race)
    /// keeps the query scheduled. Never resolves while nothing is armed.
    pub async fn fire(&mut self) -> String {
        loop {
            match self.pending.as_ref() {
                Some((_, deadline)) => {
                    let deadline = *deadline;
                    tokio::time::sleep_until(deadline).await;
                    if let Some((query, _)) = self.pending.take() {
                        return query;
                    }
                }
                None => std::future::pending::<()>().await,
            }
        }
    }
}
