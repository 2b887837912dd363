//! Session runtime
//!
//! Runs the navigator's commands against a repository. Each request is a tokio
//! task that reports back over a channel; the session feeds those completions
//! into the navigator on the caller's task, so view state is only ever touched
//! from one place.

use crate::api::ContentRepository;
use crate::state::{Command, Intent, Navigator, RequestToken, ViewState};
use crate::{ApiError, ApiResult};
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Navigator plus the machinery to execute its commands
pub struct Session<R: ContentRepository + 'static> {
    navigator: Navigator,
    repository: Arc<R>,
    timeout: Duration,
    pending: HashMap<RequestToken, JoinHandle<()>>,
    tx: mpsc::UnboundedSender<Intent>,
    rx: mpsc::UnboundedReceiver<Intent>,
}

impl<R: ContentRepository + 'static> Session<R> {
    /// Creates a session
    ///
    /// # Arguments
    ///
    /// * `navigator` - Owner of the view state
    /// * `repository` - Where requests go
    /// * `timeout` - Upper bound on each repository call, not counting any
    ///   scheduled delay before it
    pub fn new(navigator: Navigator, repository: Arc<R>, timeout: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            navigator,
            repository,
            timeout,
            pending: HashMap::new(),
            tx,
            rx,
        }
    }

    pub fn state(&self) -> &ViewState {
        self.navigator.state()
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    /// Number of requests started and not yet applied
    pub fn pending_requests(&self) -> usize {
        self.pending.len()
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Applies an intent and starts whatever it asks for
    ///
    /// Must be called from within a tokio runtime.
    pub fn dispatch(&mut self, intent: Intent) {
        if let Some(token) = intent.token() {
            self.pending.remove(&token);
        }

        for command in self.navigator.dispatch(intent) {
            self.execute(command);
        }
    }

    /// Waits for the next completion without applying it
    ///
    /// Pending forever when nothing is in flight, which makes it safe to use
    /// as a `tokio::select!` branch guarded by [`Session::has_pending`].
    pub async fn recv_completion(&mut self) -> Option<Intent> {
        self.rx.recv().await
    }

    /// Waits for one completion and applies it
    ///
    /// Returns false without waiting if nothing is in flight.
    pub async fn process_next(&mut self) -> bool {
        if let Ok(intent) = self.rx.try_recv() {
            self.dispatch(intent);
            return true;
        }

        // Tasks that died without reporting would otherwise be waited on forever
        self.pending.retain(|_, handle| !handle.is_finished());
        if self.pending.is_empty() {
            // a finished task has always sent before finishing
            return match self.rx.try_recv() {
                Ok(intent) => {
                    self.dispatch(intent);
                    true
                }
                Err(_) => false,
            };
        }

        match self.rx.recv().await {
            Some(intent) => {
                self.dispatch(intent);
                true
            }
            None => false,
        }
    }

    /// Applies completions until nothing is in flight
    pub async fn settle(&mut self) {
        while self.process_next().await {}
    }

    fn execute(&mut self, command: Command) {
        match command {
            Command::Cancel(token) => {
                if let Some(handle) = self.pending.remove(&token) {
                    tracing::debug!("Cancelling request {}", token);
                    handle.abort();
                }
            }
            Command::Search { token, query } => {
                let repository = Arc::clone(&self.repository);
                let timeout = self.timeout;
                self.spawn(token, async move {
                    let outcome =
                        with_timeout(timeout, repository.search_influencers(&query)).await;
                    Intent::SearchCompleted {
                        token,
                        query,
                        outcome,
                    }
                });
            }
            Command::FetchPosts {
                token,
                account_id,
                page,
                limit,
                delay,
            } => {
                let repository = Arc::clone(&self.repository);
                let timeout = self.timeout;
                self.spawn(token, async move {
                    if let Some(delay) = delay {
                        tokio::time::sleep(delay).await;
                    }
                    let outcome =
                        with_timeout(timeout, repository.list_posts(&account_id, page, limit))
                            .await;
                    Intent::PageLoaded {
                        token,
                        page,
                        outcome,
                    }
                });
            }
            Command::Crawl {
                token,
                username,
                max_collect_count,
            } => {
                let repository = Arc::clone(&self.repository);
                let timeout = self.timeout;
                self.spawn(token, async move {
                    let outcome = with_timeout(
                        timeout,
                        repository.trigger_crawl(&username, max_collect_count),
                    )
                    .await;
                    Intent::CrawlCompleted { token, outcome }
                });
            }
        }
    }

    fn spawn<F>(&mut self, token: RequestToken, request: F)
    where
        F: Future<Output = Intent> + Send + 'static,
    {
        let tx = self.tx.clone();
        let handle = tokio::spawn(async move {
            // receiver outlives every task it could care about
            let _ = tx.send(request.await);
        });
        self.pending.insert(token, handle);
    }
}

impl<R: ContentRepository + 'static> Drop for Session<R> {
    fn drop(&mut self) {
        for (_, handle) in self.pending.drain() {
            handle.abort();
        }
    }
}

/// Bounds a repository call, mapping expiry to [`ApiError::Timeout`]
async fn with_timeout<T, F>(timeout: Duration, request: F) -> ApiResult<T>
where
    F: Future<Output = ApiResult<T>>,
{
    match tokio::time::timeout(timeout, request).await {
        Ok(outcome) => outcome,
        Err(_) => Err(ApiError::Timeout {
            millis: timeout.as_millis() as u64,
        }),
    }
}
