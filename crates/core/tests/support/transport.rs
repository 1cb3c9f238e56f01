use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use namecast_core::{BatchDriver, BatchTransport, ProgressObserver, RunOutcome, UserStore};
use namecast_domain::constants::DEFAULT_PAGE_SIZE;
use namecast_domain::{BatchResult, ProgressSnapshot, Result as DomainResult, UserCount};
use parking_lot::Mutex;
use tokio::sync::Notify;

/// Transport that calls a [`BatchDriver`] in-process.
pub struct DriverTransport {
    pub driver: BatchDriver,
    pub users: Arc<dyn UserStore>,
}

#[async_trait]
impl BatchTransport for DriverTransport {
    async fn user_count(&self) -> DomainResult<UserCount> {
        let total = self.users.count_users().await?;
        Ok(UserCount { total, page_size: self.driver.page_size() })
    }

    async fn process_page(&self, offset: u32) -> DomainResult<BatchResult> {
        self.driver.run_page(offset).await
    }
}

/// Transport replaying canned page results.
///
/// Once the script runs out every page reports an empty final page.
#[derive(Default)]
pub struct ScriptedTransport {
    total: u64,
    page_size: u32,
    pages: Mutex<VecDeque<DomainResult<BatchResult>>>,
    offsets: Mutex<Vec<u32>>,
    hold: Mutex<Option<Arc<Notify>>>,
    delay: Option<Duration>,
}

impl ScriptedTransport {
    pub fn new(total: u64, pages: Vec<DomainResult<BatchResult>>) -> Self {
        Self {
            total,
            page_size: DEFAULT_PAGE_SIZE,
            pages: Mutex::new(pages.into()),
            ..Self::default()
        }
    }

    /// Block the first `user_count` call until `release` is notified.
    pub fn held_by(self, release: Arc<Notify>) -> Self {
        *self.hold.lock() = Some(release);
        self
    }

    /// Sleep before answering each page.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn offsets(&self) -> Vec<u32> {
        self.offsets.lock().clone()
    }
}

#[async_trait]
impl BatchTransport for ScriptedTransport {
    async fn user_count(&self) -> DomainResult<UserCount> {
        let hold = self.hold.lock().take();
        if let Some(release) = hold {
            release.notified().await;
        }
        Ok(UserCount { total: self.total, page_size: self.page_size })
    }

    async fn process_page(&self, offset: u32) -> DomainResult<BatchResult> {
        self.offsets.lock().push(offset);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        let next = self.pages.lock().pop_front();
        next.unwrap_or(Ok(BatchResult { processed_count: 0, has_more: false }))
    }
}

/// Observer recording every snapshot and the final outcome.
#[derive(Default)]
pub struct RecordingObserver {
    pub snapshots: Mutex<Vec<ProgressSnapshot>>,
    pub finished: Mutex<Option<RunOutcome>>,
}

impl ProgressObserver for RecordingObserver {
    fn on_progress(&self, snapshot: &ProgressSnapshot) {
        self.snapshots.lock().push(*snapshot);
    }

    fn on_finished(&self, outcome: &RunOutcome) {
        *self.finished.lock() = Some(outcome.clone());
    }
}
