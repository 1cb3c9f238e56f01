//! Client-side progress loop over a batch transport

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use namecast_domain::constants::{DEFAULT_REQUEST_TIMEOUT_SECS, REQUEST_TIMEOUT_MESSAGE};
use namecast_domain::{
    BatchCursor, BatchResult, NamecastError, ProgressSnapshot, Result, UserCount,
};
use thiserror::Error;
use tracing::{info, warn};

/// Request/response channel to a batch driver.
#[async_trait]
pub trait BatchTransport: Send + Sync {
    /// User total for the progress denominator, plus the page size the
    /// driver behind this transport uses.
    async fn user_count(&self) -> Result<UserCount>;

    /// Ask the driver to process the page at `offset`.
    async fn process_page(&self, offset: u32) -> Result<BatchResult>;
}

/// Receives progress while a run is underway.
pub trait ProgressObserver: Send + Sync {
    fn on_progress(&self, _snapshot: &ProgressSnapshot) {}

    fn on_finished(&self, _outcome: &RunOutcome) {}
}

/// Observer that ignores everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl ProgressObserver for NoopObserver {}

/// How a run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    Completed { processed: u64, pages: u32 },
    /// The run stopped early; `processed` is what was done before the error.
    Failed { processed: u64, pages: u32, message: String },
}

impl RunOutcome {
    pub fn processed(&self) -> u64 {
        match self {
            Self::Completed { processed, .. } | Self::Failed { processed, .. } => *processed,
        }
    }

    pub fn pages(&self) -> u32 {
        match self {
            Self::Completed { pages, .. } | Self::Failed { pages, .. } => *pages,
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed { .. })
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReporterError {
    #[error("a batch run is already in progress")]
    AlreadyRunning,
}

/// Walks a batch run page by page, one request in flight at a time.
pub struct ProgressReporter {
    transport: Arc<dyn BatchTransport>,
    request_timeout: Duration,
    is_processing: AtomicBool,
}

impl ProgressReporter {
    pub fn new(transport: Arc<dyn BatchTransport>) -> Self {
        Self {
            transport,
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            is_processing: AtomicBool::new(false),
        }
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn is_processing(&self) -> bool {
        self.is_processing.load(Ordering::Acquire)
    }

    /// Run from offset 0 until the driver reports no more pages or a request
    /// fails.
    ///
    /// A second call while a run is active returns
    /// [`ReporterError::AlreadyRunning`]. Failures never retry; they end the
    /// run with [`RunOutcome::Failed`] carrying the count so far.
    pub async fn run(
        &self,
        observer: &dyn ProgressObserver,
    ) -> std::result::Result<RunOutcome, ReporterError> {
        let _guard = ProcessingGuard::acquire(&self.is_processing)?;

        let outcome = self.drive(observer).await;
        match &outcome {
            RunOutcome::Completed { processed, pages } => {
                info!(processed, pages, "Batch run completed");
            }
            RunOutcome::Failed { processed, pages, message } => {
                warn!(processed, pages, error = %message, "Batch run failed");
            }
        }

        observer.on_finished(&outcome);
        Ok(outcome)
    }

    async fn drive(&self, observer: &dyn ProgressObserver) -> RunOutcome {
        let count = self.bounded(self.transport.user_count()).await;
        let UserCount { total, page_size } = match count {
            Ok(count) => count,
            Err(err) => {
                return RunOutcome::Failed {
                    processed: 0,
                    pages: 0,
                    message: err.detail().to_string(),
                }
            }
        };

        // Offsets advance by the driver's page size, never a local guess.
        let mut cursor = BatchCursor::start(page_size);
        let mut processed = 0_u64;
        let mut pages = 0_u32;

        loop {
            let result = match self.bounded(self.transport.process_page(cursor.offset)).await {
                Ok(result) => result,
                Err(err) => {
                    return RunOutcome::Failed {
                        processed,
                        pages,
                        message: err.detail().to_string(),
                    }
                }
            };

            pages += 1;
            processed += u64::from(result.processed_count);
            observer.on_progress(&ProgressSnapshot { processed, total, offset: cursor.offset });

            if !result.has_more {
                return RunOutcome::Completed { processed, pages };
            }
            cursor = cursor.advance();
        }
    }

    async fn bounded<T, F>(&self, request: F) -> Result<T>
    where
        F: std::future::Future<Output = Result<T>>,
    {
        tokio::time::timeout(self.request_timeout, request)
            .await
            .map_err(|_| NamecastError::Network(REQUEST_TIMEOUT_MESSAGE.to_string()))?
    }
}

/// Holds the reporter's processing flag; clears it on drop.
struct ProcessingGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> ProcessingGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> std::result::Result<Self, ReporterError> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| ReporterError::AlreadyRunning)?;
        Ok(Self { flag })
    }
}

impl Drop for ProcessingGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}
