//! Batch driver - processes one page of users per call
//!
//! The driver is stateless between calls: the caller carries the offset and
//! decides whether to ask for the next page. Ordering comes from the user
//! store (ascending id), which keeps the offset meaningful across requests.

use std::sync::Arc;

use namecast_domain::constants::DEFAULT_PAGE_SIZE;
use namecast_domain::{BatchResult, NamecastError, Result};
use tracing::{info, instrument};

use crate::naming::{DisplayNameService, UpdateContext};
use crate::user::UserStore;

/// Re-applies the display-name rule to one page of users at a time.
pub struct BatchDriver {
    users: Arc<dyn UserStore>,
    service: Arc<DisplayNameService>,
    page_size: u32,
    force_update: bool,
}

impl BatchDriver {
    pub fn new(users: Arc<dyn UserStore>, service: Arc<DisplayNameService>) -> Self {
        Self { users, service, page_size: DEFAULT_PAGE_SIZE, force_update: true }
    }

    /// Override the page size. Zero is bumped to one.
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Batch runs force writes by default; disable to skip unchanged names.
    pub fn with_force_update(mut self, force: bool) -> Self {
        self.force_update = force;
        self
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Process the page starting at `offset`.
    ///
    /// Fails without fetching anything when no fields are selected. Per-user
    /// write failures are logged and left out of the count; a failed page
    /// fetch fails the whole call.
    #[instrument(skip(self), fields(page_size = self.page_size, force = self.force_update))]
    pub async fn run_page(&self, offset: u32) -> Result<BatchResult> {
        let selection = self.service.selection().await?;
        if selection.is_empty() {
            return Err(NamecastError::no_fields_selected());
        }

        let page = self.users.list_users(self.page_size, offset).await.map_err(|err| {
            NamecastError::Store(format!("Processing error: {}", err.detail()))
        })?;

        let ctx = UpdateContext::root();
        let mut processed_count = 0_u32;
        for user in &page {
            if self.service.apply_to_record(&ctx, user, &selection, self.force_update).await {
                processed_count += 1;
            }
        }

        let fetched = u32::try_from(page.len()).unwrap_or(u32::MAX);
        let has_more = fetched == self.page_size;

        info!(fetched, processed_count, has_more, "Processed batch page");

        Ok(BatchResult { processed_count, has_more })
    }
}
