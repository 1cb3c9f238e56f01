//! Batch re-processing wire and progress types

use serde::{Deserialize, Serialize};

/// Client-held position within a batch run.
///
/// Never persisted server-side; each page request carries its own offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchCursor {
    pub offset: u32,
    pub page_size: u32,
}

impl BatchCursor {
    /// Cursor at the start of a run. A zero page size is bumped to one.
    pub fn start(page_size: u32) -> Self {
        Self { offset: 0, page_size: page_size.max(1) }
    }

    /// Cursor for the page after this one.
    #[must_use]
    pub fn advance(self) -> Self {
        Self { offset: self.offset.saturating_add(self.page_size), ..self }
    }
}

/// Outcome of processing one page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchResult {
    /// Users whose display name was written on this page.
    pub processed_count: u32,
    /// Whether the page came back full, so another page may follow.
    pub has_more: bool,
}

/// Body of a batch page request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchRequest {
    #[serde(default)]
    pub offset: u32,
}

/// Body of a batch page response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BatchResponse {
    Success(BatchResult),
    #[serde(rename_all = "camelCase")]
    Failure {
        error_message: String,
    },
}

impl BatchResponse {
    pub fn failure(message: impl Into<String>) -> Self {
        Self::Failure { error_message: message.into() }
    }
}

/// Body of the user-count response: the progress denominator and the page
/// size the server's driver walks with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserCount {
    pub total: u64,
    pub page_size: u32,
}

/// Running totals reported while a batch run progresses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressSnapshot {
    pub processed: u64,
    pub total: u64,
    /// Offset of the page that produced this snapshot.
    pub offset: u32,
}

impl ProgressSnapshot {
    /// Completion ratio in percent, clamped to `[0, 100]`.
    ///
    /// An unknown or zero total reports 0.
    pub fn percentage(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        #[allow(clippy::cast_precision_loss)]
        let ratio = self.processed as f64 / self.total as f64 * 100.0;
        ratio.clamp(0.0, 100.0)
    }
}
