//! Settings store port
//!
//! The settings store is a key-value collaborator. Namecast only ever uses a
//! single key holding the ordered field selection.

use async_trait::async_trait;
use namecast_domain::{FieldSelection, Result};

/// Trait for loading and saving the field selection
#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// Load the selection stored under `key`, or `default` when unset.
    async fn load_selection(&self, key: &str, default: FieldSelection) -> Result<FieldSelection>;

    /// Replace the selection stored under `key` (last writer wins).
    async fn save_selection(&self, key: &str, selection: &FieldSelection) -> Result<()>;
}
