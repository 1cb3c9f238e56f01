//! Field selection service

use std::sync::Arc;

use namecast_domain::constants::FIELD_SELECTION_KEY;
use namecast_domain::{FieldSelection, Result, TokenFilter};
use tracing::{debug, warn};

use super::ports::SettingsStore;

/// Loads and saves the administrator's field selection
pub struct SettingsService {
    store: Arc<dyn SettingsStore>,
}

impl SettingsService {
    pub fn new(store: Arc<dyn SettingsStore>) -> Self {
        Self { store }
    }

    /// Current selection. Unset configuration reads as empty.
    pub async fn load(&self) -> Result<FieldSelection> {
        self.store.load_selection(FIELD_SELECTION_KEY, FieldSelection::empty()).await
    }

    /// Validate submitted tokens and persist the accepted ones.
    ///
    /// Unknown and duplicate tokens are dropped and reported back; they never
    /// fail the save.
    pub async fn save_tokens<S: AsRef<str>>(&self, tokens: &[S]) -> Result<TokenFilter> {
        let filter = FieldSelection::from_tokens(tokens);

        if !filter.rejected.is_empty() {
            warn!(rejected = ?filter.rejected, "Dropping invalid display-name field tokens");
        }

        self.store.save_selection(FIELD_SELECTION_KEY, &filter.selection).await?;
        debug!(fields = ?filter.selection.to_tokens(), "Saved display-name field selection");

        Ok(filter)
    }

    /// Persist an already validated selection.
    pub async fn save(&self, selection: &FieldSelection) -> Result<()> {
        self.store.save_selection(FIELD_SELECTION_KEY, selection).await
    }
}
