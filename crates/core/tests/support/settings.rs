use std::collections::HashMap;

use async_trait::async_trait;
use namecast_core::SettingsStore;
use namecast_domain::constants::FIELD_SELECTION_KEY;
use namecast_domain::{FieldSelection, Result as DomainResult};
use parking_lot::Mutex;

/// In-memory mock for `SettingsStore`.
#[derive(Default)]
pub struct InMemorySettingsStore {
    values: Mutex<HashMap<String, FieldSelection>>,
}

impl InMemorySettingsStore {
    pub fn with_selection(selection: FieldSelection) -> Self {
        let store = Self::default();
        store.values.lock().insert(FIELD_SELECTION_KEY.to_string(), selection);
        store
    }

    pub fn stored(&self) -> Option<FieldSelection> {
        self.values.lock().get(FIELD_SELECTION_KEY).cloned()
    }
}

#[async_trait]
impl SettingsStore for InMemorySettingsStore {
    async fn load_selection(
        &self,
        key: &str,
        default: FieldSelection,
    ) -> DomainResult<FieldSelection> {
        Ok(self.values.lock().get(key).cloned().unwrap_or(default))
    }

    async fn save_selection(&self, key: &str, selection: &FieldSelection) -> DomainResult<()> {
        self.values.lock().insert(key.to_string(), selection.clone());
        Ok(())
    }
}
