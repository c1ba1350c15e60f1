/// Popup-side whitelist editing: add, remove, toggle, reload

use crate::config::StorageLayout;
use crate::domain::suggest_entry;
use crate::error::{EditorError, StorageError};
use crate::host::KeyValueStore;
use crate::settings::Settings;
use crate::whitelist::{parse_input, plan_additions, plan_removal};

/// Everything the popup renders, always read back from storage
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EditorSnapshot {
    pub enabled: bool,
    /// Sorted for display
    pub whitelist: Vec<String>,
}

impl EditorSnapshot {
    /// The whitelist section is only shown while auto-purge is on
    pub fn whitelist_visible(&self) -> bool {
        self.enabled
    }
}

pub struct WhitelistEditor<'a, S: KeyValueStore + ?Sized> {
    settings: Settings<'a, S>,
}

impl<'a, S: KeyValueStore + ?Sized> WhitelistEditor<'a, S> {
    pub fn new(store: &'a S, layout: &'a StorageLayout) -> Self {
        WhitelistEditor {
            settings: Settings::new(store, layout),
        }
    }

    pub async fn snapshot(&self) -> Result<EditorSnapshot, StorageError> {
        let enabled = self.settings.auto_purge_enabled().await?;
        let mut whitelist = self.settings.whitelist().await?;
        whitelist.sort();
        Ok(EditorSnapshot { enabled, whitelist })
    }

    /// Add one domain or a comma-separated batch
    ///
    /// Returns the entries that were added. Blank input adds nothing and
    /// writes nothing.
    pub async fn add(&self, input: &str) -> Result<Vec<String>, EditorError> {
        let candidates = parse_input(input);
        if candidates.is_empty() {
            return Ok(candidates);
        }

        let current = self.settings.whitelist().await?;
        let updated = plan_additions(&current, &candidates)?;
        self.settings.set_whitelist(&updated).await?;

        log::info!("Whitelisted {}", candidates.join(", "));
        Ok(candidates)
    }

    /// Remove `domain`; removing an absent domain still rewrites the record unchanged
    pub async fn remove(&self, domain: &str) -> Result<(), StorageError> {
        let current = self.settings.whitelist().await?;
        let updated = plan_removal(&current, domain);
        self.settings.set_whitelist(&updated).await?;

        log::info!("Removed {} from whitelist", domain);
        Ok(())
    }

    /// Flip auto-purge and return the new state
    pub async fn toggle(&self) -> Result<bool, StorageError> {
        let enabled = !self.settings.auto_purge_enabled().await?;
        self.settings.set_auto_purge_enabled(enabled).await?;

        log::info!("Auto-purge {}", if enabled { "enabled" } else { "disabled" });
        Ok(enabled)
    }

    /// Entry to pre-fill for the page at `url`, unless it is already whitelisted
    pub async fn suggestion(&self, url: &str) -> Result<Option<String>, StorageError> {
        let Some(candidate) = suggest_entry(url) else {
            return Ok(None);
        };

        let whitelist = self.settings.whitelist().await?;
        Ok((!whitelist.contains(&candidate)).then_some(candidate))
    }
}
