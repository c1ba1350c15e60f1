//! Window-close cookie purge.
//!
//! The background page keeps a cached copy of the whitelist, refreshed by
//! storage change notifications, and on every closed window deletes each
//! cookie whose domain is not covered by it. The auto-purge flag is always
//! re-read from storage so a toggle made moments earlier in the popup is
//! honoured.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use futures::future::join_all;

use crate::config::StorageLayout;
use crate::cookie::{Cookie, CookieFilter};
use crate::error::{PurgeError, StorageError};
use crate::host::{CookieStore, KeyValueStore, StorageChange};
use crate::settings::{Settings, decode_whitelist};
use crate::whitelist::is_whitelisted;

/// Cached whitelist, only ever swapped as a whole
#[derive(Default)]
pub struct WhitelistCache {
    entries: RefCell<Rc<[String]>>,
    loaded: Cell<bool>,
}

impl WhitelistCache {
    pub fn new() -> WhitelistCache {
        WhitelistCache::default()
    }

    /// Current whitelist; later swaps do not affect a snapshot already taken
    pub fn snapshot(&self) -> Rc<[String]> {
        Rc::clone(&self.entries.borrow())
    }

    pub fn replace(&self, entries: Vec<String>) {
        *self.entries.borrow_mut() = entries.into();
        self.loaded.set(true);
    }

    /// Store the startup read unless a change notification already did
    fn initialize(&self, entries: Vec<String>) {
        if !self.loaded.get() {
            self.replace(entries);
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded.get()
    }
}

/// Outcome of one purge pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PurgeReport {
    pub examined: usize,
    pub kept: usize,
    pub removed: usize,
    pub failed: usize,
}

pub struct Background<K, C> {
    store: K,
    cookies: C,
    layout: StorageLayout,
    cache: WhitelistCache,
}

impl<K: KeyValueStore, C: CookieStore> Background<K, C> {
    pub fn new(store: K, cookies: C, layout: StorageLayout) -> Self {
        Background {
            store,
            cookies,
            layout,
            cache: WhitelistCache::new(),
        }
    }

    pub fn cache(&self) -> &WhitelistCache {
        &self.cache
    }

    fn settings(&self) -> Settings<'_, K> {
        Settings::new(&self.store, &self.layout)
    }

    /// One-time whitelist read at startup
    pub async fn load_whitelist(&self) -> Result<(), StorageError> {
        let whitelist = self.settings().whitelist().await?;
        log::info!("Loaded whitelist with {} entries", whitelist.len());
        self.cache.initialize(whitelist);
        Ok(())
    }

    /// Apply a `storage.onChanged` notification to the cache
    pub fn handle_storage_change(&self, changes: &HashMap<String, StorageChange>, area: &str) {
        if area != self.layout.area {
            return;
        }
        let Some(change) = changes.get(self.layout.whitelist_key) else {
            return;
        };

        match decode_whitelist(self.layout.whitelist_key, change.new_value.clone()) {
            Ok(whitelist) => {
                log::debug!("Whitelist changed, {} entries", whitelist.len());
                self.cache.replace(whitelist);
            }
            Err(e) => log::error!("Ignoring whitelist change: {}", e),
        }
    }

    /// Handle a closed window
    ///
    /// Returns `Ok(None)` when auto-purge is disabled, in which case no
    /// cookie is enumerated. Individual removal failures are counted in the
    /// report and never stop the pass.
    pub async fn handle_window_removed(&self) -> Result<Option<PurgeReport>, PurgeError> {
        if !self.settings().auto_purge_enabled().await? {
            log::debug!("Auto-purge disabled, leaving cookies alone");
            return Ok(None);
        }

        if !self.cache.is_loaded() {
            self.load_whitelist().await?;
        }

        let cookies = self.cookies.get_all(&CookieFilter::default()).await?;
        let whitelist = self.cache.snapshot();

        let doomed: Vec<&Cookie> = cookies
            .iter()
            .filter(|cookie| !is_whitelisted(cookie.host(), &whitelist[..]))
            .collect();

        let results = join_all(doomed.iter().map(|cookie| {
            let details = cookie.removal();
            async move { self.cookies.remove(&details).await }
        }))
        .await;

        let mut report = PurgeReport {
            examined: cookies.len(),
            kept: cookies.len() - doomed.len(),
            ..PurgeReport::default()
        };
        for result in results {
            match result {
                Ok(()) => report.removed += 1,
                Err(e) => {
                    log::warn!("{}", e);
                    report.failed += 1;
                }
            }
        }

        log::info!(
            "Purged {} of {} cookies ({} kept, {} failed)",
            report.removed,
            report.examined,
            report.kept,
            report.failed
        );
        Ok(Some(report))
    }
}
