/// In-memory host fakes for tests
use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;

use super::{CookieStore, KeyValueStore};
use crate::cookie::{Cookie, CookieFilter, RemovalDetails};
use crate::error::{CookieError, StorageError};

#[derive(Default)]
pub struct MemoryStore {
    records: RefCell<HashMap<String, Value>>,
    fail_reads: Cell<bool>,
    fail_writes: Cell<bool>,
    writes: Cell<usize>,
}

impl MemoryStore {
    pub fn new() -> MemoryStore {
        MemoryStore::default()
    }

    pub fn with(records: &[(&str, Value)]) -> MemoryStore {
        let store = MemoryStore::new();
        for (key, value) in records {
            store.records.borrow_mut().insert(key.to_string(), value.clone());
        }
        store
    }

    pub fn record(&self, key: &str) -> Option<Value> {
        self.records.borrow().get(key).cloned()
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.set(fail);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }

    pub fn write_count(&self) -> usize {
        self.writes.get()
    }
}

#[async_trait(?Send)]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Value>, StorageError> {
        if self.fail_reads.get() {
            return Err(StorageError::Host("read refused".to_string()));
        }
        Ok(self.record(key))
    }

    async fn set(&self, key: &str, value: Value) -> Result<(), StorageError> {
        if self.fail_writes.get() {
            return Err(StorageError::Host("QUOTA_BYTES quota exceeded".to_string()));
        }
        self.writes.set(self.writes.get() + 1);
        self.records.borrow_mut().insert(key.to_string(), value);
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryCookies {
    cookies: RefCell<Vec<Cookie>>,
    /// Names whose removal the fake rejects
    failing: RefCell<Vec<String>>,
    fail_enumeration: Cell<bool>,
    enumerations: Cell<usize>,
    removals: RefCell<Vec<RemovalDetails>>,
}

impl MemoryCookies {
    pub fn with(cookies: Vec<Cookie>) -> MemoryCookies {
        MemoryCookies {
            cookies: RefCell::new(cookies),
            ..MemoryCookies::default()
        }
    }

    pub fn fail_removal_of(&self, name: &str) {
        self.failing.borrow_mut().push(name.to_string());
    }

    pub fn fail_enumeration(&self, fail: bool) {
        self.fail_enumeration.set(fail);
    }

    pub fn enumerations(&self) -> usize {
        self.enumerations.get()
    }

    /// Removal requests received, including rejected ones
    pub fn removals(&self) -> Vec<RemovalDetails> {
        self.removals.borrow().clone()
    }

    /// Cookies still held by the fake
    pub fn remaining(&self) -> Vec<Cookie> {
        self.cookies.borrow().clone()
    }
}

#[async_trait(?Send)]
impl CookieStore for MemoryCookies {
    async fn get_all(&self, filter: &CookieFilter) -> Result<Vec<Cookie>, CookieError> {
        self.enumerations.set(self.enumerations.get() + 1);
        if self.fail_enumeration.get() {
            return Err(CookieError::Enumerate("cookie store unavailable".to_string()));
        }

        Ok(self
            .cookies
            .borrow()
            .iter()
            .filter(|c| filter.domain.as_ref().is_none_or(|d| c.host() == d.as_str()))
            .cloned()
            .collect())
    }

    async fn remove(&self, details: &RemovalDetails) -> Result<(), CookieError> {
        self.removals.borrow_mut().push(details.clone());

        if self.failing.borrow().contains(&details.name) {
            return Err(CookieError::Remove {
                name: details.name.clone(),
                url: details.url.clone(),
                reason: "host rejected removal".to_string(),
            });
        }

        // Same addressing as the browser: an unmatched url/name is a silent no-op
        self.cookies
            .borrow_mut()
            .retain(|c| !(c.url() == details.url && c.name == details.name));
        Ok(())
    }
}
