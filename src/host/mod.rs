//! Narrow interfaces to the browser's storage and cookie APIs.
//!
//! The purge handler and the editor only ever talk to these traits. The
//! wasm-bindgen implementation lives in [`browser`]; tests use the
//! in-memory fakes in `memory`.

pub mod browser;
#[cfg(test)]
pub mod memory;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::cookie::{Cookie, CookieFilter, RemovalDetails};
use crate::error::{CookieError, StorageError};

/// Key-value storage scoped to one storage area
#[async_trait(?Send)]
pub trait KeyValueStore {
    /// Read a record; `None` when it has never been written
    async fn get(&self, key: &str) -> Result<Option<Value>, StorageError>;

    /// Replace a record wholesale
    async fn set(&self, key: &str, value: Value) -> Result<(), StorageError>;
}

#[async_trait(?Send)]
pub trait CookieStore {
    async fn get_all(&self, filter: &CookieFilter) -> Result<Vec<Cookie>, CookieError>;

    async fn remove(&self, details: &RemovalDetails) -> Result<(), CookieError>;
}

/// One entry of a `storage.onChanged` notification
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StorageChange {
    #[serde(default)]
    pub old_value: Option<Value>,
    #[serde(default)]
    pub new_value: Option<Value>,
}
