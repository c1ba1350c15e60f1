/// WebExtension-backed implementations of the host traits
use std::collections::HashMap;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use wasm_bindgen::prelude::*;

use super::{CookieStore, KeyValueStore, StorageChange};
use crate::config::HostTarget;
use crate::cookie::{Cookie, CookieFilter, RemovalDetails};
use crate::error::{CookieError, StorageError};

// Import JS bridge functions
#[wasm_bindgen(module = "/js/host.js")]
extern "C" {
    fn detectHost() -> String;

    #[wasm_bindgen(catch)]
    async fn storageGet(area: &str, key: &str) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn storageSet(area: &str, key: &str, value: JsValue) -> Result<(), JsValue>;

    fn onStorageChanged(callback: &js_sys::Function);

    #[wasm_bindgen(catch)]
    async fn cookiesGetAll(filter: JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn cookiesRemove(details: JsValue) -> Result<JsValue, JsValue>;

    fn onWindowRemoved(callback: &js_sys::Function);

    #[wasm_bindgen(catch)]
    async fn activeTabUrl() -> Result<JsValue, JsValue>;
}

/// Ask the bridge which browser family is hosting the extension
pub fn detect_host() -> HostTarget {
    HostTarget::from_name(&detectHost())
}

/// URL of the active tab in the current window, if there is one
pub async fn active_tab_url() -> Option<String> {
    match activeTabUrl().await {
        Ok(url) => url.as_string(),
        Err(e) => {
            log::warn!("Failed to query active tab: {}", describe(&e));
            None
        }
    }
}

/// Storage area accessed through `browser.storage.<area>`
pub struct BrowserStorage {
    area: &'static str,
}

impl BrowserStorage {
    pub fn new(area: &'static str) -> BrowserStorage {
        BrowserStorage { area }
    }
}

#[async_trait(?Send)]
impl KeyValueStore for BrowserStorage {
    async fn get(&self, key: &str) -> Result<Option<Value>, StorageError> {
        let value_js = storageGet(self.area, key)
            .await
            .map_err(|e| StorageError::Host(describe(&e)))?;

        if value_js.is_undefined() {
            return Ok(None);
        }

        serde_wasm_bindgen::from_value(value_js)
            .map(Some)
            .map_err(|e| StorageError::Decode {
                key: key.to_string(),
                reason: e.to_string(),
            })
    }

    async fn set(&self, key: &str, value: Value) -> Result<(), StorageError> {
        let value_js = to_js(&value).map_err(|e| StorageError::Decode {
            key: key.to_string(),
            reason: e.to_string(),
        })?;

        storageSet(self.area, key, value_js)
            .await
            .map_err(|e| StorageError::Host(describe(&e)))
    }
}

/// `browser.cookies`
pub struct BrowserCookies;

#[async_trait(?Send)]
impl CookieStore for BrowserCookies {
    async fn get_all(&self, filter: &CookieFilter) -> Result<Vec<Cookie>, CookieError> {
        let filter_js = to_js(filter).map_err(|e| CookieError::Enumerate(e.to_string()))?;

        let cookies_js = cookiesGetAll(filter_js)
            .await
            .map_err(|e| CookieError::Enumerate(describe(&e)))?;

        serde_wasm_bindgen::from_value(cookies_js)
            .map_err(|e| CookieError::Enumerate(format!("Failed to parse cookies: {}", e)))
    }

    async fn remove(&self, details: &RemovalDetails) -> Result<(), CookieError> {
        let failed = |reason: String| CookieError::Remove {
            name: details.name.clone(),
            url: details.url.clone(),
            reason,
        };

        let details_js = to_js(details).map_err(|e| failed(e.to_string()))?;

        cookiesRemove(details_js)
            .await
            .map(|_| ())
            .map_err(|e| failed(describe(&e)))
    }
}

/// Register a `storage.onChanged` listener for the lifetime of the page
pub fn on_storage_changed<F>(mut handler: F)
where
    F: FnMut(&HashMap<String, StorageChange>, &str) + 'static,
{
    let callback = Closure::<dyn FnMut(JsValue, String)>::new(move |changes_js: JsValue, area: String| {
        match serde_wasm_bindgen::from_value::<HashMap<String, StorageChange>>(changes_js) {
            Ok(changes) => handler(&changes, &area),
            Err(e) => log::error!("Failed to parse storage change: {}", e),
        }
    });

    onStorageChanged(callback.as_ref().unchecked_ref());
    callback.forget();
}

/// Register a `windows.onRemoved` listener for the lifetime of the page
pub fn on_window_removed<F>(handler: F)
where
    F: FnMut() + 'static,
{
    let callback = Closure::<dyn FnMut()>::new(handler);

    onWindowRemoved(callback.as_ref().unchecked_ref());
    callback.forget();
}

/// Serialize to plain JS objects (maps become objects, not `Map`)
fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, serde_wasm_bindgen::Error> {
    value.serialize(&serde_wasm_bindgen::Serializer::json_compatible())
}

fn describe(e: &JsValue) -> String {
    e.dyn_ref::<js_sys::Error>()
        .map(|err| String::from(err.message()))
        .or_else(|| e.as_string())
        .unwrap_or_else(|| format!("{:?}", e))
}
