/// Typed access to the two persisted records: the whitelist and the auto-purge flag

use serde_json::Value;

use crate::config::StorageLayout;
use crate::error::StorageError;
use crate::host::KeyValueStore;

pub struct Settings<'a, S: KeyValueStore + ?Sized> {
    store: &'a S,
    layout: &'a StorageLayout,
}

impl<'a, S: KeyValueStore + ?Sized> Settings<'a, S> {
    pub fn new(store: &'a S, layout: &'a StorageLayout) -> Self {
        Settings { store, layout }
    }

    /// Stored whitelist, empty when never written
    pub async fn whitelist(&self) -> Result<Vec<String>, StorageError> {
        let value = self.store.get(self.layout.whitelist_key).await?;
        decode_whitelist(self.layout.whitelist_key, value)
    }

    pub async fn set_whitelist(&self, whitelist: &[String]) -> Result<(), StorageError> {
        self.store
            .set(self.layout.whitelist_key, Value::from(whitelist.to_vec()))
            .await
    }

    /// Stored auto-purge flag, false when never written
    pub async fn auto_purge_enabled(&self) -> Result<bool, StorageError> {
        let value = self.store.get(self.layout.enabled_key).await?;
        Ok(is_truthy(value.as_ref()))
    }

    pub async fn set_auto_purge_enabled(&self, enabled: bool) -> Result<(), StorageError> {
        self.store.set(self.layout.enabled_key, Value::Bool(enabled)).await
    }
}

/// Decode a whitelist record; a missing or null record is an empty whitelist
pub fn decode_whitelist(key: &str, value: Option<Value>) -> Result<Vec<String>, StorageError> {
    match value {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(value) => serde_json::from_value(value).map_err(|e| StorageError::Decode {
            key: key.to_string(),
            reason: e.to_string(),
        }),
    }
}

/// JavaScript truthiness, which is how the flag has always been read back
pub fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{HostTarget, StorageLayout};
    use crate::host::memory::MemoryStore;
    use futures::executor::block_on;
    use serde_json::json;

    fn layout() -> StorageLayout {
        StorageLayout::for_target(HostTarget::Firefox)
    }

    #[test]
    fn test_absent_records_use_defaults() {
        let store = MemoryStore::new();
        let layout = layout();
        let settings = Settings::new(&store, &layout);

        assert_eq!(block_on(settings.whitelist()), Ok(Vec::new()));
        assert_eq!(block_on(settings.auto_purge_enabled()), Ok(false));
    }

    #[test]
    fn test_round_trip_records() {
        let store = MemoryStore::new();
        let layout = layout();
        let settings = Settings::new(&store, &layout);

        block_on(settings.set_whitelist(&["a.com".to_string(), "b.com".to_string()])).unwrap();
        block_on(settings.set_auto_purge_enabled(true)).unwrap();

        assert_eq!(store.record("whitelist"), Some(json!(["a.com", "b.com"])));
        assert_eq!(store.record("autoPurgeEnabled"), Some(json!(true)));
        assert_eq!(
            block_on(settings.whitelist()).unwrap(),
            vec!["a.com".to_string(), "b.com".to_string()]
        );
        assert!(block_on(settings.auto_purge_enabled()).unwrap());
    }

    #[test]
    fn test_layout_selects_flag_key() {
        let store = MemoryStore::with(&[("isEnabledAutoPurge", json!(true))]);
        let chrome = StorageLayout::for_target(HostTarget::Chrome);
        let firefox = StorageLayout::for_target(HostTarget::Firefox);

        assert!(block_on(Settings::new(&store, &chrome).auto_purge_enabled()).unwrap());
        assert!(!block_on(Settings::new(&store, &firefox).auto_purge_enabled()).unwrap());
    }

    #[test]
    fn test_malformed_whitelist_is_an_error() {
        let store = MemoryStore::with(&[("whitelist", json!({"a.com": true}))]);
        let layout = layout();
        let settings = Settings::new(&store, &layout);

        let err = block_on(settings.whitelist()).unwrap_err();
        assert!(matches!(err, StorageError::Decode { ref key, .. } if key == "whitelist"));
    }

    #[test]
    fn test_null_whitelist_is_empty() {
        assert_eq!(decode_whitelist("whitelist", Some(Value::Null)), Ok(Vec::new()));
    }

    #[test]
    fn test_read_failure_propagates() {
        let store = MemoryStore::new();
        store.fail_reads(true);
        let layout = layout();
        let settings = Settings::new(&store, &layout);

        assert!(matches!(block_on(settings.auto_purge_enabled()), Err(StorageError::Host(_))));
    }

    #[test]
    fn test_truthiness() {
        assert!(!is_truthy(None));
        assert!(!is_truthy(Some(&json!(null))));
        assert!(!is_truthy(Some(&json!(false))));
        assert!(!is_truthy(Some(&json!(0))));
        assert!(!is_truthy(Some(&json!(""))));
        assert!(is_truthy(Some(&json!(true))));
        assert!(is_truthy(Some(&json!(1))));
        assert!(is_truthy(Some(&json!("yes"))));
        assert!(is_truthy(Some(&json!([]))));
    }
}
