/// Per-browser storage layout, chosen once at startup

/// Browser family the extension is running in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostTarget {
    Chrome,
    Firefox,
}

impl HostTarget {
    /// Map the bridge's host name; anything unrecognised is treated as Chromium
    pub fn from_name(name: &str) -> HostTarget {
        match name.trim().to_ascii_lowercase().as_str() {
            "firefox" => HostTarget::Firefox,
            _ => HostTarget::Chrome,
        }
    }
}

/// Where the two persisted records live for a given host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageLayout {
    /// Storage area name, as reported in change notifications
    pub area: &'static str,
    pub whitelist_key: &'static str,
    pub enabled_key: &'static str,
}

impl StorageLayout {
    pub fn for_target(target: HostTarget) -> StorageLayout {
        match target {
            HostTarget::Chrome => StorageLayout {
                area: "local",
                whitelist_key: "whitelist",
                enabled_key: "isEnabledAutoPurge",
            },
            HostTarget::Firefox => StorageLayout {
                area: "local",
                whitelist_key: "whitelist",
                enabled_key: "autoPurgeEnabled",
            },
        }
    }
}
