/// Error types shared by the background handler and the popup editor
use thiserror::Error;

/// Failure reading or writing the extension's key-value storage
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StorageError {
    #[error("storage request failed: {0}")]
    Host(String),

    #[error("stored value for '{key}' is malformed: {reason}")]
    Decode { key: String, reason: String },
}

/// Failure talking to the host cookie store
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CookieError {
    #[error("failed to enumerate cookies: {0}")]
    Enumerate(String),

    #[error("failed to remove cookie '{name}' at {url}: {reason}")]
    Remove {
        name: String,
        url: String,
        reason: String,
    },
}

/// A purge pass that stopped before touching any cookie
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PurgeError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Cookies(#[from] CookieError),
}

/// Rejection of a whitelist edit; the stored whitelist is never modified
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EditorError {
    #[error("{}", invalid_message(.entries, .batch))]
    Invalid { entries: Vec<String>, batch: bool },

    #[error("{}", duplicate_message(.entries, .batch))]
    Duplicate { entries: Vec<String>, batch: bool },

    #[error(transparent)]
    Storage(#[from] StorageError),
}

fn invalid_message(entries: &[String], batch: &bool) -> String {
    if *batch {
        format!("Invalid domain names: {}", entries.join(", "))
    } else {
        "Invalid domain name!".to_string()
    }
}

fn duplicate_message(entries: &[String], batch: &bool) -> String {
    if *batch {
        format!("These domains are already in the whitelist: {}", entries.join(", "))
    } else {
        "This domain is already in the whitelist!".to_string()
    }
}
