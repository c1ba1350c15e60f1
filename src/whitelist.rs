/// Whitelist matching and edit planning
use crate::domain::{is_valid_domain, normalize_entry, strip_leading_dot};
use crate::error::EditorError;

/// Domain reported for cookies owned by browser extensions themselves.
/// Those are never purged so extensions stay logged in.
pub const EXTENSION_COOKIE_MARKER: &str = "-extension://";

/// Decide whether a cookie domain is covered by the whitelist
///
/// A domain matches an entry when it equals the entry or ends with
/// `"." + entry`. No case folding is done here; entries and cookie
/// domains are expected to be lower-case already.
pub fn is_whitelisted<S: AsRef<str>>(domain: &str, whitelist: &[S]) -> bool {
    if domain == EXTENSION_COOKIE_MARKER {
        return true;
    }

    let domain = strip_leading_dot(domain);

    whitelist.iter().any(|entry| {
        let entry = entry.as_ref();
        domain == entry
            || domain
                .strip_suffix(entry)
                .is_some_and(|rest| rest.ends_with('.'))
    })
}

/// Split raw editor input into normalized candidate entries
///
/// Input may be a single domain or a comma-separated batch. Blank parts are
/// dropped and repeats inside the batch collapse to the first occurrence.
pub fn parse_input(input: &str) -> Vec<String> {
    let mut entries: Vec<String> = Vec::new();
    for part in input.split(',') {
        let entry = normalize_entry(part);
        if !entry.is_empty() && !entries.contains(&entry) {
            entries.push(entry);
        }
    }
    entries
}

/// Compute the whitelist that results from adding `candidates`
///
/// The whole batch is rejected if any candidate is malformed or already
/// present; otherwise the new entries are appended and the list is sorted.
pub fn plan_additions(current: &[String], candidates: &[String]) -> Result<Vec<String>, EditorError> {
    let batch = candidates.len() > 1;

    let invalid: Vec<String> = candidates
        .iter()
        .filter(|c| !is_valid_domain(c))
        .cloned()
        .collect();
    if !invalid.is_empty() {
        return Err(EditorError::Invalid { entries: invalid, batch });
    }

    let duplicates: Vec<String> = candidates
        .iter()
        .filter(|c| current.contains(c))
        .cloned()
        .collect();
    if !duplicates.is_empty() {
        return Err(EditorError::Duplicate { entries: duplicates, batch });
    }

    let mut updated = current.to_vec();
    updated.extend(candidates.iter().cloned());
    updated.sort();
    Ok(updated)
}

/// Compute the whitelist without `domain`; absent domains leave it unchanged
pub fn plan_removal(current: &[String], domain: &str) -> Vec<String> {
    current.iter().filter(|d| *d != domain).cloned().collect()
}
