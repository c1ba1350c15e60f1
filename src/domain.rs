/// Domain parsing and validation for whitelist entries
use regex::Regex;
use std::sync::LazyLock;
use url::Url;

/// One or more alphanumeric/hyphen labels followed by an alphabetic TLD of at least 2 letters
static DOMAIN_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[a-zA-Z0-9-]+\.)+[a-zA-Z]{2,}$").expect("domain pattern is valid")
});

/// Check whether `domain` is acceptable as a whitelist entry
pub fn is_valid_domain(domain: &str) -> bool {
    DOMAIN_PATTERN.is_match(domain)
}

/// Strip exactly one leading `.` (cookie domains use it to mark domain-wide scope)
pub fn strip_leading_dot(domain: &str) -> &str {
    domain.strip_prefix('.').unwrap_or(domain)
}

/// Trim and lower-case user input before validation
pub fn normalize_entry(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Suggest a whitelist entry for the page at `url`
///
/// Algorithm:
/// 1. Parse URL to extract hostname
/// 2. Split hostname by "."
/// 3. Get last segment (TLD)
/// 4. If TLD is 2 letters AND second-to-last is "co" or "com":
///    → Return last 3 segments (e.g., "example.com.au", "site.co.uk")
/// 5. Else:
///    → Return last 2 segments (e.g., "microsoft.com", "zinfandel.io")
///
/// Pages without a hostname (new tab, extension pages, files) and IP
/// addresses yield `None`, as does anything that would not pass validation.
///
/// Examples:
/// - https://www.google.com/search → google.com
/// - https://news.bbc.co.uk/article → bbc.co.uk
/// - chrome://newtab → None
pub fn suggest_entry(url: &str) -> Option<String> {
    let hostname = extract_hostname(url)?;

    let parts: Vec<&str> = hostname.split('.').collect();
    let tld = parts[parts.len() - 1];
    let num_parts = if parts.len() >= 3
        && tld.len() == 2
        && matches!(parts[parts.len() - 2], "co" | "com")
    {
        3
    } else {
        2
    };

    let candidate = if parts.len() > num_parts {
        parts[parts.len() - num_parts..].join(".")
    } else {
        hostname
    };

    is_valid_domain(&candidate).then_some(candidate)
}

/// Extract the lower-cased hostname of a web URL
fn extract_hostname(url: &str) -> Option<String> {
    let parsed = Url::parse(url.trim()).ok()?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return None;
    }

    match parsed.host()? {
        url::Host::Domain(host) => Some(host.to_lowercase()),
        // IP literals never satisfy the entry pattern
        url::Host::Ipv4(_) | url::Host::Ipv6(_) => None,
    }
}
