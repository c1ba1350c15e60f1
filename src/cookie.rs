/// Cookie records exchanged with the host cookie store
use serde::{Deserialize, Serialize};

use crate::domain::strip_leading_dot;

/// A cookie as reported by `cookies.getAll`; only the fields purging needs
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Cookie {
    pub name: String,
    /// May carry a leading `.` for domain-wide cookies
    pub domain: String,
    pub path: String,
    pub secure: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_id: Option<String>,
}

impl Cookie {
    pub fn new(name: &str, domain: &str, path: &str, secure: bool) -> Cookie {
        Cookie {
            name: name.to_string(),
            domain: domain.to_string(),
            path: path.to_string(),
            secure,
            store_id: None,
        }
    }

    /// Domain with the domain-wide marker dot removed
    pub fn host(&self) -> &str {
        strip_leading_dot(&self.domain)
    }

    /// URL the host indexes this cookie under, scheme chosen by `secure`
    pub fn url(&self) -> String {
        let scheme = if self.secure { "https" } else { "http" };
        format!("{}://{}{}", scheme, self.host(), self.path)
    }

    pub fn removal(&self) -> RemovalDetails {
        RemovalDetails {
            url: self.url(),
            name: self.name.clone(),
            store_id: self.store_id.clone(),
        }
    }
}

/// Argument to `cookies.getAll`; the default matches every cookie
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CookieFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
}

/// Argument to `cookies.remove`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RemovalDetails {
    pub url: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_uses_secure_flag() {
        let secure = Cookie::new("sid", "bank.com", "/", true);
        let plain = Cookie::new("sid", "bank.com", "/account", false);

        assert_eq!(secure.url(), "https://bank.com/");
        assert_eq!(plain.url(), "http://bank.com/account");
    }

    #[test]
    fn test_url_drops_domain_wide_dot() {
        let cookie = Cookie::new("_ga", ".tracker.net", "/", false);
        assert_eq!(cookie.host(), "tracker.net");
        assert_eq!(cookie.url(), "http://tracker.net/");
    }

    #[test]
    fn test_removal_details() {
        let mut cookie = Cookie::new("_ga", ".tracker.net", "/", true);
        cookie.store_id = Some("firefox-container-1".to_string());

        let details = cookie.removal();

        assert_eq!(details.url, "https://tracker.net/");
        assert_eq!(details.name, "_ga");
        assert_eq!(details.store_id.as_deref(), Some("firefox-container-1"));
    }

    #[test]
    fn test_deserialize_host_cookie() {
        let json = r#"{
            "name": "sid",
            "value": "abc",
            "domain": ".bank.com",
            "hostOnly": false,
            "path": "/",
            "secure": true,
            "httpOnly": true,
            "session": true,
            "storeId": "0"
        }"#;

        let cookie: Cookie = serde_json::from_str(json).unwrap();

        assert_eq!(cookie.name, "sid");
        assert_eq!(cookie.domain, ".bank.com");
        assert!(cookie.secure);
        assert_eq!(cookie.store_id.as_deref(), Some("0"));
    }

    #[test]
    fn test_removal_serializes_camel_case() {
        let details = RemovalDetails {
            url: "https://bank.com/".to_string(),
            name: "sid".to_string(),
            store_id: Some("0".to_string()),
        };

        let json = serde_json::to_value(&details).unwrap();

        assert_eq!(json["storeId"], "0");
        assert_eq!(json["url"], "https://bank.com/");
    }

    #[test]
    fn test_default_filter_is_empty_object() {
        let json = serde_json::to_string(&CookieFilter::default()).unwrap();
        assert_eq!(json, "{}");
    }
}
