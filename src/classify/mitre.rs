use std::sync::Arc;
use std::time::Duration;

use regex::Regex;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::cache::FileCache;

const MITRE_BASE_URL: &str = "https://cwe.mitre.org";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(8);

/// Human-readable metadata for a CWE identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CweDetails {
    pub title: String,
    pub description: String,
}

/// Client for the MITRE CWE definition endpoints, with a file-backed cache.
///
/// Lookup failures never propagate: an unreachable catalog means titles stay
/// empty, nothing more.
pub struct CweCatalog {
    client: Client,
    base_url: String,
    cache: Arc<FileCache>,
    h2_title: Regex,
}

impl CweCatalog {
    pub fn new(cache: Arc<FileCache>) -> Self {
        Self::with_base_url(cache, MITRE_BASE_URL)
    }

    pub fn with_base_url(cache: Arc<FileCache>, base_url: &str) -> Self {
        Self {
            client: Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .unwrap_or_default(),
            base_url: base_url.trim_end_matches('/').to_string(),
            cache,
            h2_title: Regex::new(r"<h2>CWE-\d+: ([^<]+)</h2>").unwrap(),
        }
    }

    /// Fetch title and description for a `CWE-<digits>` identifier.
    /// Cached results are returned without a network call; any failure
    /// yields empty fields.
    pub async fn get_details(&self, cwe_id: &str) -> CweDetails {
        if !cwe_id.starts_with("CWE-") {
            return CweDetails::default();
        }
        if let Some(cached) = self.cache.get::<CweDetails>(cwe_id) {
            debug!(cwe = %cwe_id, "CWE details cache hit");
            return cached;
        }

        let details = self.fetch(cwe_id).await;
        self.cache.insert(cwe_id, &details);
        details
    }

    async fn fetch(&self, cwe_id: &str) -> CweDetails {
        let num = cwe_id.trim_start_matches("CWE-");
        let url = format!("{}/data/definitions/{}.json", self.base_url, num);

        match self.client.get(&url).send().await {
            Ok(resp) if resp.status().is_success() => {
                let data: Value = match resp.json().await {
                    Ok(v) => v,
                    Err(e) => {
                        warn!(cwe = %cwe_id, error = %e, "CWE catalog returned unparseable JSON");
                        return CweDetails::default();
                    }
                };
                let title = data["Name"].as_str().unwrap_or("").to_string();
                let description = data["Description"].as_str().unwrap_or("").to_string();
                if title.is_empty() {
                    // Some definitions omit "Name"; the HTML page still
                    // carries the title in its <h2> heading.
                    let title = self.fetch_title_from_html(num).await;
                    return CweDetails { title, description };
                }
                CweDetails { title, description }
            }
            Ok(_) => {
                let title = self.fetch_title_from_html(num).await;
                CweDetails {
                    title,
                    description: String::new(),
                }
            }
            Err(e) => {
                warn!(cwe = %cwe_id, error = %e, "CWE catalog lookup failed");
                CweDetails::default()
            }
        }
    }

    async fn fetch_title_from_html(&self, num: &str) -> String {
        let url = format!("{}/data/definitions/{}.html", self.base_url, num);
        match self.client.get(&url).send().await {
            Ok(resp) => match resp.text().await {
                Ok(html) => self
                    .h2_title
                    .captures(&html)
                    .and_then(|c| c.get(1))
                    .map(|m| m.as_str().to_string())
                    .unwrap_or_default(),
                Err(_) => String::new(),
            },
            Err(_) => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_invalid_id_returns_empty() {
        let catalog = CweCatalog::new(Arc::new(FileCache::in_memory()));
        let details = catalog.get_details("not-a-cwe").await;
        assert_eq!(details, CweDetails::default());
    }

    #[tokio::test]
    async fn test_cache_hit_skips_network() {
        let cache = Arc::new(FileCache::in_memory());
        cache.insert(
            "CWE-89",
            &CweDetails {
                title: "SQL Injection".to_string(),
                description: "desc".to_string(),
            },
        );
        // Unroutable base URL: a network attempt would fail, so a non-empty
        // result proves the cache was used.
        let catalog = CweCatalog::with_base_url(cache, "http://127.0.0.1:1");
        let details = catalog.get_details("CWE-89").await;
        assert_eq!(details.title, "SQL Injection");
    }

    #[tokio::test]
    async fn test_unreachable_catalog_yields_empty_fields() {
        let catalog =
            CweCatalog::with_base_url(Arc::new(FileCache::in_memory()), "http://127.0.0.1:1");
        let details = catalog.get_details("CWE-89").await;
        assert_eq!(details, CweDetails::default());
    }

    #[test]
    fn test_h2_title_regex() {
        let catalog = CweCatalog::new(Arc::new(FileCache::in_memory()));
        let html = "<h2>CWE-79: Improper Neutralization of Input During Web Page Generation</h2>";
        let captured = catalog
            .h2_title
            .captures(html)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str());
        assert_eq!(
            captured,
            Some("Improper Neutralization of Input During Web Page Generation")
        );
    }
}
