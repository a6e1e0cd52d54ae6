use std::time::Duration;

use reqwest::Client;
use serde_json::Value;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, warn};

const NVD_BASE_URL: &str = "https://services.nvd.nist.gov";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);
/// NVD quota guidance: at most one unauthenticated request per second.
const DEFAULT_MIN_DELAY: Duration = Duration::from_secs(1);
/// Upper bound on identifiers taken from a single response.
pub const RESPONSE_CAP: usize = 5;

/// Client for the NVD CVE API, throttled so consecutive live lookups are
/// spaced at least `min_delay` apart. The throttle lives inside the client;
/// callers cannot issue lookups in a tight loop around it.
pub struct NvdClient {
    client: Client,
    base_url: String,
    min_delay: Duration,
    last_call: Mutex<Option<Instant>>,
}

impl NvdClient {
    pub fn new() -> Self {
        Self::with_base_url(NVD_BASE_URL, DEFAULT_MIN_DELAY)
    }

    pub fn with_base_url(base_url: &str, min_delay: Duration) -> Self {
        Self {
            client: Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .unwrap_or_default(),
            base_url: base_url.trim_end_matches('/').to_string(),
            min_delay,
            last_call: Mutex::new(None),
        }
    }

    /// List known CVE identifiers referencing a CWE, capped at
    /// [`RESPONSE_CAP`]. Any failure yields an empty list.
    pub async fn list_known(&self, cwe_id: &str) -> Vec<String> {
        self.throttle().await;

        let url = format!(
            "{}/rest/json/cves/2.0?cweId={}",
            self.base_url, cwe_id
        );
        match self.client.get(&url).send().await {
            Ok(resp) if resp.status().is_success() => match resp.json::<Value>().await {
                Ok(data) => {
                    let ids: Vec<String> = data["vulnerabilities"]
                        .as_array()
                        .map(|vulns| {
                            vulns
                                .iter()
                                .filter_map(|v| v["cve"]["id"].as_str())
                                .map(str::to_string)
                                .take(RESPONSE_CAP)
                                .collect()
                        })
                        .unwrap_or_default();
                    debug!(cwe = %cwe_id, count = ids.len(), "NVD lookup complete");
                    ids
                }
                Err(e) => {
                    warn!(cwe = %cwe_id, error = %e, "NVD response unparseable");
                    Vec::new()
                }
            },
            Ok(resp) => {
                warn!(cwe = %cwe_id, status = %resp.status(), "NVD lookup rejected");
                Vec::new()
            }
            Err(e) => {
                warn!(cwe = %cwe_id, error = %e, "NVD lookup failed");
                Vec::new()
            }
        }
    }

    /// Sleep until at least `min_delay` has elapsed since the previous call,
    /// then stamp this one. Serialized through the mutex so concurrent
    /// callers queue rather than racing past the quota.
    async fn throttle(&self) {
        let mut last = self.last_call.lock().await;
        if let Some(prev) = *last {
            let elapsed = prev.elapsed();
            if elapsed < self.min_delay {
                tokio::time::sleep(self.min_delay - elapsed).await;
            }
        }
        *last = Some(Instant::now());
    }
}

impl Default for NvdClient {
    fn default() -> Self {
        Self::new()
    }
}
