//! Asset retrieval.
//!
//! [`AssetRetriever`] performs one GET per asset through the injected
//! [`HttpClient`]. A failed asset is a normal outcome: [`fetch_asset`]
//! returns `None` and the caller carries on with the rest of the batch.
//!
//! By default there is a single attempt per asset. Setting
//! `fetch.max_retries` enables exponential backoff on transient failures
//! (transport errors, HTTP 429 and 5xx) without changing the contract.
//!
//! [`fetch_asset`]: AssetRetriever::fetch_asset

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use gameutils_platform::http::HttpClient;
use gameutils_types::config::FetchConfig;
use gameutils_types::{FetchedAsset, GameUtilsError, Result};
use tracing::{debug, warn};

/// Backoff settings for transient failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryConfig {
    /// Attempts after the first. 0 = no retry.
    pub max_retries: u32,
    /// Delay before the first retry.
    pub base_delay: Duration,
    /// Upper bound on any single delay.
    pub max_delay: Duration,
}

impl RetryConfig {
    /// Single attempt, no retry.
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            base_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
        }
    }
}

impl From<&FetchConfig> for RetryConfig {
    fn from(fetch: &FetchConfig) -> Self {
        Self {
            max_retries: fetch.max_retries,
            base_delay: Duration::from_millis(fetch.retry_base_delay_ms),
            max_delay: Duration::from_millis(fetch.retry_max_delay_ms),
        }
    }
}

/// Delay before retry `attempt` (0-indexed): `min(base * 2^attempt, max)`.
pub fn compute_delay(config: &RetryConfig, attempt: u32) -> Duration {
    let exp = 2u32.saturating_pow(attempt);
    config.base_delay.saturating_mul(exp).min(config.max_delay)
}

/// Outcome of a single attempt.
enum Attempt {
    Fetched(FetchedAsset),
    Transient(String),
    Failed(String),
}

/// Fetches asset bytes over HTTP.
#[derive(Clone)]
pub struct AssetRetriever {
    http: Arc<dyn HttpClient>,
    max_asset_bytes: usize,
    retry: RetryConfig,
}

impl AssetRetriever {
    /// Create a retriever using the fetch configuration.
    pub fn new(http: Arc<dyn HttpClient>, fetch: &FetchConfig) -> Self {
        Self {
            http,
            max_asset_bytes: fetch.max_asset_bytes,
            retry: RetryConfig::from(fetch),
        }
    }

    /// Replace the retry policy.
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// The active retry policy.
    pub fn retry_config(&self) -> &RetryConfig {
        &self.retry
    }

    /// Fetch one asset. Any failure yields `None`.
    pub async fn fetch_asset(&self, url: &str) -> Option<FetchedAsset> {
        match self.fetch_resource(url).await {
            Ok(asset) => Some(asset),
            Err(e) => {
                warn!(url, error = %e, "asset skipped");
                None
            }
        }
    }

    /// Fetch one resource, reporting why it failed.
    ///
    /// Used directly by commands where the resource is the whole point
    /// (a ready-made sprite archive, a single costume image).
    pub async fn fetch_resource(&self, url: &str) -> Result<FetchedAsset> {
        let mut attempt = 0;
        loop {
            let reason = match self.attempt(url).await {
                Attempt::Fetched(asset) => {
                    debug!(url, bytes = asset.bytes.len(), attempt, "asset fetched");
                    return Ok(asset);
                }
                Attempt::Failed(reason) => reason,
                Attempt::Transient(reason) if attempt < self.retry.max_retries => {
                    let delay = compute_delay(&self.retry, attempt);
                    debug!(
                        url,
                        attempt,
                        ?delay,
                        reason = %reason,
                        "transient fetch failure, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                    continue;
                }
                Attempt::Transient(reason) => reason,
            };
            return Err(GameUtilsError::Fetch {
                url: url.to_string(),
                reason,
            });
        }
    }

    async fn attempt(&self, url: &str) -> Attempt {
        let response = match self.http.get(url, &HashMap::new()).await {
            Ok(r) => r,
            Err(e) => return Attempt::Transient(format!("transport error: {e}")),
        };

        if !response.is_ok_status() {
            let reason = format!("HTTP {}", response.status);
            return if response.status == 429 || response.status >= 500 {
                Attempt::Transient(reason)
            } else {
                Attempt::Failed(reason)
            };
        }

        if response.body.len() > self.max_asset_bytes {
            return Attempt::Failed(format!(
                "body of {} bytes exceeds the {} byte limit",
                response.body.len(),
                self.max_asset_bytes
            ));
        }

        let mime_type_hint = response.content_type().map(str::to_string);
        Attempt::Fetched(FetchedAsset {
            source_url: url.to_string(),
            bytes: response.body,
            mime_type_hint,
        })
    }
}
