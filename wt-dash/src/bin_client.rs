//! HTTP client for the bin service
//!
//! Fetches the full bin list with a fixed retry schedule: up to
//! `max_attempts` tries, a constant delay between them, no backoff. The
//! bin service may be cold-starting on a free host, which is why the
//! default schedule allows roughly ten seconds.

use reqwest::Client;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};
use wt_common::BinRecord;

const USER_AGENT: &str = concat!("wt-dash/", env!("CARGO_PKG_VERSION"));

/// Bin fetch errors
#[derive(Debug, Error)]
pub enum BinFetchError {
    #[error("Failed to build HTTP client: {0}")]
    Client(String),

    #[error("{last_error} (after {attempts} attempts)")]
    Exhausted { attempts: u32, last_error: String },
}

/// Fixed-delay retry schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total tries, including the first; at least 1
    pub max_attempts: u32,
    /// Pause between consecutive tries
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            delay: Duration::from_secs(2),
        }
    }
}

pub struct BinClient {
    http_client: Client,
    bins_url: String,
    retry: RetryPolicy,
}

impl BinClient {
    pub fn new(bins_url: impl Into<String>, retry: RetryPolicy) -> Result<Self, BinFetchError> {
        let http_client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| BinFetchError::Client(e.to_string()))?;

        Ok(Self {
            http_client,
            bins_url: bins_url.into(),
            retry,
        })
    }

    pub fn bins_url(&self) -> &str {
        &self.bins_url
    }

    /// Fetch every bin, retrying on any failure
    ///
    /// Connection errors, non-2xx statuses and undecodable bodies are all
    /// retried. The last attempt's error is returned once the schedule is
    /// used up.
    pub async fn fetch_bins(&self) -> Result<Vec<BinRecord>, BinFetchError> {
        let attempts = self.retry.max_attempts.max(1);
        let mut last_error = String::new();

        for attempt in 1..=attempts {
            match self.fetch_once().await {
                Ok(bins) => {
                    debug!(attempt, count = bins.len(), "Fetched bin data");
                    return Ok(bins);
                }
                Err(e) => {
                    last_error = e;
                    if attempt < attempts {
                        warn!(
                            attempt,
                            max_attempts = attempts,
                            url = %self.bins_url,
                            error = %last_error,
                            "Bin service request failed, retrying in {:?}",
                            self.retry.delay
                        );
                        tokio::time::sleep(self.retry.delay).await;
                    }
                }
            }
        }

        warn!(
            attempts,
            url = %self.bins_url,
            error = %last_error,
            "Giving up on bin service"
        );
        Err(BinFetchError::Exhausted {
            attempts,
            last_error,
        })
    }

    async fn fetch_once(&self) -> Result<Vec<BinRecord>, String> {
        let response = self
            .http_client
            .get(&self.bins_url)
            .send()
            .await
            .map_err(|e| format!("Request failed: {}", e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(format!("Bin service returned {}", status));
        }

        response
            .json::<Vec<BinRecord>>()
            .await
            .map_err(|e| format!("Invalid bin data: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_attempts, 5);
        assert_eq!(policy.delay, Duration::from_secs(2));
    }

    #[tokio::test]
    async fn test_exhaustion_reports_attempts() {
        // Nothing listens on port 9 on a test host
        let client = BinClient::new(
            "http://127.0.0.1:9/bins",
            RetryPolicy {
                max_attempts: 3,
                delay: Duration::from_millis(1),
            },
        )
        .unwrap();

        let err = client.fetch_bins().await.unwrap_err();
        match err {
            BinFetchError::Exhausted { attempts, last_error } => {
                assert_eq!(attempts, 3);
                assert!(last_error.starts_with("Request failed"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_zero_attempts_still_tries_once() {
        let client = BinClient::new(
            "http://127.0.0.1:9/bins",
            RetryPolicy {
                max_attempts: 0,
                delay: Duration::from_millis(1),
            },
        )
        .unwrap();

        let err = client.fetch_bins().await.unwrap_err();
        assert!(matches!(err, BinFetchError::Exhausted { attempts: 1, .. }));
    }
}
