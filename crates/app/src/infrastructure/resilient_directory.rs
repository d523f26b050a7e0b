//! Resilient directory wrapper with exponential backoff retry
//!
//! Wraps any DirectoryPort implementation with retry logic to handle
//! transient transport failures.

use async_trait::async_trait;
use countrylist_domain::Country;
use rand::Rng;
use std::sync::Arc;
use std::time::Duration;

use crate::ports::outbound::{DirectoryError, DirectoryPort};

/// Configuration for retry behavior
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of retry attempts (0 = no retries, just the initial attempt)
    pub max_retries: u32,
    /// Base delay in milliseconds before first retry
    pub base_delay_ms: u64,
    /// Maximum delay in milliseconds (caps exponential growth)
    pub max_delay_ms: u64,
    /// Jitter factor (0.0-1.0) for randomizing delays
    pub jitter_factor: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 2,
            base_delay_ms: 500,
            max_delay_ms: 5000,
            jitter_factor: 0.2,
        }
    }
}

/// Wrapper that adds retry logic to any directory client
pub struct ResilientDirectory {
    inner: Arc<dyn DirectoryPort>,
    config: RetryConfig,
}

impl ResilientDirectory {
    pub fn new(inner: Arc<dyn DirectoryPort>, config: RetryConfig) -> Self {
        Self { inner, config }
    }

    /// Delay for a given attempt number using exponential backoff with jitter
    fn calculate_delay(&self, attempt: u32) -> u64 {
        let base = self.config.base_delay_ms;
        // Exponential: base * 2^(attempt-1)
        let exponential = base.saturating_mul(2u64.saturating_pow(attempt.saturating_sub(1)));
        let capped = exponential.min(self.config.max_delay_ms);

        let jitter_range = (capped as f64 * self.config.jitter_factor) as i64;
        if jitter_range > 0 {
            let jitter = rand::thread_rng().gen_range(-jitter_range..=jitter_range);
            (capped as i64 + jitter).max(0) as u64
        } else {
            capped
        }
    }
}

#[async_trait]
impl DirectoryPort for ResilientDirectory {
    async fn fetch_all(&self) -> Result<Vec<Country>, DirectoryError> {
        let mut attempt = 0;
        loop {
            match self.inner.fetch_all().await {
                Ok(countries) => {
                    if attempt > 0 {
                        tracing::info!(attempt = attempt + 1, "Directory fetch succeeded after retry");
                    }
                    return Ok(countries);
                }
                Err(e) if e.is_transient() && attempt < self.config.max_retries => {
                    attempt += 1;
                    let delay = self.calculate_delay(attempt);
                    tracing::warn!(
                        attempt,
                        max_retries = self.config.max_retries,
                        delay_ms = delay,
                        error = %e,
                        "Directory fetch failed, retrying..."
                    );
                    tokio::time::sleep(Duration::from_millis(delay)).await;
                }
                Err(e) => {
                    tracing::error!(attempts = attempt + 1, error = %e, "Directory fetch failed");
                    return Err(e);
                }
            }
        }
    }
}
