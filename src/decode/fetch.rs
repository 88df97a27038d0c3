//! ImageFetcher - downloads remote images over HTTP.

use std::time::Duration;

use futures_util::StreamExt;

use super::error::DecodeError;
use super::retry::{
    calculate_backoff, is_transient_network_error, is_transient_status, DEFAULT_BACKOFF_BASE,
    DEFAULT_BACKOFF_MAX, DEFAULT_NETWORK_RETRIES,
};

/// Default timeout for a whole download (30 seconds).
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default connection timeout (10 seconds).
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Largest accepted response body (32 MiB).
pub const DEFAULT_MAX_BYTES: usize = 32 * 1024 * 1024;

/// Download settings for [`ImageFetcher`].
#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub timeout: Duration,
    pub connect_timeout: Duration,
    /// Retries after the first attempt for transient failures
    pub retries: u32,
    pub backoff_base: Duration,
    pub backoff_max: Duration,
    pub max_bytes: usize,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            retries: DEFAULT_NETWORK_RETRIES,
            backoff_base: DEFAULT_BACKOFF_BASE,
            backoff_max: DEFAULT_BACKOFF_MAX,
            max_bytes: DEFAULT_MAX_BYTES,
        }
    }
}

/// Outcome of a single download attempt.
enum Attempt {
    Done(Vec<u8>),
    Retry(String),
}

/// HTTP client for fetching remote images.
pub struct ImageFetcher {
    http_client: reqwest::Client,
    settings: FetchSettings,
}

impl ImageFetcher {
    /// Create a fetcher with default settings.
    pub fn new() -> Result<Self, DecodeError> {
        Self::with_settings(FetchSettings::default())
    }

    /// Create a fetcher with explicit settings.
    pub fn with_settings(settings: FetchSettings) -> Result<Self, DecodeError> {
        let http_client = reqwest::Client::builder()
            .timeout(settings.timeout)
            .connect_timeout(settings.connect_timeout)
            .user_agent(concat!("glyphgrid/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http_client,
            settings,
        })
    }

    pub fn settings(&self) -> &FetchSettings {
        &self.settings
    }

    /// Download `url` into memory.
    ///
    /// Transient failures (connection errors, timeouts, 502/503/504) are
    /// retried with exponential backoff up to `settings.retries` times.
    ///
    /// # Errors
    ///
    /// Returns `DecodeError::HttpStatus` for any other non-success status,
    /// `DecodeError::TooLarge` if the body exceeds `settings.max_bytes`, and
    /// `DecodeError::Network` once retries are exhausted.
    pub async fn fetch(&self, url: &str) -> Result<Vec<u8>, DecodeError> {
        let max_retries = self.settings.retries;

        for attempt in 0..=max_retries {
            let message = match self.fetch_once(url).await? {
                Attempt::Done(bytes) => {
                    log::info!("Downloaded {} bytes from {}", bytes.len(), url);
                    return Ok(bytes);
                }
                Attempt::Retry(message) => message,
            };

            if attempt >= max_retries {
                log::error!(
                    "Download of {} failed after {} attempts: {}",
                    url,
                    attempt + 1,
                    message
                );
                return Err(DecodeError::Network {
                    message,
                    attempts: attempt + 1,
                });
            }

            let delay = calculate_backoff(
                attempt,
                self.settings.backoff_base,
                self.settings.backoff_max,
            );
            log::warn!(
                "Download failed (attempt {}/{}): {}. Retrying in {:?}...",
                attempt + 1,
                max_retries + 1,
                message,
                delay
            );
            tokio::time::sleep(delay).await;
        }

        // The loop always returns on its last iteration
        Err(DecodeError::Network {
            message: "no attempts made".to_string(),
            attempts: 0,
        })
    }

    async fn fetch_once(&self, url: &str) -> Result<Attempt, DecodeError> {
        let response = match self.http_client.get(url).send().await {
            Ok(response) => response,
            Err(e) if is_transient_network_error(&e) => return Ok(Attempt::Retry(e.to_string())),
            Err(e) => return Err(e.into()),
        };

        let status = response.status().as_u16();
        if is_transient_status(status) {
            return Ok(Attempt::Retry(format!("server returned {}", status)));
        }
        if !response.status().is_success() {
            return Err(DecodeError::HttpStatus {
                status,
                url: url.to_string(),
            });
        }

        let limit = self.settings.max_bytes;
        if response
            .content_length()
            .is_some_and(|len| len > limit as u64)
        {
            return Err(DecodeError::TooLarge { limit });
        }

        // Stream the body so an unannounced oversize response is cut off early
        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = match chunk {
                Ok(chunk) => chunk,
                Err(e) if is_transient_network_error(&e) => {
                    return Ok(Attempt::Retry(e.to_string()))
                }
                Err(e) => return Err(e.into()),
            };
            if bytes.len() + chunk.len() > limit {
                return Err(DecodeError::TooLarge { limit });
            }
            bytes.extend_from_slice(&chunk);
        }

        Ok(Attempt::Done(bytes))
    }
}
