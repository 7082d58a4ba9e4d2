//! reqwest-backed fetcher
//!
//! Handles:
//! - Building the HTTP client with the auditor's user agent
//! - Retrying transient failures with exponential backoff
//! - Enforcing the maximum response size
//! - Classifying transport errors

use crate::config::HttpConfig;
use crate::fetch::{FetchError, FetchResult, FetchedResponse, Fetcher};
use async_trait::async_trait;
use encoding_rs::{Encoding, UTF_8};
use reqwest::{Client, Response};
use std::collections::HashMap;
use std::time::Duration;

/// Status codes worth retrying
pub const RETRY_STATUSES: &[u16] = &[408, 429, 500, 502, 503, 504];

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The HTTP configuration (user agent, timeouts)
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(config: &HttpConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(config.timeout_secs.min(10)))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Default [`Fetcher`] implementation on top of reqwest
///
/// # Retry Logic
///
/// | Condition | Action |
/// |-----------|--------|
/// | HTTP 408, 429, 500, 502, 503, 504 | Retry, last response returned when retries run out |
/// | Timeout | Retry, then `FetchError::Timeout` |
/// | Connection failure | Retry, then `FetchError::Connect` |
/// | Body over the size limit | Immediate `FetchError::TooLarge` |
///
/// Backoff doubles after each attempt starting from `backoff_ms`.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    max_retries: u32,
    backoff: Duration,
    max_response_bytes: u64,
}

impl HttpFetcher {
    /// Creates a fetcher from the HTTP configuration
    pub fn new(config: &HttpConfig) -> FetchResult<Self> {
        let client = build_http_client(config).map_err(|e| FetchError::Client(e.to_string()))?;
        Ok(Self {
            client,
            max_retries: config.max_retries,
            backoff: Duration::from_millis(config.backoff_ms),
            max_response_bytes: config.max_response_bytes,
        })
    }

    fn delay_for(&self, attempt: u32) -> Duration {
        self.backoff.saturating_mul(2u32.saturating_pow(attempt))
    }

    /// Sends a request, retrying transient failures
    async fn send_with_retry(&self, method: reqwest::Method, url: &str) -> FetchResult<Response> {
        let mut attempt = 0;
        loop {
            let result = self.client.request(method.clone(), url).send().await;
            let retries_left = attempt < self.max_retries;

            match result {
                Ok(response) => {
                    let status = response.status().as_u16();
                    if retries_left && RETRY_STATUSES.contains(&status) {
                        tracing::debug!(
                            "{} {} returned {}, retrying (attempt {})",
                            method,
                            url,
                            status,
                            attempt + 1
                        );
                    } else {
                        return Ok(response);
                    }
                }
                Err(e) => {
                    let error = classify_error(url, &e);
                    let transient = matches!(
                        error,
                        FetchError::Timeout { .. } | FetchError::Connect { .. }
                    );
                    if !(retries_left && transient) {
                        return Err(error);
                    }
                    tracing::debug!("{} {} failed: {}, retrying", method, url, error);
                }
            }

            tokio::time::sleep(self.delay_for(attempt)).await;
            attempt += 1;
        }
    }

    /// Reads the body, stopping as soon as it exceeds the size limit
    async fn read_body(&self, url: &str, mut response: Response) -> FetchResult<Vec<u8>> {
        let limit = self.max_response_bytes;

        if let Some(length) = response.content_length() {
            if length > limit {
                return Err(FetchError::TooLarge {
                    url: url.to_string(),
                    limit,
                });
            }
        }

        let mut body = Vec::new();
        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| classify_error(url, &e))?
        {
            body.extend_from_slice(&chunk);
            if body.len() as u64 > limit {
                return Err(FetchError::TooLarge {
                    url: url.to_string(),
                    limit,
                });
            }
        }

        Ok(body)
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn get(&self, url: &str) -> FetchResult<FetchedResponse> {
        tracing::debug!("GET {}", url);
        let response = self.send_with_retry(reqwest::Method::GET, url).await?;

        let status = response.status().as_u16();
        let final_url = response.url().to_string();
        let headers: HashMap<String, String> = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_lowercase(), v.to_string()))
            })
            .collect();

        let bytes = self.read_body(url, response).await?;
        let body = decode_body(&bytes, headers.get("content-type").map(String::as_str));

        Ok(FetchedResponse {
            url: final_url,
            status,
            body,
            headers,
        })
    }

    async fn head(&self, url: &str) -> FetchResult<u16> {
        tracing::debug!("HEAD {}", url);
        let response = self.send_with_retry(reqwest::Method::HEAD, url).await?;
        Ok(response.status().as_u16())
    }
}

/// Decodes a body using the `Content-Type` charset, defaulting to UTF-8
///
/// A byte order mark overrides the declared charset. Malformed sequences
/// become U+FFFD.
fn decode_body(bytes: &[u8], content_type: Option<&str>) -> String {
    let encoding = content_type
        .and_then(|value| {
            value.split(';').skip(1).find_map(|param| {
                let (key, label) = param.split_once('=')?;
                key.trim()
                    .eq_ignore_ascii_case("charset")
                    .then(|| label.trim().trim_matches('"'))
            })
        })
        .and_then(|label| Encoding::for_label(label.as_bytes()))
        .unwrap_or(UTF_8);

    let (text, _, _) = encoding.decode(bytes);
    text.into_owned()
}

/// Maps a reqwest error onto the fetch error kinds
fn classify_error(url: &str, error: &reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout {
            url: url.to_string(),
        }
    } else if error.is_connect() {
        FetchError::Connect {
            url: url.to_string(),
            message: error.to_string(),
        }
    } else {
        FetchError::Transport {
            url: url.to_string(),
            message: error.to_string(),
        }
    }
}
