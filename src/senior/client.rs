//! HTTP client for the budget grid SOAP service.

use anyhow::{Error, Result, anyhow};
use async_trait::async_trait;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, instrument};

use super::response;
use crate::core::submit::{BatchOutcome, BatchSubmitter};

const CONTENT_TYPE: &str = "text/xml; charset=utf-8";

/// Posts batch envelopes to the Senior web service.
pub struct SoapClient {
    endpoint: String,
    timeout: Duration,
    retry_delay_ms: u64,
}

impl SoapClient {
    pub fn new(endpoint: &str, timeout_secs: u64) -> Self {
        SoapClient {
            endpoint: endpoint.to_string(),
            timeout: Duration::from_secs(timeout_secs),
            retry_delay_ms: 500,
        }
    }

    async fn post(&self, envelope: &[u8]) -> Result<String, reqwest::Error> {
        let client = reqwest::Client::builder()
            .user_agent("ebafin/0.2")
            .timeout(self.timeout)
            .build()?;

        let response = client
            .post(&self.endpoint)
            .header(reqwest::header::CONTENT_TYPE, CONTENT_TYPE)
            .body(envelope.to_vec())
            .send()
            .await?
            .error_for_status()?;

        response.text().await
    }
}

#[async_trait]
impl BatchSubmitter for SoapClient {
    #[instrument(name = "SoapSubmit", skip(self, envelope), fields(batch = batch))]
    async fn submit(&self, batch: usize, envelope: &[u8]) -> Result<BatchOutcome> {
        debug!("Posting batch to {}", self.endpoint);

        // Transport failures get one retry, then the batch is failed.
        let body = with_retry(|| self.post(envelope), 1, self.retry_delay_ms)
            .await
            .map_err(|e| anyhow!("Request error: {} for batch {} URL: {}", e, batch, self.endpoint))?;

        debug!(body_len = body.len(), "Received service response");
        Ok(response::parse(&body))
    }
}

/// Retries an async operation with configurable attempts and delays
///
/// # Parameters
/// - `operation`: Closure returning a future
/// - `retries`: Number of retry attempts (total runs = 1 initial + retries)
/// - `delay_ms`: Milliseconds between retry attempts
///
/// # Returns
/// Either the successful result or the error after all attempts
pub async fn with_retry<F, Fut, T>(
    mut operation: F,
    retries: usize,
    delay_ms: u64,
) -> Result<T, Error>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, reqwest::Error>>,
{
    let mut attempt = 1;
    loop {
        match operation().await.map_err(anyhow::Error::from) {
            Ok(val) => return Ok(val),
            Err(err) => {
                if attempt > retries {
                    return Err(err);
                }
                debug!(
                    "Attempt {}/{} failed: {}. Retrying...",
                    attempt, retries, err
                );
                attempt += 1;
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            }
        }
    }
}
