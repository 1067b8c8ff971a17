//! HTTP transport leaf.
//!
//! One thin wrapper around a shared [`reqwest::Client`] that attaches the
//! `x-api-key` header and a caller-supplied per-request timeout. It never
//! retries; retry decisions belong to the poll loop.

use crate::error::Result;
use serde::Serialize;
use std::time::Duration;

pub(crate) struct Transport {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl Transport {
    pub(crate) fn new(api_key: String, base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }

    /// POSTs a JSON body to `{base_url}{path}` with the API key header.
    pub(crate) async fn post_json<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        timeout: Duration,
    ) -> Result<reqwest::Response> {
        let response = self
            .client
            .post(format!("{}{}", self.base_url, path))
            .header("x-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(body)
            .timeout(timeout)
            .send()
            .await?;
        Ok(response)
    }

    /// GETs `{base_url}{path}` with the API key header.
    pub(crate) async fn get_json(
        &self,
        path: &str,
        timeout: Duration,
    ) -> Result<reqwest::Response> {
        let response = self
            .client
            .get(format!("{}{}", self.base_url, path))
            .header("x-api-key", &self.api_key)
            .timeout(timeout)
            .send()
            .await?;
        Ok(response)
    }

    /// Opens a streaming GET against an absolute URL. Artifact URLs are
    /// pre-signed, so no credentials are attached.
    pub(crate) async fn get_stream(
        &self,
        url: &str,
        timeout: Duration,
    ) -> Result<reqwest::Response> {
        let response = self.client.get(url).timeout(timeout).send().await?;
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_stripped() {
        let transport = Transport::new("k".into(), "http://localhost:9999/api/v1/".into());
        assert_eq!(transport.base_url, "http://localhost:9999/api/v1");
    }
}
