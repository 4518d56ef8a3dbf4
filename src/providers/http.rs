//! Shared HTTP client for model backends.
//!
//! Thin wrapper over `reqwest` that posts JSON bodies and maps transport
//! failures and non-2xx statuses to [`AiError::BackendRequest`]. Providers
//! own their wire shapes; this client only moves them across the network.
//! No retry is performed here - transient failures surface to the caller,
//! which may retry with backoff outside the core.

use crate::error::{AiError, AiResult};
use crate::logging::log_error;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// HTTP client shared by all provider adapters.
#[derive(Debug, Default)]
pub(crate) struct BackendClient {
    client: reqwest::Client,
}

impl BackendClient {
    pub(crate) fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Build bearer-token auth headers for OpenAI-style APIs.
    pub(crate) fn bearer_auth_headers(api_key: &str) -> AiResult<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {api_key}")).map_err(|e| {
                AiError::backend_request(format!("Invalid API key format: {e}"), None, None)
            })?,
        );
        Ok(headers)
    }

    /// Build `x-api-key` auth headers for Anthropic-style APIs.
    pub(crate) fn api_key_auth_headers(api_key: &str) -> AiResult<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            "x-api-key",
            HeaderValue::from_str(api_key).map_err(|e| {
                AiError::backend_request(format!("Invalid API key format: {e}"), None, None)
            })?,
        );
        headers.insert("anthropic-version", HeaderValue::from_static("2023-06-01"));
        Ok(headers)
    }

    /// Headers for unauthenticated backends.
    pub(crate) fn plain_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers
    }

    /// POST a JSON body and deserialize a JSON response.
    pub(crate) async fn post_json<B, R>(
        &self,
        url: &str,
        headers: &HeaderMap,
        body: &B,
    ) -> AiResult<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let response = self
            .client
            .post(url)
            .headers(headers.clone())
            .json(body)
            .send()
            .await
            .map_err(|e| {
                log_error!(
                    url = %url,
                    error = %e,
                    "HTTP request failed"
                );
                AiError::backend_request(format!("Request failed: {e}"), None, Some(Box::new(e)))
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            log_error!(
                url = %url,
                status = %status,
                error_text = %error_text,
                "API error response"
            );
            return Err(AiError::backend_request(
                format!("API error {status}: {error_text}"),
                Some(status.as_u16()),
                None,
            ));
        }

        response.json::<R>().await.map_err(|e| {
            AiError::backend_request(
                format!("Failed to decode response body: {e}"),
                Some(status.as_u16()),
                Some(Box::new(e)),
            )
        })
    }
}
