//! Shared HTTP plumbing
//!
//! Every gateway operation builds its own `RequestBuilder` (URL, body, credential
//! mode) and hands it here. This module sends it, logs the exchange, and turns the
//! outcome into either a decoded payload or a [`GatewayError`].
//!
//! Requests are sent exactly once; there is no retry policy.

use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::GatewayError;
use crate::utils::log_sanitizer::truncate_for_log;

/// HTTP tool function set
pub struct HttpUtils;

impl HttpUtils {
    /// Send a request and return its status code and body text.
    ///
    /// # Arguments
    /// * `request_builder` - fully configured request
    /// * `endpoint` - service label used in logs and errors
    /// * `method_name` - HTTP method, for logs
    /// * `url` - target URL, for logs
    ///
    /// # Returns
    /// * `Ok((status_code, response_text))` for any HTTP response, including 4xx/5xx
    /// * `Err(GatewayError::Network | GatewayError::Timeout)` when no response arrived
    pub async fn execute_request(
        request_builder: RequestBuilder,
        endpoint: &str,
        method_name: &str,
        url: &str,
    ) -> Result<(u16, String), GatewayError> {
        log::debug!("[{endpoint}] {method_name} {url}");

        let response = request_builder
            .send()
            .await
            .map_err(|e| transport_error(endpoint, &e))?;

        let status_code = response.status().as_u16();
        log::debug!("[{endpoint}] Response Status: {status_code}");

        let response_text = response
            .text()
            .await
            .map_err(|e| GatewayError::Network {
                endpoint: endpoint.to_string(),
                detail: format!("Failed to read response body: {e}"),
            })?;

        log::debug!(
            "[{endpoint}] Response Body: {}",
            truncate_for_log(&response_text)
        );

        Ok((status_code, response_text))
    }

    /// Parse a JSON body into `T`.
    ///
    /// # Returns
    /// * `Ok(T)` - successfully parsed
    /// * `Err(GatewayError::Decode)` - body is not valid JSON or does not match `T`
    pub fn parse_json<T>(response_text: &str, endpoint: &str) -> Result<T, GatewayError>
    where
        T: DeserializeOwned,
    {
        serde_json::from_str(response_text).map_err(|e| {
            log::error!("[{endpoint}] JSON parse failed: {e}");
            log::error!(
                "[{endpoint}] Raw response: {}",
                truncate_for_log(response_text)
            );
            GatewayError::Decode {
                endpoint: endpoint.to_string(),
                detail: e.to_string(),
            }
        })
    }

    /// Turn a status/body pair into the operation's result.
    ///
    /// 2xx bodies are decoded into `T`; an empty one is read as an empty object, so
    /// permissive payloads such as `BackendMessage` come back blank while required
    /// fields still fail with [`GatewayError::Decode`]. Any other status becomes
    /// [`GatewayError::Backend`] carrying the body as the service's error payload;
    /// bodies that are not JSON are wrapped as a JSON string.
    pub fn decode_response<T>(
        status_code: u16,
        response_text: &str,
        endpoint: &str,
    ) -> Result<T, GatewayError>
    where
        T: DeserializeOwned,
    {
        if (200..300).contains(&status_code) {
            // An empty success body decodes as `{}`.
            let body = if response_text.trim().is_empty() {
                "{}"
            } else {
                response_text
            };
            return Self::parse_json(body, endpoint);
        }

        let payload = serde_json::from_str::<Value>(response_text)
            .unwrap_or_else(|_| Value::String(response_text.to_string()));

        let err = GatewayError::Backend {
            endpoint: endpoint.to_string(),
            status: status_code,
            payload,
        };
        log::warn!("{err}");
        Err(err)
    }

    /// Send a request and decode its outcome in one step.
    pub async fn send_json<T>(
        request_builder: RequestBuilder,
        endpoint: &str,
        method_name: &str,
        url: &str,
    ) -> Result<T, GatewayError>
    where
        T: DeserializeOwned,
    {
        let (status_code, response_text) =
            Self::execute_request(request_builder, endpoint, method_name, url).await?;
        Self::decode_response(status_code, &response_text, endpoint)
    }
}

/// Classify a `reqwest` send failure.
pub(crate) fn transport_error(endpoint: &str, e: &reqwest::Error) -> GatewayError {
    let err = if e.is_timeout() {
        GatewayError::Timeout {
            endpoint: endpoint.to_string(),
            detail: e.to_string(),
        }
    } else {
        GatewayError::Network {
            endpoint: endpoint.to_string(),
            detail: e.to_string(),
        }
    };
    log::error!("{err}");
    err
}
