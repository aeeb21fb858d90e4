use crate::error::TransportError;
use reqwest::Method;
use serde_json::Value;
use std::time::Duration;
use url::Url;

/// Uniform response shape: HTTP status plus decoded JSON body.
/// 4xx/5xx are normal values here, never errors.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    pub data: Value,
}

/// Thin wrapper around `reqwest::Client` bound to one base URL.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    pub fn new(base_url: Url, request_timeout: Duration) -> Result<Self, TransportError> {
        let http = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()?;
        Ok(Self { http, base_url })
    }

    /// Issue exactly one request. Fails only on transport problems
    /// (connection refused, timeout, DNS) or an undecodable body; any
    /// HTTP status comes back as an `ApiResponse`.
    pub async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
        headers: &[(String, String)],
        bearer: Option<&str>,
    ) -> Result<ApiResponse, TransportError> {
        let url = self
            .base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| TransportError::InvalidPath {
                path: path.to_string(),
                reason: e.to_string(),
            })?;

        let mut request = self.http.request(method, url);

        if let Some(token) = bearer {
            request = request.header("Authorization", format!("Bearer {token}"));
        }
        for (name, value) in headers {
            request = request.header(name.as_str(), value.as_str());
        }
        if let Some(json) = body {
            request = request.json(json);
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let text = response.text().await?;

        // Empty bodies are legal (e.g. 204); everything else must be JSON.
        let data = if text.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text)
                .map_err(|e| TransportError::MalformedBody(e.to_string()))?
        };

        Ok(ApiResponse { status, data })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unjoinable_path_is_invalid_path() {
        let client = ApiClient::new(
            "http://127.0.0.1:9/".parse().unwrap(),
            Duration::from_secs(1),
        )
        .unwrap();

        // An absolute reference with an overflowing port cannot be
        // joined; no request is issued.
        let err = client
            .send(Method::GET, "http://127.0.0.1:99999999/x", None, &[], None)
            .await
            .unwrap_err();

        assert!(matches!(err, TransportError::InvalidPath { .. }), "got: {err}");
    }
}
