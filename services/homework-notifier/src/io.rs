//! HTTP client abstraction for testability

use std::time::Duration;

use async_trait::async_trait;

/// HTTP response from a request
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

/// Abstraction over HTTP client for dependency injection
#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait HttpClient: Send + Sync {
    /// Send a GET request with extra headers and query parameters
    async fn get(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        query: &[(&str, &str)],
    ) -> crate::Result<HttpResponse>;

    /// Send a POST request with a JSON body
    async fn post_json(&self, url: &str, body: &serde_json::Value)
        -> crate::Result<HttpResponse>;
}

/// Production HTTP client using reqwest
#[derive(Default)]
pub struct ReqwestHttpClient {
    client: reqwest::Client,
}

impl ReqwestHttpClient {
    /// Build a client whose requests give up after `timeout`
    pub fn with_timeout(timeout: Duration) -> crate::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| crate::NotifierError::Config(format!("Building HTTP client: {}", e)))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn get(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        query: &[(&str, &str)],
    ) -> crate::Result<HttpResponse> {
        let url = reqwest::Url::parse_with_params(url, query)
            .map_err(|e| crate::NotifierError::Transport(format!("Invalid URL {}: {}", url, e)))?;
        tracing::debug!("GET {}", url);

        let mut request = self.client.get(url.clone());
        for (name, value) in headers {
            request = request.header(*name, *value);
        }
        let response = request
            .send()
            .await
            .map_err(|e| crate::NotifierError::Transport(format!("GET {} failed: {}", url, e)))?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| {
            crate::NotifierError::Transport(format!("Reading response body: {}", e))
        })?;

        tracing::debug!("GET {} -> {} ({} bytes)", url, status, body.len());
        Ok(HttpResponse { status, body })
    }

    async fn post_json(
        &self,
        url: &str,
        body: &serde_json::Value,
    ) -> crate::Result<HttpResponse> {
        tracing::debug!("POST {}", redact_bot_token(url));
        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                crate::NotifierError::Notifier(format!(
                    "POST {} failed: {}",
                    redact_bot_token(url),
                    e.without_url()
                ))
            })?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| {
            crate::NotifierError::Notifier(format!("Reading response body: {}", e.without_url()))
        })?;

        tracing::debug!(
            "POST {} -> {} ({} bytes)",
            redact_bot_token(url),
            status,
            body.len()
        );
        Ok(HttpResponse { status, body })
    }
}

/// Mask the `/bot<token>` path segment used by the Telegram Bot API.
///
/// The token segment is the last one starting with `/bot`, so hosts or path
/// prefixes that happen to start with `bot` are left alone.
pub fn redact_bot_token(url: &str) -> String {
    match url.rfind("/bot") {
        Some(start) => {
            let rest = &url[start + 4..];
            match rest.find('/') {
                Some(end) => format!("{}/bot***{}", &url[..start], &rest[end..]),
                None => format!("{}/bot***", &url[..start]),
            }
        }
        None => url.to_string(),
    }
}
