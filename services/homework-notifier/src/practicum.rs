//! Review API client

use std::sync::Arc;

use serde_json::Value;

use crate::config::ApiConfig;
use crate::io::HttpClient;

/// Client for the homework review endpoint
pub struct PracticumClient {
    endpoint: String,
    authorization: String,
    http: Arc<dyn HttpClient>,
}

impl std::fmt::Debug for PracticumClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PracticumClient")
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

impl PracticumClient {
    pub fn new(config: &ApiConfig, api_token: &str, http: Arc<dyn HttpClient>) -> Self {
        tracing::debug!("Created PracticumClient for {}", config.endpoint);

        Self {
            endpoint: config.endpoint.clone(),
            authorization: format!("OAuth {}", api_token),
            http,
        }
    }

    /// Fetch homework updates reported since `since` (Unix seconds).
    ///
    /// The decoded body is returned as-is; its shape is checked by
    /// [`crate::response::validate`].
    pub async fn fetch_updates(&self, since: u64) -> crate::Result<Value> {
        let from_date = since.to_string();
        let headers = [("Authorization", self.authorization.as_str())];
        let query = [("from_date", from_date.as_str())];

        let response = self.http.get(&self.endpoint, &headers, &query).await?;

        if response.status != 200 {
            return Err(crate::NotifierError::Transport(format!(
                "endpoint {} returned status {}",
                self.endpoint, response.status
            )));
        }

        serde_json::from_str(&response.body).map_err(|e| {
            crate::NotifierError::Transport(format!("response body is not valid JSON: {}", e))
        })
    }
}
