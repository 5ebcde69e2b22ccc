use crate::api::models::{ConnectorType, TokenRequest, TokenResponse};
use crate::core::session::Session;
use crate::error::ApiError;
use crate::utils::retry::{RetryConfig, RetryExecutor};
use reqwest::{Client, RequestBuilder, Response};
use std::time::Duration;

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const USER_AGENT: &str = concat!("connector-cli/", env!("CARGO_PKG_VERSION"));

/// HTTP client for the Citrix Cloud trust and agent hub endpoints.
///
/// Data-plane GETs carry the `CwsAuth` authorization scheme plus the
/// customer id header and are retried per `RetryConfig`; the one token POST
/// is never retried.
#[derive(Debug, Clone)]
pub struct CloudApiClient {
    client: Client,
    pub identity_url: String,
    pub api_base_url: String,
    pub customer_id: String,
    retry: RetryConfig,
}

impl CloudApiClient {
    pub fn new(
        identity_url: String,
        api_base_url: String,
        customer_id: String,
        timeout_secs: Option<u64>,
    ) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ApiError::Transport {
                endpoint: "client_init".to_string(),
                message: format!("Failed to create HTTP client: {}", e),
            })?;

        Ok(CloudApiClient {
            client,
            identity_url,
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
            customer_id,
            retry: RetryConfig::default(),
        })
    }

    pub fn with_retry_config(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    pub fn edge_servers_url(&self, connector_type: ConnectorType) -> String {
        format!(
            "{}/{}/EdgeServers?extendedData=true&connectorType={}",
            self.api_base_url, self.customer_id, connector_type
        )
    }

    pub fn edge_server_url(&self, id: &str) -> String {
        format!("{}/{}/EdgeServers/{}", self.api_base_url, self.customer_id, id)
    }

    /// Exchange the client id/secret pair for a bearer token.
    ///
    /// Single attempt, never retried; any non-success status is terminal.
    pub async fn request_token(
        &self,
        client_id: &str,
        client_secret: &str,
    ) -> Result<TokenResponse, ApiError> {
        let body = TokenRequest {
            client_id: client_id.to_string(),
            client_secret: client_secret.to_string(),
        };

        let response = self
            .client
            .post(&self.identity_url)
            .json(&body)
            .send()
            .await
            .map_err(|e| ApiError::Transport {
                endpoint: self.identity_url.clone(),
                message: e.to_string(),
            })?;

        let status = response.status();
        if status.is_success() {
            response.json::<TokenResponse>().await.map_err(|e| ApiError::Schema {
                endpoint: self.identity_url.clone(),
                message: format!("Failed to parse token response: {}", e),
            })
        } else {
            let server_message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            Err(ApiError::Unauthorized {
                status: status.as_u16(),
                endpoint: self.identity_url.clone(),
                server_message,
            })
        }
    }

    pub fn build_request(&self, url: &str, session: &Session) -> RequestBuilder {
        self.client
            .get(url)
            .header("Authorization", session.authorization_value())
            .header("Citrix-CustomerId", &self.customer_id)
    }

    async fn get_once<T>(&self, url: &str, session: &Session) -> Result<T, ApiError>
    where
        T: serde::de::DeserializeOwned,
    {
        tracing::debug!(%url, "GET");
        let response = self
            .build_request(url, session)
            .send()
            .await
            .map_err(|e| ApiError::Transport {
                endpoint: url.to_string(),
                message: e.to_string(),
            })?;

        self.handle_response(response, url).await
    }

    pub async fn handle_response<T>(
        &self,
        response: Response,
        endpoint: &str,
    ) -> Result<T, ApiError>
    where
        T: serde::de::DeserializeOwned,
    {
        let status = response.status();

        if status.is_success() {
            response.json::<T>().await.map_err(|e| ApiError::Schema {
                endpoint: endpoint.to_string(),
                message: format!("Failed to parse response: {}", e),
            })
        } else {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());

            Err(ApiError::Http {
                status: status.as_u16(),
                endpoint: endpoint.to_string(),
                message: error_text,
            })
        }
    }

    /// Authenticated GET with bounded fixed-delay retry.
    ///
    /// Exhausting the attempt cap is not an error for the run: the call
    /// degrades to `Ok(None)` and the caller decides what a data gap means.
    /// Schema violations are surfaced immediately and never retried.
    pub async fn get_with_retry<T>(
        &self,
        url: &str,
        session: &Session,
    ) -> Result<Option<T>, ApiError>
    where
        T: serde::de::DeserializeOwned,
    {
        let executor = RetryExecutor::new(self.retry.clone());

        match executor.execute(|| self.get_once::<T>(url, session)).await {
            Ok(value) => Ok(Some(value)),
            Err(error) if error.is_retryable() => {
                tracing::error!(
                    %url,
                    attempts = self.retry.max_attempts,
                    "API did not return data after all attempts, continuing without it"
                );
                Ok(None)
            }
            Err(error) => Err(error),
        }
    }
}
