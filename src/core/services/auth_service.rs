use crate::AppError;
use crate::api::client::CloudApiClient;
use crate::core::session::Session;
use crate::error::{ApiError, AuthError};

/// Token acquisition and session lifetime management.
#[derive(Debug, Clone)]
pub struct AuthService {
    client: CloudApiClient,
    client_id: String,
    client_secret: String,
}

impl AuthService {
    pub fn new(client: CloudApiClient, client_id: String, client_secret: String) -> Self {
        Self {
            client,
            client_id,
            client_secret,
        }
    }

    /// Perform the authentication exchange and build a session.
    ///
    /// Fatal on any non-success status; never retried.
    pub async fn acquire_session(&self) -> Result<Session, AppError> {
        match self
            .client
            .request_token(&self.client_id, &self.client_secret)
            .await
        {
            Ok(token) => {
                tracing::info!(
                    expires_in = token.expires_in,
                    "API token accepted, bearer token downloaded"
                );
                Ok(Session::from_token(&token))
            }
            Err(ApiError::Unauthorized { status, server_message, .. }) => {
                tracing::error!(status, %server_message, "failed to retrieve bearer token");
                Err(AuthError::TokenRejected { status }.into())
            }
            Err(error) => Err(error.into()),
        }
    }

    /// Refresh guard: re-acquire the token when a long run outlives it.
    pub async fn ensure_session(&self, session: &mut Session) -> Result<(), AppError> {
        if session.is_expired() {
            tracing::info!("bearer token reached its safety margin, re-acquiring");
            *session = self.acquire_session().await?;
        }
        Ok(())
    }
}
