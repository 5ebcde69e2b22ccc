use crate::api::models::TokenResponse;
use chrono::{DateTime, Duration, Utc};

/// Safety margin subtracted from the server-declared token lifetime, so a
/// long-running collection never presents a token at the edge of expiry.
pub const TOKEN_EXPIRY_MARGIN_SECS: i64 = 120;

/// A bearer session for the Citrix Cloud data plane.
///
/// Holds the opaque token and the absolute instant after which it must no
/// longer be presented. Created once at startup and re-created by the
/// refresh guard when a long run outlives the token.
#[derive(Debug, Clone)]
pub struct Session {
    bearer_token: String,
    expires_at: DateTime<Utc>,
}

impl Session {
    pub fn new(bearer_token: String, expires_in_secs: i64) -> Self {
        let expires_at = Utc::now() + Duration::seconds(expires_in_secs - TOKEN_EXPIRY_MARGIN_SECS);
        Self {
            bearer_token,
            expires_at,
        }
    }

    pub fn from_token(response: &TokenResponse) -> Self {
        Self::new(response.token.clone(), response.expires_in)
    }

    /// Header value for the data plane's custom authorization scheme.
    pub fn authorization_value(&self) -> String {
        format!("CwsAuth Bearer={}", self.bearer_token)
    }

    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }
}
