use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Custom deserializer: accepts a JSON `null` as `None` but still requires
/// the key to be present. Downstream checks treat a missing key and an
/// empty value as different signals, so the derive's implicit
/// missing-means-`None` handling for `Option` fields must not apply here.
fn nullable_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer)
}

// Authentication models
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenRequest {
    pub client_id: String,
    pub client_secret: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    pub token: String,
    pub expires_in: i64,
}

/// Connector type categories tracked by the agent hub.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConnectorType {
    Windows,
    Unified,
}

impl fmt::Display for ConnectorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectorType::Windows => write!(f, "Windows"),
            ConnectorType::Unified => write!(f, "Unified"),
        }
    }
}

/// Summary object returned by the list endpoint. The list body carries more
/// attributes, but only the id is needed to drive the detail fetch.
#[derive(Debug, Clone, Deserialize)]
pub struct ConnectorSummary {
    pub id: String,
}

/// Full detail record for one connector.
///
/// All 21 fields are required on the wire: a missing key or an unknown extra
/// key is a contract violation and fails deserialization. Version and date
/// fields may be `null` or empty on the wire; identity and state fields may
/// not.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ConnectorRecord {
    pub id: String,
    pub fqdn: String,
    pub connector_type: ConnectorType,
    pub location: String,
    pub role: String,
    #[serde(deserialize_with = "nullable_string")]
    pub current_version: Option<String>,
    #[serde(deserialize_with = "nullable_string")]
    pub expected_version: Option<String>,
    #[serde(deserialize_with = "nullable_string")]
    pub current_bootstrapper_version: Option<String>,
    #[serde(deserialize_with = "nullable_string")]
    pub expected_boot_strapper_version: Option<String>,
    pub version_state: String,
    #[serde(deserialize_with = "nullable_string")]
    pub upgrading_version: Option<String>,
    #[serde(deserialize_with = "nullable_string")]
    pub upgrading_status: Option<String>,
    #[serde(deserialize_with = "nullable_string")]
    pub last_upgrade_date: Option<String>,
    #[serde(deserialize_with = "nullable_string")]
    pub last_upgrade_completed_date: Option<String>,
    #[serde(deserialize_with = "nullable_string")]
    pub failed_upgrade_reason: Option<String>,
    pub status: String,
    pub in_maintenance: bool,
    pub upgrade_disabled: bool,
    #[serde(deserialize_with = "nullable_string")]
    pub last_contact_date: Option<String>,
    #[serde(deserialize_with = "nullable_string")]
    pub windows_sid: Option<String>,
    #[serde(deserialize_with = "nullable_string")]
    pub lease_end_date_time: Option<String>,
}
