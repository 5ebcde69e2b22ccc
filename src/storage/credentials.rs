use super::Result;
use std::env;

#[cfg(not(test))]
use keyring::Entry;

/// Environment variable consulted before the keyring for the API secret.
pub const CLIENT_SECRET_ENV: &str = "CTX_CLIENT_SECRET";

/// API credentials for one profile, backed by the OS keyring.
#[derive(Debug, Clone)]
pub struct Credentials {
    client_id: Option<String>,
    client_secret: Option<String>,
    pub profile_name: String,
}

/// Where the secret presented to the identity endpoint came from.
#[derive(Debug, Clone, PartialEq)]
pub enum SecretSource {
    Environment,
    Keyring,
}

impl Credentials {
    pub fn new(profile_name: String) -> Self {
        Self {
            client_id: None,
            client_secret: None,
            profile_name,
        }
    }

    pub fn load(profile_name: &str) -> Result<Self> {
        let mut credentials = Self::new(profile_name.to_string());
        credentials.client_id = credentials.load_entry("client-id")?;
        credentials.client_secret = credentials.load_entry("client-secret")?;
        Ok(credentials)
    }

    pub fn client_id(&self) -> Option<String> {
        self.client_id.clone()
    }

    pub fn client_secret(&self) -> Option<String> {
        self.client_secret.clone()
    }

    pub fn has_stored_secret(&self) -> bool {
        self.client_secret.is_some()
    }

    /// Precedence: explicit flag/env secret first, then the keyring.
    pub fn secret_source(cli_secret: Option<&str>) -> SecretSource {
        if cli_secret.is_some_and(|s| !s.is_empty()) || env::var(CLIENT_SECRET_ENV).is_ok() {
            SecretSource::Environment
        } else {
            SecretSource::Keyring
        }
    }

    // used by auth login
    pub fn save_login_for_profile(
        profile_name: &str,
        client_id: &str,
        client_secret: &str,
    ) -> Result<()> {
        let mut credentials = Self::new(profile_name.to_string());
        credentials.client_id = Some(client_id.to_string());
        credentials.client_secret = Some(client_secret.to_string());
        credentials.save_entry("client-id", &credentials.client_id)?;
        credentials.save_entry("client-secret", &credentials.client_secret)?;
        Ok(())
    }

    // used by auth logout
    pub fn clear_login_for_profile(profile_name: &str) -> Result<()> {
        let credentials = Self::new(profile_name.to_string());
        credentials.delete_entry("client-id")?;
        credentials.delete_entry("client-secret")?;
        Ok(())
    }

    #[cfg(not(test))]
    fn load_entry(&self, key_type: &str) -> Result<Option<String>> {
        let entry = Entry::new(
            "connector-cli",
            &format!("{}-{}", key_type, self.profile_name),
        )
        .map_err(|e| crate::error::StorageError::KeyringError(e.to_string()))?;

        match entry.get_password() {
            Ok(v) => Ok(Some(v)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(crate::error::StorageError::KeyringError(e.to_string())),
        }
    }

    #[cfg(not(test))]
    fn save_entry(&self, key_type: &str, value: &Option<String>) -> Result<()> {
        if let Some(v) = value {
            let key_name = format!("{}-{}", key_type, self.profile_name);

            let entry = Entry::new("connector-cli", &key_name)
                .map_err(|e| crate::error::StorageError::KeyringError(e.to_string()))?;

            entry
                .set_password(v)
                .map_err(|e| crate::error::StorageError::KeyringError(e.to_string()))?;
        }

        Ok(())
    }

    #[cfg(not(test))]
    fn delete_entry(&self, key_type: &str) -> Result<()> {
        let key_name = format!("{}-{}", key_type, self.profile_name);

        let entry = Entry::new("connector-cli", &key_name)
            .map_err(|e| crate::error::StorageError::KeyringError(e.to_string()))?;

        match entry.delete_credential() {
            Ok(_) => Ok(()),
            // Entry doesn't exist, which is fine for logout
            Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(crate::error::StorageError::KeyringError(e.to_string())),
        }
    }

    #[cfg(test)]
    fn load_entry(&self, key_type: &str) -> Result<Option<String>> {
        println!(
            "MOCK: Loading {} for profile {}",
            key_type, self.profile_name
        );
        Ok(None)
    }

    #[cfg(test)]
    fn save_entry(&self, key_type: &str, value: &Option<String>) -> Result<()> {
        if let Some(v) = value {
            println!(
                "MOCK: Saving {} ({} chars) for profile {}",
                key_type,
                v.len(),
                self.profile_name
            );
        }
        Ok(())
    }

    #[cfg(test)]
    fn delete_entry(&self, key_type: &str) -> Result<()> {
        println!(
            "MOCK: Deleting {} for profile {}",
            key_type, self.profile_name
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_credentials_are_empty() {
        let credentials = Credentials::new("test".to_string());
        assert!(credentials.client_id().is_none());
        assert!(credentials.client_secret().is_none());
        assert!(!credentials.has_stored_secret());
    }

    #[test]
    fn test_load_uses_mock_in_tests() {
        let credentials = Credentials::load("test").expect("load failed");
        assert_eq!(credentials.profile_name, "test");
        assert!(credentials.client_secret().is_none());
    }

    #[test]
    fn test_save_and_clear_do_not_error() {
        Credentials::save_login_for_profile("test", "client-1", "s3cret").expect("save failed");
        Credentials::clear_login_for_profile("test").expect("clear failed");
    }

    #[test]
    fn test_secret_source_prefers_explicit_secret() {
        assert_eq!(
            Credentials::secret_source(Some("s3cret")),
            SecretSource::Environment
        );
        assert_eq!(Credentials::secret_source(Some("")), SecretSource::Keyring);
    }
}
