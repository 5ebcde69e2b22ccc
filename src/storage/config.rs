use super::Result;
use crate::error::StorageError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

/// Production identity endpoint (US cloud).
pub const DEFAULT_IDENTITY_URL: &str = "https://api-us.cloud.com/cctrustoauth2/root/tokens/clients";
/// Production agent hub base (US East release ring).
pub const DEFAULT_API_URL: &str = "https://agenthub-eastus-release-a.citrixworkspacesapi.net";

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Config {
    pub default_profile: Option<String>,
    pub profiles: HashMap<String, Profile>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Profile {
    /// Citrix Cloud customer id scoping every data-plane call
    pub customer_id: String,
    /// API client id; may instead live in the keyring via `auth login`
    pub client_id: Option<String>,
    /// Identity endpoint override (tests, non-US clouds)
    pub identity_url: Option<String>,
    /// Agent hub base URL override
    pub api_url: Option<String>,
    /// Per-request timeout override
    pub timeout_seconds: Option<u64>,
}

impl Profile {
    pub fn empty() -> Self {
        Self {
            customer_id: String::new(),
            client_id: None,
            identity_url: None,
            api_url: None,
            timeout_seconds: None,
        }
    }

    pub fn resolved_identity_url(&self) -> String {
        self.identity_url
            .clone()
            .unwrap_or_else(|| DEFAULT_IDENTITY_URL.to_string())
    }

    pub fn resolved_api_url(&self) -> String {
        self.api_url
            .clone()
            .unwrap_or_else(|| DEFAULT_API_URL.to_string())
    }
}

impl Config {
    pub fn default() -> Self {
        Self {
            default_profile: None,
            profiles: HashMap::new(),
        }
    }

    pub fn load(path: Option<PathBuf>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p,
            None => Self::config_file_path()?,
        };

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(|source| StorageError::FileIo {
            path: config_path.to_string_lossy().to_string(),
            source,
        })?;

        let config: Config =
            toml::from_str(&content).map_err(|e| StorageError::ConfigParseError {
                message: e.to_string(),
            })?;

        Ok(config)
    }

    pub fn save(&self, path: Option<PathBuf>) -> Result<()> {
        let config_path = match path {
            Some(p) => p,
            None => Self::config_file_path()?,
        };

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).map_err(|source| StorageError::FileIo {
                path: parent.to_string_lossy().to_string(),
                source,
            })?;
        }

        let toml_content = toml::to_string(self).map_err(|_| StorageError::ConfigSaveFailed)?;

        fs::write(&config_path, toml_content).map_err(|source| StorageError::FileIo {
            path: config_path.to_string_lossy().to_string(),
            source,
        })?;

        Ok(())
    }

    fn config_file_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().ok_or(StorageError::ConfigSaveFailed)?;

        let app_config_dir = config_dir.join("connector-cli");
        let config_file = app_config_dir.join("config.toml");

        Ok(config_file)
    }

    pub fn get_profile(&self, name: &str) -> Option<&Profile> {
        self.profiles.get(name)
    }

    pub fn get_profile_mut(&mut self, name: &str) -> Option<&mut Profile> {
        self.profiles.get_mut(name)
    }

    pub fn set_profile(&mut self, name: String, profile: Profile) {
        self.profiles.insert(name, profile);
    }

    pub fn profile_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.profiles.keys().cloned().collect();
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample_profile() -> Profile {
        Profile {
            customer_id: "acmecorp".to_string(),
            client_id: Some("11111111-2222".to_string()),
            identity_url: None,
            api_url: Some("http://hub.test".to_string()),
            timeout_seconds: Some(30),
        }
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.default_profile, None);
        assert_eq!(config.profiles.len(), 0);
    }

    #[test]
    fn test_profile_management() {
        let mut config = Config::default();
        config.set_profile("test".to_string(), sample_profile());

        let retrieved = config.get_profile("test");
        assert!(retrieved.is_some());
        if let Some(retrieved) = retrieved {
            assert_eq!(retrieved.customer_id, "acmecorp");
            assert_eq!(retrieved.timeout_seconds, Some(30));
        }
        assert!(config.get_profile("nonexistent").is_none());
    }

    #[test]
    fn test_resolved_urls_fall_back_to_production_defaults() {
        let profile = sample_profile();
        assert_eq!(profile.resolved_identity_url(), DEFAULT_IDENTITY_URL);
        assert_eq!(profile.resolved_api_url(), "http://hub.test");

        let empty = Profile::empty();
        assert_eq!(empty.resolved_api_url(), DEFAULT_API_URL);
    }

    #[test]
    fn test_config_load_save() {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join("config.toml");

        let mut config = Config::default();
        config.default_profile = Some("test".to_string());
        config.profiles.insert("test".to_string(), sample_profile());

        config
            .save(Some(config_path.clone()))
            .expect("Failed to save config");

        let loaded_config = Config::load(Some(config_path)).expect("Failed to load config");

        assert_eq!(loaded_config.default_profile, config.default_profile);
        assert_eq!(loaded_config.profiles.len(), 1);
        let profile = loaded_config.get_profile("test").unwrap();
        assert_eq!(profile.customer_id, "acmecorp");
        assert_eq!(profile.api_url.as_deref(), Some("http://hub.test"));
    }

    #[test]
    fn test_load_missing_file_yields_default() {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let config = Config::load(Some(temp_dir.path().join("absent.toml")));
        assert!(config.is_ok());
        assert_eq!(config.unwrap().profiles.len(), 0);
    }

    #[test]
    fn test_load_rejects_malformed_toml() {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join("config.toml");
        fs::write(&config_path, "not = [valid").unwrap();

        let result = Config::load(Some(config_path));
        assert!(matches!(
            result,
            Err(StorageError::ConfigParseError { .. })
        ));
    }

    #[test]
    fn test_profile_names_sorted() {
        let mut config = Config::default();
        config.set_profile("prod".to_string(), sample_profile());
        config.set_profile("dev".to_string(), sample_profile());
        assert_eq!(config.profile_names(), vec!["dev", "prod"]);
    }
}
