use crate::error::{AppError, CliError};
use rpassword::read_password;
use std::io::{self, Write};

/// API credential input handler for `auth login`
///
/// Interactive prompting lives here and only here; the status data path
/// never blocks on console input.
pub struct CredentialInput {
    pub client_id: String,
    pub client_secret: String,
}

impl CredentialInput {
    /// Collect an API client id and secret from interactive input.
    /// If `profile_client_id` is provided, only the secret is prompted.
    pub fn collect(profile_client_id: Option<&str>) -> Result<Self, AppError> {
        let client_id = if let Some(id) = profile_client_id {
            println!("Using client id from profile: {}", id);
            id.to_string()
        } else {
            print!("Client id: ");
            io::stdout().flush().map_err(|e| {
                AppError::Cli(CliError::InvalidArguments(format!(
                    "Failed to flush stdout: {}",
                    e
                )))
            })?;

            let mut client_id = String::new();
            io::stdin().read_line(&mut client_id).map_err(|e| {
                AppError::Cli(CliError::InvalidArguments(format!(
                    "Failed to read client id: {}",
                    e
                )))
            })?;
            client_id.trim().to_string()
        };

        print!("Client secret: ");
        io::stdout().flush().map_err(|e| {
            AppError::Cli(CliError::InvalidArguments(format!(
                "Failed to flush stdout: {}",
                e
            )))
        })?;

        let client_secret = read_password().map_err(|e| {
            AppError::Cli(CliError::InvalidArguments(format!(
                "Failed to read client secret: {}",
                e
            )))
        })?;

        Ok(Self {
            client_id,
            client_secret: client_secret.trim().to_string(),
        })
    }

    /// Validate that credentials are not empty
    pub fn validate(&self) -> Result<(), AppError> {
        if self.client_id.is_empty() {
            return Err(AppError::Cli(CliError::InvalidArguments(
                "Client id cannot be empty".to_string(),
            )));
        }
        if self.client_secret.is_empty() {
            return Err(AppError::Cli(CliError::InvalidArguments(
                "Client secret cannot be empty".to_string(),
            )));
        }
        Ok(())
    }
}
