use crate::api::client::CloudApiClient;
use crate::cli::main_types::{AuthCommands, Commands, ConfigCommands};
use crate::core::auth::CredentialInput;
use crate::core::evaluator;
use crate::core::services::auth_service::AuthService;
use crate::core::services::connector_service::ConnectorService;
use crate::display::TableDisplay;
use crate::error::{AppError, AuthError, CliError, ConfigError};
use crate::report;
use crate::storage::config::{Config, Profile};
use crate::storage::credentials::{Credentials, SecretSource};
use crate::utils::validation::{validate_customer_id, validate_url};
use std::path::PathBuf;
use std::process::ExitCode;

pub struct Dispatcher {
    config: Config,
    config_path: Option<PathBuf>,
    credentials: Credentials,
    verbose: bool,
    client_secret: Option<String>,
}

impl Dispatcher {
    // Static helper for verbose logging (used before self exists)
    fn print_verbose(verbose: bool, msg: &str) {
        if verbose {
            println!("Verbose: {}", msg);
        }
    }

    fn log_verbose(&self, msg: &str) {
        Self::print_verbose(self.verbose, msg);
    }

    pub fn new(
        config: Config,
        config_path: Option<PathBuf>,
        credentials: Credentials,
        verbose: bool,
        client_secret: Option<String>,
    ) -> Self {
        Self {
            config,
            config_path,
            credentials,
            verbose,
            client_secret: client_secret.filter(|s| !s.is_empty()),
        }
    }

    pub async fn dispatch(&mut self, command: Commands) -> Result<ExitCode, AppError> {
        match command {
            Commands::Auth { command } => self.handle_auth_command(command).await,
            Commands::Config { command } => self.handle_config_command(command).await,
            Commands::Status { output, table } => self.handle_status_command(output, table).await,
        }
    }

    async fn handle_auth_command(&self, commands: AuthCommands) -> Result<ExitCode, AppError> {
        match commands {
            AuthCommands::Login => {
                self.log_verbose("Attempting auth login command");

                let profile = self.config.get_profile(&self.credentials.profile_name);
                let input =
                    CredentialInput::collect(profile.and_then(|p| p.client_id.as_deref()))?;
                input.validate()?;

                // Verify against the identity endpoint when the profile is
                // complete enough to reach it.
                match profile.filter(|p| !p.customer_id.is_empty()) {
                    Some(profile) => {
                        let client = self.build_client(profile)?;
                        let auth = AuthService::new(
                            client,
                            input.client_id.clone(),
                            input.client_secret.clone(),
                        );
                        match auth.acquire_session().await {
                            Ok(_) => println!("✅ API token accepted"),
                            Err(e) => {
                                println!("❌ Credential verification failed: {}", e);
                                return Err(e);
                            }
                        }
                    }
                    None => {
                        println!("No customer id configured yet, storing credentials unverified");
                    }
                }

                Credentials::save_login_for_profile(
                    &self.credentials.profile_name,
                    &input.client_id,
                    &input.client_secret,
                )?;
                println!(
                    "✅ Stored API credentials for profile: {}",
                    self.credentials.profile_name
                );
                Ok(ExitCode::SUCCESS)
            }
            AuthCommands::Logout => {
                self.log_verbose("Attempting auth logout command");
                Credentials::clear_login_for_profile(&self.credentials.profile_name)?;
                println!(
                    "✅ Removed stored API credentials for profile: {}",
                    self.credentials.profile_name
                );
                Ok(ExitCode::SUCCESS)
            }
            AuthCommands::Status => {
                self.log_verbose("Attempting auth status command");

                println!("Authentication Status:");
                println!("=====================");

                match Credentials::secret_source(self.client_secret.as_deref()) {
                    SecretSource::Environment => {
                        println!("Secret Source: flag or environment");
                        if let Some(secret) = &self.client_secret {
                            println!("Client Secret: {}", mask(secret));
                        }
                    }
                    SecretSource::Keyring => {
                        println!("Secret Source: OS keyring");
                        if self.credentials.has_stored_secret() {
                            println!("Client Secret: (stored)");
                        } else {
                            println!("Client Secret: (not set, run 'auth login')");
                        }
                    }
                }

                let client_id = self
                    .config
                    .get_profile(&self.credentials.profile_name)
                    .and_then(|p| p.client_id.clone())
                    .or_else(|| self.credentials.client_id());
                match client_id {
                    Some(id) => println!("Client Id: {}", mask(&id)),
                    None => println!("Client Id: (not set)"),
                }

                println!("\nActive Profile: {}", self.credentials.profile_name);
                Ok(ExitCode::SUCCESS)
            }
        }
    }

    async fn handle_config_command(
        &mut self,
        commands: ConfigCommands,
    ) -> Result<ExitCode, AppError> {
        match commands {
            ConfigCommands::Show => {
                self.log_verbose("Attempting config show command");

                println!("Current Configuration:");
                println!("=====================");

                if let Some(default_profile) = &self.config.default_profile {
                    println!("Default Profile: {}", default_profile);
                } else {
                    println!("Default Profile: (not set)");
                }

                println!("\nProfiles:");
                if self.config.profiles.is_empty() {
                    println!("  No profiles configured");
                } else {
                    for name in self.config.profile_names() {
                        let profile = &self.config.profiles[&name];
                        println!("  [{}]", name);
                        if profile.customer_id.is_empty() {
                            println!("    Customer Id: (not set)");
                        } else {
                            println!("    Customer Id: {}", profile.customer_id);
                        }
                        if let Some(client_id) = &profile.client_id {
                            println!("    Client Id: {}", mask(client_id));
                        }
                        println!("    Identity URL: {}", profile.resolved_identity_url());
                        println!("    API URL: {}", profile.resolved_api_url());
                        if let Some(timeout) = profile.timeout_seconds {
                            println!("    Timeout: {} seconds", timeout);
                        }
                    }
                }

                Ok(ExitCode::SUCCESS)
            }
            ConfigCommands::Set { key, value } => {
                self.log_verbose(&format!(
                    "Attempting config set - key: {}, value: {}",
                    key, value
                ));

                if key == "default_profile" {
                    self.config.default_profile = Some(value);
                } else {
                    let profile_name = self.credentials.profile_name.clone();
                    let profile = self
                        .config
                        .profiles
                        .entry(profile_name)
                        .or_insert_with(Profile::empty);

                    match key.as_str() {
                        "customer_id" => {
                            validate_customer_id(&value)?;
                            profile.customer_id = value;
                        }
                        "client_id" => profile.client_id = Some(value),
                        "identity_url" => {
                            validate_url(&value)?;
                            profile.identity_url = Some(value);
                        }
                        "api_url" => {
                            validate_url(&value)?;
                            profile.api_url = Some(value);
                        }
                        "timeout_seconds" => {
                            let timeout = value.parse::<u64>().map_err(|_| {
                                ConfigError::InvalidValue {
                                    field: "timeout_seconds".to_string(),
                                    value: value.clone(),
                                    reason: "expected a positive integer".to_string(),
                                }
                            })?;
                            profile.timeout_seconds = Some(timeout);
                        }
                        _ => return Err(CliError::UnknownConfigKey { key }.into()),
                    }
                }

                self.config.save(self.config_path.clone())?;
                println!("✅ Updated configuration");
                Ok(ExitCode::SUCCESS)
            }
        }
    }

    async fn handle_status_command(
        &self,
        output: Option<PathBuf>,
        table: bool,
    ) -> Result<ExitCode, AppError> {
        self.log_verbose("Attempting status command");

        let profile = self
            .config
            .get_profile(&self.credentials.profile_name)
            .ok_or_else(|| ConfigError::ProfileNotFound {
                name: self.credentials.profile_name.clone(),
            })?;

        if profile.customer_id.is_empty() {
            return Err(ConfigError::MissingField {
                field: "customer_id".to_string(),
                hint: "'connector-cli config set customer_id <id>' to set it".to_string(),
            }
            .into());
        }
        validate_customer_id(&profile.customer_id)?;

        let client = self.build_client(profile)?;

        let client_id = profile
            .client_id
            .clone()
            .or_else(|| self.credentials.client_id())
            .ok_or(AuthError::MissingClientId)?;
        let client_secret = self
            .client_secret
            .clone()
            .or_else(|| self.credentials.client_secret())
            .ok_or_else(|| CliError::AuthRequired {
                message: "No API client secret available".to_string(),
                hint: "'connector-cli auth login' or set CTX_CLIENT_SECRET".to_string(),
                available_profiles: self.config.profile_names(),
            })?;

        let auth = AuthService::new(client.clone(), client_id, client_secret);
        let mut session = auth.acquire_session().await?;
        self.log_verbose(&format!("Session valid until {}", session.expires_at()));

        let collector = ConnectorService::new(client, auth);
        let outcome = collector.collect(&mut session).await?;

        for failure in &outcome.schema_failures {
            eprintln!(
                "Warning: connector {} returned a malformed record: {}",
                failure.connector_id, failure.message
            );
        }

        println!(
            "Collected details for {} connector(s)",
            outcome.records.len()
        );

        let summary = evaluator::evaluate(&outcome.records);
        for line in summary.summary_lines() {
            println!("{}", line);
        }

        if table {
            let display = TableDisplay::new().with_colors(atty::is(atty::Stream::Stdout));
            println!("{}", display.render_connector_table(&outcome.records));
        }

        let path = output.unwrap_or_else(|| PathBuf::from(report::DEFAULT_REPORT_PATH));
        report::write_report_file(&path, &outcome.records)?;
        println!("Wrote connector report to {}", path.display());

        Ok(if summary.attention_required() {
            ExitCode::from(2)
        } else {
            ExitCode::SUCCESS
        })
    }

    fn build_client(&self, profile: &Profile) -> Result<CloudApiClient, AppError> {
        let identity_url = profile.resolved_identity_url();
        let api_url = profile.resolved_api_url();
        validate_url(&identity_url)?;
        validate_url(&api_url)?;

        Ok(CloudApiClient::new(
            identity_url,
            api_url,
            profile.customer_id.clone(),
            profile.timeout_seconds,
        )?)
    }
}

fn mask(value: &str) -> String {
    if value.len() > 8 {
        format!("{}...{}", &value[..4], &value[value.len() - 4..])
    } else {
        "*****".to_string()
    }
}
