use clap::Parser;
use connector_cli::cli::dispatcher::Dispatcher;
use connector_cli::cli::main_types::Cli;
use connector_cli::storage::config::{Config, Profile};
use connector_cli::storage::credentials::Credentials;
use connector_cli::utils::logging;
use std::path::PathBuf;
use std::process::ExitCode;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    logging::init(cli.verbose);

    // Load Config
    let config_path = cli
        .config_dir
        .as_ref()
        .map(|dir| PathBuf::from(dir).join("config.toml"));

    let mut config = match Config::load(config_path.clone()) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Error loading config: {}", err);
            return ExitCode::from(1);
        }
    };

    // Determine the profile to use
    let profile_name = cli
        .profile
        .or(config.default_profile.clone())
        .unwrap_or_else(|| "default".to_string());

    // Create a default profile if it doesn't exist
    if config.get_profile(&profile_name).is_none() {
        if cli.verbose {
            println!("Creating default profile: {}", profile_name);
        }

        config.set_profile(profile_name.clone(), Profile::empty());

        if config.default_profile.is_none() {
            config.default_profile = Some(profile_name.clone());
        }

        if let Err(err) = config.save(config_path.clone()) {
            if cli.verbose {
                println!("Warning: Failed to save config: {}", err);
            }
        }
    }

    if cli.verbose {
        println!("Verbose mode is enabled");
        println!("Using profile: {}", profile_name);

        if let Some(config_dir) = &cli.config_dir {
            println!("Using config directory: {}", config_dir);
        }

        if cli.client_secret.as_ref().is_some_and(|s| !s.is_empty()) {
            println!("Using client secret provided via env or command line");
        }
    }

    // Load Credentials
    let credentials = match Credentials::load(&profile_name) {
        Ok(creds) => creds,
        Err(err) => {
            eprintln!("Error loading credentials: {}", err);
            Credentials::new(profile_name.clone())
        }
    };

    // Create dispatcher and execute the command
    let mut dispatcher = Dispatcher::new(
        config,
        config_path,
        credentials,
        cli.verbose,
        cli.client_secret,
    );

    match dispatcher.dispatch(cli.command).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} Error: {}", e.severity().emoji(), e);
            if let Some(hint) = e.troubleshooting_hint() {
                eprintln!("Hint: {}", hint);
            }
            ExitCode::from(1)
        }
    }
}
