use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("CliError: {0}")]
    Cli(#[from] CliError),
    #[error("ApiError: {0}")]
    Api(#[from] ApiError),
    #[error("AuthError: {0}")]
    Auth(#[from] AuthError),
    #[error("ConfigError: {0}")]
    Config(#[from] ConfigError),
    #[error("StorageError: {0}")]
    Storage(#[from] StorageError),
    #[error("ReportError: {0}")]
    Report(#[from] ReportError),
}

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Authentication required")]
    AuthRequired {
        message: String,
        hint: String,
        available_profiles: Vec<String>,
    },
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),
    #[error("Unknown configuration key: {key}")]
    UnknownConfigKey { key: String },
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("HTTP error: {status} from {endpoint}: {message}")]
    Http {
        status: u16,
        endpoint: String,
        message: String,
    },
    #[error("Transport error for {endpoint}: {message}")]
    Transport { endpoint: String, message: String },
    #[error("Response from {endpoint} did not match the expected shape: {message}")]
    Schema { endpoint: String, message: String },
    #[error("Authentication failed with status {status}")]
    Unauthorized {
        status: u16,
        endpoint: String,
        server_message: String,
    },
}

impl ApiError {
    /// Whether a failed call may succeed on a later attempt.
    ///
    /// Any non-success data-plane status and any transport failure is
    /// retryable; malformed bodies and rejected credentials are not.
    pub fn is_retryable(&self) -> bool {
        match self {
            ApiError::Http { .. } | ApiError::Transport { .. } => true,
            ApiError::Schema { .. } | ApiError::Unauthorized { .. } => false,
        }
    }
}

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Bearer token request rejected with status {status}")]
    TokenRejected { status: u16 },
    #[error("No API client id configured")]
    MissingClientId,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Profile '{name}' not found")]
    ProfileNotFound { name: String },
    #[error("Configuration field '{field}' is not set")]
    MissingField { field: String, hint: String },
    #[error("Invalid configuration value for '{field}': {value}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Keyring error: {0}")]
    KeyringError(String),
    #[error("File I/O error at {path}: {source}")]
    FileIo {
        path: String,
        source: std::io::Error,
    },
    #[error("Configuration save failed")]
    ConfigSaveFailed,
    #[error("Configuration parse error: {message}")]
    ConfigParseError { message: String },
}

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("CSV write error: {0}")]
    Csv(String),
    #[error("Report I/O error at {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum ErrorSeverity {
    Critical,
    High,
    Medium,
    Low,
}

impl ErrorSeverity {
    pub fn emoji(&self) -> &'static str {
        match self {
            ErrorSeverity::Critical => "🚨",
            ErrorSeverity::High => "❌",
            ErrorSeverity::Medium => "⚠️",
            ErrorSeverity::Low => "ℹ️",
        }
    }
}

impl AppError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            AppError::Cli(_) => ErrorSeverity::Medium,
            AppError::Api(api_error) => match api_error {
                ApiError::Unauthorized { .. } => ErrorSeverity::High,
                ApiError::Http { status, .. } if *status >= 500 => ErrorSeverity::High,
                _ => ErrorSeverity::Medium,
            },
            AppError::Auth(_) => ErrorSeverity::High,
            AppError::Config(_) => ErrorSeverity::High,
            AppError::Storage(_) => ErrorSeverity::Medium,
            AppError::Report(_) => ErrorSeverity::Medium,
        }
    }

    pub fn troubleshooting_hint(&self) -> Option<String> {
        match self {
            AppError::Auth(AuthError::TokenRejected { .. }) => Some(
                "Check your customer id, client id, and client secret, then try again".to_string(),
            ),
            AppError::Auth(AuthError::MissingClientId) => {
                Some("'connector-cli auth login' to store API credentials".to_string())
            }
            AppError::Cli(CliError::AuthRequired { hint, .. }) => Some(hint.clone()),
            AppError::Config(ConfigError::MissingField { hint, .. }) => Some(hint.clone()),
            AppError::Api(ApiError::Transport { .. }) => {
                Some("Check your internet connection and the configured API URLs".to_string())
            }
            _ => None,
        }
    }
}
