pub use error::AppError;

/// Main architecture layers (dependency flow: CLI → Core → Storage)
pub mod cli; // Command-line interface
pub mod core; // Business logic
pub mod storage; // Configuration and credential persistence

/// Support modules (used across layers)
pub mod api; // Citrix Cloud API client
pub mod display; // Output formatting
pub mod error; // Error handling
pub mod report; // CSV report emitter
pub mod utils; // Shared utilities and helpers

pub type Result<T> = std::result::Result<T, AppError>;
