//! Error types for the daybook ecosystem.

use thiserror::Error;

/// Errors that can occur in daybook operations.
///
/// Local-path errors (`Validation`, `NotFound`, `Storage`, `Io`) are
/// synchronous and caller-visible. `Remote` is caught at the coordinator
/// boundary, logged, and never surfaced to the original caller.
#[derive(Error, Debug)]
pub enum DaybookError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Remote sync error: {0}")]
    Remote(String),

    #[error("Assistant error: {0}")]
    Assistant(String),

    #[error("Offline: this action requires a network connection")]
    Offline,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for daybook operations.
pub type DaybookResult<T> = Result<T, DaybookError>;
