//! Error types for the hostmonk service

/// Errors that can occur in the hostmonk service
#[derive(Debug, thiserror::Error)]
pub enum HostmonkError {
    #[error("Invalid YAML configuration: {0}")]
    ConfigParse(String),

    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Dashboard error: {0}")]
    Dashboard(String),
}

/// Result type alias for hostmonk operations
pub type Result<T> = std::result::Result<T, HostmonkError>;
