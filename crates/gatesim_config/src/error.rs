//! Errors raised while reading `gatesim.toml`.

/// Why a `gatesim.toml` could not be turned into a [`ProjectConfig`](crate::ProjectConfig).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file is missing or unreadable.
    #[error("failed to read configuration: {0}")]
    IoError(#[from] std::io::Error),

    /// Not valid TOML, or a value of the wrong type (an unknown report
    /// format, for instance).
    #[error("failed to parse configuration: {0}")]
    ParseError(String),

    /// `project.name` or `project.netlist` is empty.
    #[error("missing required field: {0}")]
    MissingField(String),

    /// A stimulus or report setting is out of range.
    #[error("validation error: {0}")]
    ValidationError(String),
}
