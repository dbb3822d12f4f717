use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    /// The TOML file or an environment override could not be read or deserialized.
    #[error("Failed to load credit analysis settings: {0}")]
    LoadError(#[from] config::ConfigError),

    /// The settings parsed but describe an inconsistent rule table.
    #[error("Invalid credit analysis settings: {0}")]
    ValidationError(String),
}
