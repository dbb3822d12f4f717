use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use error::ConfigError;
pub use settings::{CandidateFloor, Config, DisplaySettings, RecommendationRules, ThresholdLadder};

/// Environment variables with this prefix override file values, using `__` to
/// descend into sections (e.g. `CREDIT_ANALYSIS_DISPLAY__DECIMAL_PLACES=4`).
pub const ENV_PREFIX: &str = "CREDIT_ANALYSIS";

/// Loads the application configuration from a TOML file.
///
/// Reads the file, layers environment overrides on top, deserializes the
/// result into our strongly-typed `Config` struct and validates it.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    load_config_with_env(path, ENV_PREFIX)
}

fn load_config_with_env(path: &Path, env_prefix: &str) -> Result<Config, ConfigError> {
    // The prefix is joined with a single `_`; only section nesting uses `__`.
    let builder = config::Config::builder()
        .add_source(config::File::from(path))
        .add_source(
            config::Environment::with_prefix(env_prefix)
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    // Attempt to deserialize the entire configuration into our `Config` struct
    let config = builder.try_deserialize::<Config>()?;
    config.validate()?;

    tracing::debug!(path = %path.display(), "Loaded configuration.");
    Ok(config)
}

/// Like [`load_config`], but falls back to the built-in thresholds when the
/// file does not exist.
pub fn load_config_or_default(path: &Path) -> Result<Config, ConfigError> {
    if path.exists() {
        return load_config(path);
    }
    tracing::info!(path = %path.display(), "No configuration file found; using built-in thresholds.");
    Ok(Config::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::io::Write;

    fn write_toml(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = load_config_or_default(Path::new("does/not/exist.toml")).unwrap();
        assert_eq!(config.recommendation, RecommendationRules::default());
        assert_eq!(config.display.decimal_places, 2);
    }

    #[test]
    fn partial_file_overrides_only_named_sections() {
        let file = write_toml(
            r#"
[display]
decimal_places = 4

[recommendation.debt_service]
top = "1.75"
middle = "1.35"
bottom = "1.15"
"#,
        );

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.display.decimal_places, 4);
        assert_eq!(config.recommendation.debt_service.top, dec!(1.75));
        assert_eq!(
            config.recommendation.liquidity,
            RecommendationRules::default().liquidity
        );
    }

    #[test]
    fn environment_overrides_file_values() {
        // A prefix no other test uses, so setting it cannot leak into parallel tests.
        const PREFIX: &str = "CREDIT_ANALYSIS_ENVTEST";
        const VAR: &str = "CREDIT_ANALYSIS_ENVTEST_DISPLAY__DECIMAL_PLACES";
        let file = write_toml("[display]\ndecimal_places = 4\n");

        // SAFETY: VAR is read and written by this test alone.
        unsafe { std::env::set_var(VAR, "5") };
        let loaded = load_config_with_env(file.path(), PREFIX);
        unsafe { std::env::remove_var(VAR) };

        assert_eq!(loaded.unwrap().display.decimal_places, 5);
    }

    #[test]
    fn invalid_ladder_is_rejected_at_load() {
        let file = write_toml(
            r#"
[recommendation.profitability]
top = "10"
middle = "15"
bottom = "20"
"#,
        );

        assert!(matches!(
            load_config(file.path()),
            Err(ConfigError::ValidationError(_))
        ));
    }
}
