//! Configuration loading for the API binary
//!
//! Sources are layered lowest to highest:
//! 1. the preset for the active environment (`AppConfig::for_environment`)
//! 2. an optional `config.<env>.toml` in the working directory
//! 3. environment variables prefixed `OTP`, nested with `__`
//!    (e.g. `OTP__RATE_LIMIT__MAX_SEND_ATTEMPTS=3`)

use config::{Config, ConfigError, Environment as EnvSource, File};
use otp_shared::config::{AppConfig, Environment};

const ENV_PREFIX: &str = "OTP";
const ENV_SEPARATOR: &str = "__";

/// Load `.env` files and then the layered configuration
pub fn load() -> Result<AppConfig, ConfigError> {
    let environment = Environment::from_env();

    // Environment-specific file first so it wins over the generic one
    dotenvy::from_filename(environment.env_file()).ok();
    dotenvy::dotenv().ok();

    load_for(environment)
}

/// Build the configuration for an explicit environment
pub fn load_for(environment: Environment) -> Result<AppConfig, ConfigError> {
    let preset = AppConfig::for_environment(environment);

    let mut app_config: AppConfig = Config::builder()
        .add_source(Config::try_from(&preset)?)
        .add_source(File::with_name(environment.config_file()).required(false))
        .add_source(
            EnvSource::with_prefix(ENV_PREFIX)
                .prefix_separator(ENV_SEPARATOR)
                .separator(ENV_SEPARATOR)
                .try_parsing(true),
        )
        .build()?
        .try_deserialize()?;

    app_config.environment = environment;
    validate(&app_config)?;
    Ok(app_config)
}

fn validate(config: &AppConfig) -> Result<(), ConfigError> {
    config.otp.validate().map_err(ConfigError::Message)?;
    config.rate_limit.validate().map_err(ConfigError::Message)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_survives_layering() {
        let config = load_for(Environment::Production).unwrap();
        assert_eq!(config.environment, Environment::Production);
        assert_eq!(config.otp.code_length, 6);
        assert_eq!(config.otp.ttl_minutes, 10);
        assert_eq!(config.rate_limit.window_seconds, 3600);
    }

    #[test]
    fn test_validate_rejects_zero_ttl() {
        let mut config = AppConfig::default();
        config.otp.ttl_minutes = 0;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_validate_rejects_zero_window() {
        let mut config = AppConfig::default();
        config.rate_limit.window_seconds = 0;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_validate_rejects_oversized_values() {
        let mut config = AppConfig::default();
        config.otp.ttl_minutes = i64::MAX;
        assert!(validate(&config).is_err());

        let mut config = AppConfig::default();
        config.rate_limit.window_seconds = u64::MAX;
        assert!(validate(&config).is_err());

        let mut config = AppConfig::default();
        config.otp.code_length = 19;
        assert!(validate(&config).is_err());
    }
}
