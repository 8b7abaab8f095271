use crate::config::environment::Environment;
use crate::config::tokens::{OfferSettings, OfferSettingsModel, NAME_OFFER_SECRET};
use config::Config;
use secrecy::Secret;
use serde::Deserialize;
use std::env;
use thiserror::Error;
use tracing::{error, warn};

pub mod environment;
pub mod tokens;

const CONFIG_DIR: &str = "configuration";
const CONFIG_FILE_NAME: &str = "settings.toml";

/// Fatal at startup, not retryable.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("Missing offer signing secret, set OFFER_SIGNING_SECRET")]
    MissingSigningSecret,
    #[error(transparent)]
    Parse(#[from] config::ConfigError),
}

#[derive(Deserialize)]
pub struct SettingsModel {
    pub offers: Option<OfferSettingsModel>,
}

impl SettingsModel {
    fn parse() -> Result<Self, config::ConfigError> {
        let base_path = std::env::current_dir().expect("Failed to determine the current directory");
        let config_dir = base_path.join(CONFIG_DIR);
        let settings = Config::builder()
            .add_source(config::File::from(config_dir.join(CONFIG_FILE_NAME)))
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__"),
            );
        Ok(settings.build()?.try_deserialize()?)
    }
}

#[derive(Clone)]
pub struct Settings {
    pub offers: OfferSettings,
    pub environment: Environment,
}

impl Settings {
    fn dev(model: SettingsModel) -> Self {
        // the env chain wins over the settings file when it resolves
        let offers = OfferSettings::from_env(&Environment::Development).unwrap_or_else(|_| {
            model.offers.map_or_else(
                || {
                    warn!("Using default `offers` settings!");
                    OfferSettings::default()
                },
                |x| x.to_settings(),
            )
        });

        Self {
            offers,
            environment: Environment::Development,
        }
    }

    fn prod() -> Result<Self, ConfigurationError> {
        Ok(Self {
            offers: OfferSettings::from_env(&Environment::Production)?,
            environment: Environment::Production,
        })
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            offers: OfferSettings::default(),
            environment: Environment::default(),
        }
    }
}

pub fn get_config() -> Result<Settings, ConfigurationError> {
    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .map_or(Environment::Development, |env| {
            env.try_into().expect("Failed to parse APP_ENVIRONMENT.")
        });

    return match environment {
        Environment::Development => {
            let res = SettingsModel::parse().map_err(|e| {
                error!("{e}\n - check {CONFIG_DIR}/{CONFIG_FILE_NAME}, reference at README.md")
            });
            if let Ok(model) = res {
                return Ok(Settings::dev(model));
            }
            let default = Settings::default();
            warn!("Using default configuration!");
            return Ok(default);
        }

        Environment::Production => {
            if !is_ok_env() {
                return Err(ConfigurationError::MissingSigningSecret);
            }
            Settings::prod()
        }
    };
}

pub fn try_get_env(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

pub fn try_get_secret_env(name: &str) -> Option<Secret<String>> {
    Some(Secret::from(try_get_env(name)?))
}

fn is_ok_env() -> bool {
    let args: Vec<String> = env::vars().map(|(key, _)| key).collect();
    let required_variables = [NAME_OFFER_SECRET];
    let mut buf = vec![];
    for required_var in required_variables {
        let var = required_var.to_owned();
        if !args.contains(&var) {
            buf.push(var);
        }
    }
    if buf.is_empty() {
        return true;
    }
    error!("Provide missing environment variables {buf:?}");
    false
}
