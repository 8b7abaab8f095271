use super::{try_get_secret_env, ConfigurationError};
use crate::config::environment::Environment;
use secrecy::Secret;
use serde::Deserialize;
use time::Duration;
use tracing::warn;

pub const NAME_OFFER_SECRET: &str = "OFFER_SIGNING_SECRET";
pub const NAME_SERVICE_ROLE_SECRET: &str = "SERVICE_ROLE_SECRET";

const OFFER_EXPIRATION: Duration = Duration::hours(48);
const DEV_SECRET: &str = "OFFER_DEV_SECRET";

#[derive(Deserialize)]
pub struct OfferSettingsModel {
    pub secret: Option<String>,
    pub expiration: Option<Duration>,
}

impl OfferSettingsModel {
    pub fn to_settings(self) -> OfferSettings {
        let secret = self.secret.unwrap_or_else(|| {
            warn!("Using default offer signing secret");
            DEV_SECRET.to_string()
        });
        let expiration = self.expiration.map_or(OFFER_EXPIRATION, |expiration| {
            warn!("Using custom offer expiration of {}", &expiration);
            expiration
        });
        OfferSettings::with_expiration(&secret, expiration)
    }
}

#[derive(Clone)]
pub struct OfferSettings {
    pub secret: Secret<String>,
    pub expiration: Duration,
}

impl OfferSettings {
    pub fn new(secret: &str) -> Self {
        Self::with_expiration(secret, OFFER_EXPIRATION)
    }

    fn with_expiration(secret: &str, expiration: Duration) -> Self {
        Self {
            secret: Secret::new(secret.to_owned()),
            expiration,
        }
    }

    /// Resolves the signing secret once, at startup. The service-role
    /// fallback is allowed outside production only.
    pub fn from_env(environment: &Environment) -> Result<Self, ConfigurationError> {
        let secret = match try_get_secret_env(NAME_OFFER_SECRET) {
            Some(secret) => secret,
            None if environment.is_dev() => {
                warn!("{NAME_OFFER_SECRET} is not set, trying {NAME_SERVICE_ROLE_SECRET}");
                try_get_secret_env(NAME_SERVICE_ROLE_SECRET)
                    .ok_or(ConfigurationError::MissingSigningSecret)?
            }
            None => return Err(ConfigurationError::MissingSigningSecret),
        };

        Ok(Self {
            secret,
            expiration: OFFER_EXPIRATION,
        })
    }
}

impl Default for OfferSettings {
    fn default() -> Self {
        Self::new(DEV_SECRET)
    }
}
