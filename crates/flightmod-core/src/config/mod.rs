//! Configuration schemas.
//!
//! The root [`AppConfig`] is deserialized with the `config` crate from an
//! optional TOML file overlaid with `FLIGHTMOD__*` environment variables.
//! Every field has a serde default, so an empty source yields a usable
//! configuration.

pub mod logging;
pub mod modules;

use std::path::Path;

use serde::{Deserialize, Serialize};

use self::logging::LoggingConfig;
use self::modules::ModuleConfig;

use crate::error::AppError;
use crate::result::AppResult;

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// External module discovery settings.
    #[serde(default)]
    pub modules: ModuleConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file and the environment.
    ///
    /// A missing file is not an error; environment variables prefixed with
    /// `FLIGHTMOD_` (nested keys separated by `__`) override file values,
    /// e.g. `FLIGHTMOD_MODULES__DIRECTORY=/opt/modules`.
    pub fn load(path: impl AsRef<Path>) -> AppResult<Self> {
        let config = config::Config::builder()
            .add_source(
                config::File::from(path.as_ref())
                    .format(config::FileFormat::Toml)
                    .required(false),
            )
            .add_source(
                config::Environment::with_prefix("FLIGHTMOD")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }
}
