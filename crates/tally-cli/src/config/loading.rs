use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format as _, Json, Serialized},
};
use serde::Serialize;
use tracing::debug;

use crate::config::{SizeUnit, TallyConfig};
use crate::error::{ConfigError, Result};

/// Config file picked up from the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "tally.config.json";

const ENV_PREFIX: &str = "TALLY_";
const ENV_KEYS: &[&str] = &["max_chain_depth", "show_icons", "size_unit"];

/// Values given on the command line; unset fields leave lower layers alone.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConfigOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_chain_depth: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_icons: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_unit: Option<SizeUnit>,
}

impl TallyConfig {
    /// Load configuration from multiple sources.
    /// Priority: CLI overrides > environment variables > config file > defaults
    pub fn load(config_path: Option<&Path>, overrides: &ConfigOverrides) -> Result<Self> {
        let mut figment = Figment::new().merge(Serialized::defaults(Self::default()));

        let config_file = match config_path {
            Some(path) if !path.exists() => {
                return Err(ConfigError::NotFound(path.to_path_buf()).into());
            }
            Some(path) => Some(path.to_path_buf()),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                default_path.exists().then(|| default_path.to_path_buf())
            }
        };

        if let Some(path) = &config_file {
            debug!(path = %path.display(), "loading config file");
            figment = figment.merge(Json::file(path));
        }

        // TALLY_MAX_CHAIN_DEPTH, TALLY_SHOW_ICONS, TALLY_SIZE_UNIT
        figment = figment.merge(Env::prefixed(ENV_PREFIX).only(ENV_KEYS));

        figment = figment.merge(Serialized::defaults(overrides));

        let config: Self = figment.extract().map_err(|e| ConfigError::InvalidValue {
            field: "configuration".to_string(),
            value: e.to_string(),
            hint: format!("Check {DEFAULT_CONFIG_FILE} syntax and field types"),
        })?;

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    fn load(path: Option<&Path>, overrides: &ConfigOverrides) -> figment::Result<TallyConfig> {
        TallyConfig::load(path, overrides).map_err(|e| e.to_string().into())
    }

    #[test]
    fn defaults_without_sources() {
        Jail::expect_with(|_jail| {
            let config = load(None, &ConfigOverrides::default())?;
            assert_eq!(config, TallyConfig::default());
            Ok(())
        });
    }

    #[test]
    fn file_then_env_then_overrides() {
        Jail::expect_with(|jail| {
            jail.create_file(
                DEFAULT_CONFIG_FILE,
                r#"{ "max_chain_depth": 5, "show_icons": true, "size_unit": "kib" }"#,
            )?;

            let config = load(None, &ConfigOverrides::default())?;
            assert_eq!(config.max_chain_depth, 5);
            assert!(config.show_icons);
            assert_eq!(config.size_unit, SizeUnit::Kib);

            jail.set_env("TALLY_MAX_CHAIN_DEPTH", "7");
            let config = load(None, &ConfigOverrides::default())?;
            assert_eq!(config.max_chain_depth, 7);

            let overrides = ConfigOverrides {
                max_chain_depth: Some(2),
                size_unit: Some(SizeUnit::Human),
                ..ConfigOverrides::default()
            };
            let config = load(None, &overrides)?;
            assert_eq!(config.max_chain_depth, 2);
            assert_eq!(config.size_unit, SizeUnit::Human);
            assert!(config.show_icons);
            Ok(())
        });
    }

    #[test]
    fn explicit_path_must_exist() {
        Jail::expect_with(|_jail| {
            let result = TallyConfig::load(
                Some(Path::new("missing.json")),
                &ConfigOverrides::default(),
            );
            assert!(matches!(
                result,
                Err(crate::error::CliError::Config(ConfigError::NotFound(_)))
            ));
            Ok(())
        });
    }

    #[test]
    fn invalid_values_are_reported() {
        Jail::expect_with(|jail| {
            jail.create_file("ci.json", r#"{ "max_chain_depth": 0 }"#)?;
            let result = TallyConfig::load(Some(Path::new("ci.json")), &ConfigOverrides::default());
            assert!(result.is_err());

            jail.create_file("bad.json", r#"{ "size_unit": "parsecs" }"#)?;
            let result =
                TallyConfig::load(Some(Path::new("bad.json")), &ConfigOverrides::default());
            assert!(result.is_err());
            Ok(())
        });
    }

    #[test]
    fn unrelated_env_is_ignored() {
        Jail::expect_with(|jail| {
            jail.set_env("TALLY_UNRELATED", "1");
            let config = load(None, &ConfigOverrides::default())?;
            assert_eq!(config, TallyConfig::default());
            Ok(())
        });
    }
}
