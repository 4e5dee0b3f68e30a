//! Configuration system for tally with multi-source loading.
//!
//! Merges settings from CLI flags, environment variables and a config file.
//! Priority: CLI > Environment > File > Defaults

mod loading;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub use loading::{ConfigOverrides, DEFAULT_CONFIG_FILE};

/// Tally configuration - loaded from tally.config.json, `TALLY_*` or flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TallyConfig {
    /// Longest reason chain `why` follows
    #[serde(default = "default_max_chain_depth")]
    pub max_chain_depth: usize,

    /// Show icon references next to entities
    #[serde(default)]
    pub show_icons: bool,

    /// Unit used when printing sizes
    #[serde(default)]
    pub size_unit: SizeUnit,
}

/// How byte sizes are printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SizeUnit {
    /// Exact byte counts
    #[default]
    Bytes,
    /// Kibibytes with two decimals
    Kib,
    /// Largest fitting unit (B, KB, MB, GB)
    Human,
}

pub fn default_max_chain_depth() -> usize {
    tally_graph::DEFAULT_MAX_CHAIN_DEPTH
}

impl Default for TallyConfig {
    fn default() -> Self {
        Self {
            max_chain_depth: default_max_chain_depth(),
            show_icons: false,
            size_unit: SizeUnit::default(),
        }
    }
}

impl TallyConfig {
    /// Reject values no command can work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_chain_depth == 0 {
            return Err(ConfigError::InvalidValue {
                field: "max_chain_depth".to_string(),
                value: "0".to_string(),
                hint: "Use a depth of at least 1".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = TallyConfig::default();
        assert_eq!(config.max_chain_depth, tally_graph::DEFAULT_MAX_CHAIN_DEPTH);
        assert!(!config.show_icons);
        assert_eq!(config.size_unit, SizeUnit::Bytes);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_depth_is_rejected() {
        let config = TallyConfig {
            max_chain_depth: 0,
            ..TallyConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn partial_file_uses_defaults() {
        let config: TallyConfig = serde_json::from_str(r#"{ "size_unit": "kib" }"#).unwrap();
        assert_eq!(config.size_unit, SizeUnit::Kib);
        assert_eq!(config.max_chain_depth, default_max_chain_depth());
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let result: Result<TallyConfig, _> = serde_json::from_str(r#"{ "depth": 3 }"#);
        assert!(result.is_err());
    }
}
