//! Configuration file support.
//!
//! # Module Structure
//!
//! - `loader` - locating, reading and parsing `.tallycmp.toml`
//! - this module - the configuration types and precedence rules
//!
//! Precedence is command line, then configuration file, then the built-in
//! defaults (`lower = 0`, `upper = 10`, `sigma = 2`, verbosity `warning`).

mod loader;

pub use loader::{
    directory_ancestors, load_config, load_config_from, parse_config, CONFIG_FILE_NAME,
    MAX_TRAVERSAL_DEPTH,
};

use crate::comparison::tolerances::{CompareOptions, DEFAULT_LOWER, DEFAULT_SIGMA, DEFAULT_UPPER};
use crate::messages::Verbosity;
use serde::{Deserialize, Serialize};

/// Contents of a `.tallycmp.toml` file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TallycmpConfig {
    /// Minimum severity reported by comparisons
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verbosity: Option<Verbosity>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tolerances: Option<ToleranceConfig>,
}

/// Partial tolerance settings; unset fields fall through to the next layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ToleranceConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lower: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upper: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sigma: Option<i64>,
}

impl ToleranceConfig {
    /// Fields set here win; unset ones are taken from `fallback`.
    pub fn or(self, fallback: ToleranceConfig) -> ToleranceConfig {
        ToleranceConfig {
            lower: self.lower.or(fallback.lower),
            upper: self.upper.or(fallback.upper),
            sigma: self.sigma.or(fallback.sigma),
        }
    }
}

impl TallycmpConfig {
    /// Configuration written by `tallycmp init`.
    pub fn with_defaults() -> Self {
        Self {
            verbosity: Some(Verbosity::default()),
            tolerances: Some(ToleranceConfig {
                lower: Some(DEFAULT_LOWER),
                upper: Some(DEFAULT_UPPER),
                sigma: Some(DEFAULT_SIGMA),
            }),
        }
    }

    pub fn verbosity(&self) -> Verbosity {
        self.verbosity.unwrap_or_default()
    }

    /// Layer command-line values over this configuration.
    ///
    /// The options carry no verbosity override; the configured verbosity is
    /// applied as the thread default by the caller.
    pub fn compare_options(&self, cli: ToleranceConfig) -> CompareOptions {
        let merged = cli.or(self.tolerances.unwrap_or_default());
        CompareOptions::new(
            merged.lower.unwrap_or(DEFAULT_LOWER),
            merged.upper.unwrap_or(DEFAULT_UPPER),
            merged.sigma.unwrap_or(DEFAULT_SIGMA),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_config_uses_defaults() {
        let options = TallycmpConfig::default().compare_options(ToleranceConfig::default());
        assert_eq!(options, CompareOptions::default());
        assert_eq!(TallycmpConfig::default().verbosity(), Verbosity::Warning);
    }

    #[test]
    fn test_cli_overrides_config() {
        let config = TallycmpConfig {
            verbosity: Some(Verbosity::Error),
            tolerances: Some(ToleranceConfig {
                lower: Some(1.0),
                upper: Some(5.0),
                sigma: None,
            }),
        };
        let cli = ToleranceConfig {
            upper: Some(20.0),
            ..ToleranceConfig::default()
        };
        assert_eq!(config.compare_options(cli), CompareOptions::new(1.0, 20.0, 2));
    }
}
