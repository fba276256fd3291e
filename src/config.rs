//! @ai:module:intent TOML configuration for the command-line tool
//! @ai:module:layer infrastructure
//! @ai:module:public_api Config, OutputConfig, ReplayConfig
//! @ai:module:depends_on extractor, output, error

use crate::error::{Error, Result};
use crate::extractor::ExtractOptions;
use crate::output::OutputFormat;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// @ai:intent Settings read from `showparse.toml`; every section is optional
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub extract: ExtractOptions,
    pub output: OutputConfig,
    pub replay: ReplayConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub color: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::JsonPretty,
            color: true,
        }
    }
}

/// Where `ReplayDevice` looks for captures when no `--replay-dir` is given.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplayConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
}

impl Config {
    /// @ai:intent Read a configuration file
    /// @ai:effects fs:read
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| Error::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(toml::from_str(&text)?)
    }

    /// @ai:intent Write the configuration as TOML
    /// @ai:effects fs:write
    pub fn save(&self, path: &Path) -> Result<()> {
        let text = toml::to_string_pretty(self)?;
        std::fs::write(path, text)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::RuleErrorPolicy;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("showparse.toml");
        fs::write(&path, "[extract]\non_rule_error = \"fail\"\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.extract.on_rule_error, RuleErrorPolicy::Fail);
        assert_eq!(config.output, OutputConfig::default());
        assert_eq!(config.replay.dir, None);
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("showparse.toml");
        let config = Config {
            output: OutputConfig {
                format: OutputFormat::Text,
                color: false,
            },
            replay: ReplayConfig {
                dir: Some(PathBuf::from("captures")),
            },
            ..Config::default()
        };

        config.save(&path).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("format = \"text\""));
        assert_eq!(Config::load(&path).unwrap(), config);
    }

    #[test]
    fn test_invalid_policy_is_a_config_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(&path, "[extract]\non_rule_error = \"sometimes\"\n").unwrap();

        assert!(matches!(Config::load(&path), Err(Error::Config(_))));
    }

    #[test]
    fn test_missing_file() {
        let err = Config::load(Path::new("/nonexistent/showparse.toml")).unwrap_err();
        assert!(matches!(err, Error::FileRead { .. }));
    }
}
