//! Playground settings, read from `Playground.toml`.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

pub const DEFAULT_MAX_PREVIEW_BYTES: usize = 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlaygroundConfig {
    /// Compare runs against the reference solution. Off, the playground is a
    /// plain sandbox and every run just renders the preview.
    pub grading_enabled: bool,
    pub max_preview_bytes: usize,
}

impl Default for PlaygroundConfig {
    fn default() -> Self {
        Self {
            grading_enabled: true,
            max_preview_bytes: DEFAULT_MAX_PREVIEW_BYTES,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Read { path: PathBuf, source: std::io::Error },
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Read { path, source } => {
                write!(f, "failed to read {}: {source}", path.display())
            }
            ConfigError::Parse(error) => write!(f, "invalid playground config: {error}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Read { source, .. } => Some(source),
            ConfigError::Parse(error) => Some(error),
        }
    }
}

impl PlaygroundConfig {
    pub fn ungraded() -> Self {
        Self {
            grading_enabled: false,
            ..Self::default()
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::Parse)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let config = PlaygroundConfig::from_toml_str("").unwrap();
        assert_eq!(config, PlaygroundConfig::default());

        let config = PlaygroundConfig::from_toml_str("grading_enabled = false").unwrap();
        assert_eq!(config, PlaygroundConfig::ungraded());
    }

    #[test]
    fn reads_shipped_config() {
        let config = PlaygroundConfig::from_toml_str(include_str!("../../../Playground.toml")).unwrap();
        assert!(config.grading_enabled);
        assert_eq!(config.max_preview_bytes, DEFAULT_MAX_PREVIEW_BYTES);
    }

    #[test]
    fn rejects_unknown_keys_and_bad_types() {
        assert!(matches!(
            PlaygroundConfig::from_toml_str("grading = true"),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            PlaygroundConfig::from_toml_str("max_preview_bytes = \"big\""),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn load_reports_the_path() {
        let error = PlaygroundConfig::load(Path::new("/nonexistent/Playground.toml")).unwrap_err();
        assert!(error.to_string().contains("/nonexistent/Playground.toml"));
    }
}
