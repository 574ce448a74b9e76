//! Global configuration management
//!
//! Settings live in `~/.dfts/config.toml`, or wherever `DFTS_CONFIG` points.

use crate::anchor::verifier::RootMatch;
use crate::core::{
    error::{DftsError, Result},
    types::Network,
};
use directories::UserDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable overriding the configuration file location
pub const CONFIG_ENV_VAR: &str = "DFTS_CONFIG";

pub const DEFAULT_MAINNET_URL: &str = "https://blockstream.info/api";
pub const DEFAULT_TESTNET_URL: &str = "https://blockstream.info/testnet/api";
pub const DEFAULT_SIGNET_URL: &str = "https://mempool.space/signet/api";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_PROOFS_DIR: &str = "proofs";

/// Global configuration for dfts
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalConfig {
    pub network: NetworkConfig,
    pub explorer: ExplorerConfig,
    pub anchor: AnchorConfig,
    pub output: OutputConfig,
}

/// Which network commands use when none is given
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    pub default: Network,
}

/// Block explorer endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplorerConfig {
    pub mainnet_url: String,
    pub testnet_url: String,
    pub signet_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            mainnet_url: DEFAULT_MAINNET_URL.to_string(),
            testnet_url: DEFAULT_TESTNET_URL.to_string(),
            signet_url: DEFAULT_SIGNET_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ExplorerConfig {
    /// Esplora API base URL for `network`
    pub fn base_url(&self, network: Network) -> &str {
        match network {
            Network::Mainnet => &self.mainnet_url,
            Network::Testnet => &self.testnet_url,
            Network::Signet => &self.signet_url,
        }
    }
}

/// Anchor check settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnchorConfig {
    pub root_match: RootMatch,
}

/// Output locations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub proofs_dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            proofs_dir: PathBuf::from(DEFAULT_PROOFS_DIR),
        }
    }
}

/// Configuration key for getting and setting values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    NetworkDefault,
    ExplorerMainnetUrl,
    ExplorerTestnetUrl,
    ExplorerSignetUrl,
    ExplorerTimeoutSecs,
    AnchorRootMatch,
    OutputProofsDir,
}

impl ConfigKey {
    pub const ALL: [ConfigKey; 7] = [
        ConfigKey::NetworkDefault,
        ConfigKey::ExplorerMainnetUrl,
        ConfigKey::ExplorerTestnetUrl,
        ConfigKey::ExplorerSignetUrl,
        ConfigKey::ExplorerTimeoutSecs,
        ConfigKey::AnchorRootMatch,
        ConfigKey::OutputProofsDir,
    ];

    pub fn parse(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == key)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigKey::NetworkDefault => "network.default",
            ConfigKey::ExplorerMainnetUrl => "explorer.mainnet_url",
            ConfigKey::ExplorerTestnetUrl => "explorer.testnet_url",
            ConfigKey::ExplorerSignetUrl => "explorer.signet_url",
            ConfigKey::ExplorerTimeoutSecs => "explorer.timeout_secs",
            ConfigKey::AnchorRootMatch => "anchor.root_match",
            ConfigKey::OutputProofsDir => "output.proofs_dir",
        }
    }
}

impl GlobalConfig {
    /// Load global configuration from disk, falling back to defaults when the
    /// file does not exist
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&config_path)?;
        toml::from_str(&content)
            .map_err(|e| DftsError::configuration(format!("Failed to parse config: {}", e)))
    }

    /// Save global configuration to disk
    pub fn save(&self) -> Result<()> {
        let config_path = Self::get_config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| DftsError::configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(&config_path, content)?;
        Ok(())
    }

    /// Get the path to the global configuration file
    pub fn get_config_path() -> Result<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_ENV_VAR) {
            return Ok(PathBuf::from(path));
        }

        let user_dirs = UserDirs::new().ok_or(DftsError::HomeDirectoryNotFound)?;
        Ok(user_dirs.home_dir().join(".dfts").join("config.toml"))
    }

    /// Get a configuration value rendered as a string
    pub fn get(&self, key: ConfigKey) -> String {
        match key {
            ConfigKey::NetworkDefault => self.network.default.to_string(),
            ConfigKey::ExplorerMainnetUrl => self.explorer.mainnet_url.clone(),
            ConfigKey::ExplorerTestnetUrl => self.explorer.testnet_url.clone(),
            ConfigKey::ExplorerSignetUrl => self.explorer.signet_url.clone(),
            ConfigKey::ExplorerTimeoutSecs => self.explorer.timeout_secs.to_string(),
            ConfigKey::AnchorRootMatch => self.anchor.root_match.as_str().to_string(),
            ConfigKey::OutputProofsDir => self.output.proofs_dir.display().to_string(),
        }
    }

    /// Set a configuration value from its string form
    pub fn set(&mut self, key: ConfigKey, value: &str) -> Result<()> {
        let invalid = |reason: String| DftsError::configuration(format!("{}: {}", key.as_str(), reason));

        match key {
            ConfigKey::NetworkDefault => {
                self.network.default = value.parse().map_err(invalid)?;
            },
            ConfigKey::ExplorerMainnetUrl => self.explorer.mainnet_url = validate_url(value).map_err(invalid)?,
            ConfigKey::ExplorerTestnetUrl => self.explorer.testnet_url = validate_url(value).map_err(invalid)?,
            ConfigKey::ExplorerSignetUrl => self.explorer.signet_url = validate_url(value).map_err(invalid)?,
            ConfigKey::ExplorerTimeoutSecs => {
                let secs: u64 = value
                    .parse()
                    .map_err(|_| invalid("must be a whole number of seconds".to_string()))?;
                if secs == 0 {
                    return Err(invalid("must be greater than zero".to_string()));
                }
                self.explorer.timeout_secs = secs;
            },
            ConfigKey::AnchorRootMatch => {
                self.anchor.root_match = value.parse().map_err(invalid)?;
            },
            ConfigKey::OutputProofsDir => {
                if value.trim().is_empty() {
                    return Err(invalid("must not be empty".to_string()));
                }
                self.output.proofs_dir = PathBuf::from(value);
            },
        }
        Ok(())
    }

    /// Reset a configuration value to its default
    pub fn unset(&mut self, key: ConfigKey) {
        let defaults = Self::default();
        match key {
            ConfigKey::NetworkDefault => self.network = defaults.network,
            ConfigKey::ExplorerMainnetUrl => self.explorer.mainnet_url = defaults.explorer.mainnet_url,
            ConfigKey::ExplorerTestnetUrl => self.explorer.testnet_url = defaults.explorer.testnet_url,
            ConfigKey::ExplorerSignetUrl => self.explorer.signet_url = defaults.explorer.signet_url,
            ConfigKey::ExplorerTimeoutSecs => {
                self.explorer.timeout_secs = defaults.explorer.timeout_secs
            },
            ConfigKey::AnchorRootMatch => self.anchor = defaults.anchor,
            ConfigKey::OutputProofsDir => self.output = defaults.output,
        }
    }

    /// List all configuration values
    pub fn list(&self) -> Vec<(&'static str, String)> {
        ConfigKey::ALL
            .into_iter()
            .map(|key| (key.as_str(), self.get(key)))
            .collect()
    }
}

fn validate_url(value: &str) -> std::result::Result<String, String> {
    let trimmed = value.trim();
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        Ok(trimmed.trim_end_matches('/').to_string())
    } else {
        Err(format!("'{}' is not an http(s) URL", value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_sections_use_defaults() {
        let config: GlobalConfig = toml::from_str("[network]\ndefault = \"signet\"\n").unwrap();
        assert_eq!(config.network.default, Network::Signet);
        assert_eq!(config.explorer, ExplorerConfig::default());
        assert_eq!(config.anchor.root_match, RootMatch::Substring);
    }

    #[test]
    fn test_toml_roundtrip() {
        let mut config = GlobalConfig::default();
        config.set(ConfigKey::AnchorRootMatch, "op_return").unwrap();
        config.set(ConfigKey::ExplorerTimeoutSecs, "30").unwrap();

        let text = toml::to_string_pretty(&config).unwrap();
        assert!(text.contains("root_match = \"op_return\""));
        let parsed: GlobalConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_set_validates_values() {
        let mut config = GlobalConfig::default();
        assert!(config.set(ConfigKey::NetworkDefault, "regtest").is_err());
        assert!(config.set(ConfigKey::ExplorerTimeoutSecs, "0").is_err());
        assert!(config.set(ConfigKey::ExplorerTestnetUrl, "ftp://x").is_err());

        config
            .set(ConfigKey::ExplorerTestnetUrl, "http://localhost:3002/")
            .unwrap();
        assert_eq!(config.explorer.base_url(Network::Testnet), "http://localhost:3002");
    }

    #[test]
    fn test_unset_restores_default() {
        let mut config = GlobalConfig::default();
        config.set(ConfigKey::NetworkDefault, "mainnet").unwrap();
        config.unset(ConfigKey::NetworkDefault);
        assert_eq!(config.network.default, Network::Testnet);
    }

    #[test]
    fn test_key_names_roundtrip() {
        for key in ConfigKey::ALL {
            assert_eq!(ConfigKey::parse(key.as_str()), Some(key));
        }
        assert_eq!(ConfigKey::parse("user.name"), None);
    }
}
