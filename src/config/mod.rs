//! Global configuration management for dfts
//!
//! This module stores user settings (default network, explorer endpoints,
//! anchor matching policy, output locations) in a TOML file.

pub mod global_config;

// Re-export commonly used items
pub use global_config::{
    AnchorConfig, ConfigKey, ExplorerConfig, GlobalConfig, NetworkConfig, OutputConfig,
    CONFIG_ENV_VAR,
};
