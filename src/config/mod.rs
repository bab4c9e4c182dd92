//! Configuration module - engine timing and dispatch options
//!
//! This module provides functionality for:
//! - Loading configuration from ~/.popask/config.json
//! - Default values for all settings
//! - Type definitions for config structures
//!
//! # Module Structure
//!
//! - `defaults` - All default constant values
//! - `types` - Configuration struct definitions
//! - `loader` - File system loading and parsing

mod defaults;
mod loader;
mod types;

pub use defaults::*;

pub use types::{Config, DispatchConfig, HookConfig, NetworkConfig, SelectionConfig};

pub use loader::{default_config_path, load_config, load_config_from};

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
