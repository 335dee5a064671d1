//! External module discovery configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Where and how external hook modules are discovered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleConfig {
    /// Whether to scan for modules at startup.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Directory containing module shared libraries.
    #[serde(default = "default_directory")]
    pub directory: String,
    /// File name suffix a candidate must end with.
    #[serde(default = "default_extension")]
    pub extension: String,
}

impl ModuleConfig {
    /// Returns the module directory as a path.
    pub fn directory_path(&self) -> PathBuf {
        PathBuf::from(&self.directory)
    }
}

impl Default for ModuleConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            directory: default_directory(),
            extension: default_extension(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_directory() -> String {
    "./modules".to_string()
}

fn default_extension() -> String {
    ".so".to_string()
}
