//! Configuration management
//!
//! Config is read from, in priority order:
//!
//! 1. The file named by `HERBTRACE_CONFIG`
//! 2. `herbtrace.toml` in the working directory
//! 3. `~/.config/herbtrace/config.toml`
//! 4. Built-in defaults
//!
//! Every section and field is optional; missing values fall back to defaults.
//!
//! ```toml
//! [qr]
//! base_url = "https://ayur-trace.com"
//!
//! [server]
//! port = 8080
//!
//! [[compliance.zones]]
//! name = "Kerala Approved Zone"
//! lat = 10.8505
//! lng = 76.2711
//! radius = 200000
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::models::{ApprovedZone, default_zones};
use crate::core::services::{DEFAULT_VERIFY_BASE_URL, LedgerSettings};
use crate::paths;

/// herbtrace configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Compliance rules
    #[serde(default)]
    pub compliance: ComplianceConfig,
    /// QR payload settings
    #[serde(default)]
    pub qr: QrConfig,
    /// Local web server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Ledger storage settings
    #[serde(default)]
    pub ledger: LedgerConfig,
}

/// Compliance rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceConfig {
    /// Approved harvest zones
    #[serde(default = "default_zones")]
    pub zones: Vec<ApprovedZone>,
}

impl Default for ComplianceConfig {
    fn default() -> Self {
        Self {
            zones: default_zones(),
        }
    }
}

/// QR payload settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QrConfig {
    /// Base URL of verification links
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    DEFAULT_VERIFY_BASE_URL.to_string()
}

impl Default for QrConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

/// Local web server settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address
    #[serde(default = "default_host")]
    pub host: String,
    /// Port
    #[serde(default = "default_port")]
    pub port: u16,
    /// Seed the in-memory ledger with the demo batch on start
    #[serde(default = "default_seed_demo")]
    pub seed_demo: bool,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

const fn default_port() -> u16 {
    8080
}

const fn default_seed_demo() -> bool {
    true
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            seed_demo: default_seed_demo(),
        }
    }
}

/// Ledger storage settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// Path of the JSON ledger used by the CLI
    #[serde(default = "default_ledger_path")]
    pub path: PathBuf,
}

fn default_ledger_path() -> PathBuf {
    paths::default_ledger()
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            path: default_ledger_path(),
        }
    }
}

impl Config {
    /// Parse config from TOML text
    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load config from a specific file
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read config {}: {e}", path.display()))?;
        Self::from_toml_str(&content)
            .map_err(|e| anyhow::anyhow!("Invalid config {}: {e}", path.display()))
    }

    /// Load config from the first source that exists, or defaults
    pub fn load() -> anyhow::Result<Self> {
        match Self::source_path() {
            Some(path) => {
                log::debug!("Loading config from {}", path.display());
                Self::load_from(&path)
            },
            None => Ok(Self::default()),
        }
    }

    /// The config file that [`Config::load`] would read
    #[must_use]
    pub fn source_path() -> Option<PathBuf> {
        if let Ok(explicit) = std::env::var(paths::CONFIG_ENV) {
            return Some(PathBuf::from(explicit));
        }
        [paths::project_config(), paths::global_config()].into_iter().find(|p| p.exists())
    }

    /// Save config to a file
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Reject zones with non-finite centers or non-positive radii
    pub fn validate(&self) -> anyhow::Result<()> {
        for zone in &self.compliance.zones {
            zone.center()
                .validate()
                .map_err(|e| anyhow::anyhow!("Zone '{}': {e}", zone.name))?;
            if !zone.radius.is_finite() || zone.radius <= 0.0 {
                anyhow::bail!("Zone '{}': radius must be positive", zone.name);
            }
        }
        Ok(())
    }

    /// Settings for the ledger service; an empty zone list means the defaults
    #[must_use]
    pub fn ledger_settings(&self) -> LedgerSettings {
        let zones = if self.compliance.zones.is_empty() {
            default_zones()
        } else {
            self.compliance.zones.clone()
        };
        LedgerSettings {
            zones,
            verify_base_url: self.qr.base_url.clone(),
        }
    }
}
