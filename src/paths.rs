//! Centralized path definitions for herbtrace
//!
//! This module provides a single source of truth for all filesystem paths used by herbtrace.
//!
//! ## Storage Layout
//!
//! ### Per-Project (working directory)
//!
//! ```text
//! project/
//! ├── herbtrace.toml            # Project config (zones, QR base URL, server)
//! └── .herbtrace/
//!     └── ledger.json           # JSON ledger used by the CLI
//! ```
//!
//! ### Global (User-Level)
//!
//! ```text
//! ~/.config/herbtrace/
//! └── config.toml               # Fallback config
//! ```

use std::path::PathBuf;

// =============================================================================
// Project-level paths
// =============================================================================

/// Directory name for local herbtrace state
pub const HERBTRACE_DIR: &str = ".herbtrace";

/// Project configuration filename
pub const HERBTRACE_TOML: &str = "herbtrace.toml";

/// Ledger filename inside the state directory
const LEDGER_FILE: &str = "ledger.json";

/// Environment variable naming an explicit config file
pub const CONFIG_ENV: &str = "HERBTRACE_CONFIG";

/// Get path to `herbtrace.toml` in the working directory.
#[must_use]
pub fn project_config() -> PathBuf {
    PathBuf::from(HERBTRACE_TOML)
}

/// Get path to the `.herbtrace/` state directory.
#[must_use]
pub fn herbtrace_dir() -> PathBuf {
    PathBuf::from(HERBTRACE_DIR)
}

/// Get path to `.herbtrace/ledger.json`.
///
/// Default location of the JSON ledger used between CLI invocations.
#[must_use]
pub fn default_ledger() -> PathBuf {
    herbtrace_dir().join(LEDGER_FILE)
}

// =============================================================================
// Global paths (user-level)
// =============================================================================

/// Global config directory name
const GLOBAL_DIR: &str = "herbtrace";

/// Global config filename
const GLOBAL_CONFIG_FILE: &str = "config.toml";

/// Get the global herbtrace directory.
///
/// Returns `~/.config/herbtrace/` (or the platform equivalent).
#[must_use]
pub fn global_config_dir() -> PathBuf {
    dirs::config_dir()
        .or_else(|| dirs::home_dir().map(|h| h.join(".config")))
        .unwrap_or_else(|| PathBuf::from("~/.config"))
        .join(GLOBAL_DIR)
}

/// Get the global config file path.
#[must_use]
pub fn global_config() -> PathBuf {
    global_config_dir().join(GLOBAL_CONFIG_FILE)
}
