//! Configuration loader and path helpers.
//!
//! Uses Figment to merge `config.toml` + `config.<env>.toml` + `APP_*` env
//! vars. Provides helpers to expand `~` and `${VAR}` and to resolve relative
//! paths against a known base directory.

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::Deserialize;
use std::env;
use std::path::{Path, PathBuf};

/// Typed view of the `[portal]` table.
#[derive(Debug, Clone, Deserialize)]
pub struct PortalSettings {
    #[serde(default = "default_data_path")]
    pub data_path: String,
    #[serde(default = "default_state_path")]
    pub state_path: String,
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

fn default_data_path() -> String {
    "data.json".to_string()
}

fn default_state_path() -> String {
    "portal-state.json".to_string()
}

fn default_debounce_ms() -> u64 {
    300
}

impl Default for PortalSettings {
    fn default() -> Self {
        Self {
            data_path: default_data_path(),
            state_path: default_state_path(),
            debounce_ms: default_debounce_ms(),
        }
    }
}

impl PortalSettings {
    /// Reject values the session cannot run with.
    pub fn validate(&self) -> crate::error::Result<()> {
        use crate::error::Error;
        if self.data_path.trim().is_empty() {
            return Err(Error::InvalidConfig("portal.data_path is empty".to_string()));
        }
        if self.state_path.trim().is_empty() {
            return Err(Error::InvalidConfig("portal.state_path is empty".to_string()));
        }
        if self.debounce_ms == 0 {
            return Err(Error::InvalidConfig(
                "portal.debounce_ms must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

pub struct Config {
    figment: Figment,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());

        let mut figment = Figment::new().merge(Toml::file("config.toml"));
        match env_name.as_str() {
            "dev" | "development" => figment = figment.merge(Toml::file("config.dev.toml")),
            "prod" | "production" => figment = figment.merge(Toml::file("config.prod.toml")),
            "test" | "testing" => figment = figment.merge(Toml::file("config.test.toml")),
            _ => {}
        }
        figment = figment.merge(Env::prefixed("APP_"));

        Ok(Self { figment })
    }

    /// The `[portal]` table, falling back to defaults when absent.
    pub fn portal(&self) -> PortalSettings {
        self.figment.extract_inner("portal").unwrap_or_default()
    }
}

/// Expand a user-provided path string:
/// - Expands leading '~' to the user's home directory
/// - Expands ${VAR} and $VAR environment variables
/// - Returns a PathBuf without attempting to canonicalize
pub fn expand_path<S: AsRef<str>>(input: S) -> PathBuf {
    let s = input.as_ref();
    // Expand env vars first
    let expanded_env = shellexpand::env(s).unwrap_or(std::borrow::Cow::Borrowed(s));
    // Expand ~ at start
    let expanded = shellexpand::tilde(&expanded_env);
    PathBuf::from(expanded.as_ref())
}

/// Resolve a possibly relative path against a given base directory after expansion.
/// If `p` is absolute, it's returned as-is; otherwise `base.join(p)` is returned.
pub fn resolve_with_base<S: AsRef<str>>(base: &Path, p: S) -> PathBuf {
    let p = expand_path(p);
    if p.is_absolute() {
        p
    } else {
        base.join(p)
    }
}
