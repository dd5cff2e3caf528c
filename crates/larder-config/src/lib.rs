//! Configuration for larder consumers.
//!
//! TOML profiles, API-key resolution (env + keyring + plaintext), and
//! translation to `larder_core::CoordinatorConfig`.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use larder_core::{CoordinatorConfig, EditFocusPolicy, FocusAfterUpdate, GatewayConfig};

const KEYRING_SERVICE: &str = "larder";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("profile '{profile}' is not defined")]
    UnknownProfile { profile: String },

    #[error("profile '{profile}' reads its API key from ${env_var}, which is not set")]
    NoCredentials { profile: String, env_var: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Profile used when none is named.
    pub default_profile: Option<String>,

    #[serde(default)]
    pub defaults: Defaults,

    /// Named server profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

impl Config {
    /// Look up `name`, or the default profile when `name` is `None`.
    pub fn profile(&self, name: Option<&str>) -> Result<(&str, &Profile), ConfigError> {
        let name = name
            .or(self.default_profile.as_deref())
            .unwrap_or("default");
        self.profiles
            .get_key_value(name)
            .map(|(k, v)| (k.as_str(), v))
            .ok_or_else(|| ConfigError::UnknownProfile {
                profile: name.into(),
            })
    }
}

/// Settings applied to every profile unless the profile overrides them.
#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    /// Request timeout in seconds. Unset waits indefinitely.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,

    #[serde(default)]
    pub focus_after_update: FocusAfterUpdate,

    #[serde(default = "default_true")]
    pub clear_focus_on_remove: bool,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            timeout: None,
            focus_after_update: FocusAfterUpdate::default(),
            clear_focus_on_remove: true,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_resource() -> String {
    larder_core::config::DEFAULT_RESOURCE.into()
}

/// A named item server.
#[derive(Debug, Deserialize, Serialize)]
pub struct Profile {
    /// Server base URL (e.g., "http://localhost:3333").
    pub server: String,

    /// Collection name under the base URL.
    #[serde(default = "default_resource")]
    pub resource: String,

    /// API key (plaintext, prefer keyring or env var).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Environment variable name containing the API key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key_env: Option<String>,

    /// Override timeout.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub focus_after_update: Option<FocusAfterUpdate>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clear_focus_on_remove: Option<bool>,
}

impl Profile {
    pub fn new(server: impl Into<String>) -> Self {
        Self {
            server: server.into(),
            resource: default_resource(),
            api_key: None,
            api_key_env: None,
            timeout: None,
            focus_after_update: None,
            clear_focus_on_remove: None,
        }
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("dev", "larder", "larder").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("larder");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load from `path` + environment. A missing file yields the defaults.
///
/// Environment keys use `__` as the nesting separator, e.g.
/// `LARDER_PROFILES__HOME__SERVER`.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("LARDER_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    save_config_to(cfg, &config_path())
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Credential resolution ───────────────────────────────────────────

/// Resolve the API key for a profile, if it has one.
///
/// Order: the env var named by `api_key_env`, then the system keyring,
/// then the plaintext `api_key`. A profile that names an env var which
/// is unset, with no fallback, is an error rather than "no key".
pub fn resolve_api_key(
    profile: &Profile,
    profile_name: &str,
) -> Result<Option<SecretString>, ConfigError> {
    // 1. Profile's api_key_env → env var lookup
    if let Some(ref env_name) = profile.api_key_env {
        if let Ok(val) = std::env::var(env_name) {
            return Ok(Some(SecretString::from(val)));
        }
    }

    // 2. System keyring
    if let Ok(entry) = keyring::Entry::new(KEYRING_SERVICE, &format!("{profile_name}/api-key")) {
        if let Ok(secret) = entry.get_password() {
            return Ok(Some(SecretString::from(secret)));
        }
    }

    // 3. Plaintext in config
    if let Some(ref key) = profile.api_key {
        return Ok(Some(SecretString::from(key.clone())));
    }

    match profile.api_key_env {
        Some(ref env_var) => Err(ConfigError::NoCredentials {
            profile: profile_name.into(),
            env_var: env_var.clone(),
        }),
        None => Ok(None),
    }
}

/// Store an API key for `profile_name` in the system keyring.
pub fn store_api_key(profile_name: &str, key: &str) -> Result<(), ConfigError> {
    keyring::Entry::new(KEYRING_SERVICE, &format!("{profile_name}/api-key"))
        .and_then(|entry| entry.set_password(key))
        .map_err(|e| ConfigError::Validation {
            field: "api_key".into(),
            reason: format!("keyring unavailable: {e}"),
        })
}

// ── Translation to the core config ──────────────────────────────────

/// Build a `CoordinatorConfig` from a profile, with `defaults` filling
/// whatever the profile leaves unset.
pub fn profile_to_coordinator_config(
    profile: &Profile,
    profile_name: &str,
    defaults: &Defaults,
) -> Result<CoordinatorConfig, ConfigError> {
    let base_url: url::Url = profile
        .server
        .parse()
        .map_err(|_| ConfigError::Validation {
            field: "server".into(),
            reason: format!("invalid URL: {}", profile.server),
        })?;

    let resource = profile.resource.trim_matches('/');
    if resource.is_empty() {
        return Err(ConfigError::Validation {
            field: "resource".into(),
            reason: "must not be empty".into(),
        });
    }

    let gateway = GatewayConfig {
        base_url,
        resource: resource.into(),
        api_key: resolve_api_key(profile, profile_name)?,
        timeout: profile.timeout.or(defaults.timeout).map(Duration::from_secs),
    };

    let focus = EditFocusPolicy {
        after_update: profile
            .focus_after_update
            .unwrap_or(defaults.focus_after_update),
        clear_on_remove: profile
            .clear_focus_on_remove
            .unwrap_or(defaults.clear_focus_on_remove),
    };

    Ok(CoordinatorConfig { gateway, focus })
}

/// Build the coordinator config for `profile_name`
/// (or the default profile).
pub fn coordinator_config_for(
    config: &Config,
    profile_name: Option<&str>,
) -> Result<CoordinatorConfig, ConfigError> {
    let (name, profile) = config.profile(profile_name)?;
    profile_to_coordinator_config(profile, name, &config.defaults)
}
