//! CLI-owned configuration: TOML profiles and credential resolution.
//!
//! Core never sees these types -- it receives a pre-built `FabricConfig`.
//! Credential chain for passwords: `--password`/`APIC_PASSWORD` flag, then
//! the profile's `password_env`, then the system keyring, then plaintext
//! in the config file.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use apic_core::{FabricConfig, TlsVerification};

use crate::cli::GlobalOpts;
use crate::error::CliError;

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Default profile name (used when --profile is not specified).
    pub default_profile: Option<String>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named controller profiles.
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

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default)]
    pub insecure: bool,

    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            insecure: false,
            timeout: default_timeout(),
        }
    }
}

fn default_timeout() -> u64 {
    30
}

/// A named controller profile.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Profile {
    /// APIC base URL (e.g., "https://apic1").
    pub host: String,

    /// APIC username.
    pub username: Option<String>,

    /// Password (plaintext -- prefer keyring or env var).
    pub password: Option<String>,

    /// Environment variable name containing the password.
    pub password_env: Option<String>,

    /// Path to custom CA certificate.
    pub ca_cert: Option<PathBuf>,

    /// Override insecure TLS setting.
    pub insecure: Option<bool>,

    /// Override timeout.
    pub timeout: Option<u64>,
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "apicctl", "apicctl").map_or_else(
        || {
            let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
            p.push(".config");
            p.push("apicctl");
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

// ── Config loading / saving ─────────────────────────────────────────

/// Load the full Config from file + environment.
pub fn load_config() -> Result<Config, CliError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(config_path()))
        .merge(Env::prefixed("APIC_").split("_"));

    figment.extract().map_err(|e| CliError::Config {
        message: format!("config loading failed: {e}"),
    })
}

/// Load config, returning a default if the file doesn't exist or is broken.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), CliError> {
    let path = config_path();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg).map_err(|e| CliError::Config {
        message: format!("failed to serialize config: {e}"),
    })?;
    std::fs::write(&path, toml_str)?;
    Ok(())
}

// ── Profile resolution ──────────────────────────────────────────────

/// The active profile name: --profile flag, then config default, then "default".
pub fn active_profile_name(global: &GlobalOpts, cfg: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| cfg.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Resolve the password from the credential chain (flag step already applied).
fn resolve_password(profile: &Profile, profile_name: &str) -> Result<SecretString, CliError> {
    // 1. Profile's password_env → env var lookup
    if let Some(ref env_name) = profile.password_env {
        if let Ok(val) = std::env::var(env_name) {
            return Ok(SecretString::from(val));
        }
    }

    // 2. System keyring
    if let Ok(entry) = keyring::Entry::new("apicctl", &format!("{profile_name}/password")) {
        if let Ok(secret) = entry.get_password() {
            return Ok(SecretString::from(secret));
        }
    }

    // 3. Plaintext in config
    if let Some(ref password) = profile.password {
        return Ok(SecretString::from(password.clone()));
    }

    Err(CliError::NoCredentials {
        profile: profile_name.into(),
    })
}

/// Build a `FabricConfig` from the config file, profile, and CLI overrides.
pub fn resolve_fabric_config(global: &GlobalOpts) -> Result<FabricConfig, CliError> {
    let cfg = load_config_or_default();
    let profile_name = active_profile_name(global, &cfg);
    let profile = cfg.profiles.get(&profile_name);

    let host = global
        .host
        .clone()
        .or_else(|| profile.map(|p| p.host.clone()))
        .filter(|h| !h.is_empty())
        .ok_or_else(|| CliError::NoConfig {
            path: config_path().display().to_string(),
        })?;

    let url: url::Url = host.parse().map_err(|_| CliError::Validation {
        message: format!("invalid controller URL: {host}"),
    })?;

    let username = global
        .username
        .clone()
        .or_else(|| profile.and_then(|p| p.username.clone()))
        .ok_or_else(|| CliError::NoCredentials {
            profile: profile_name.clone(),
        })?;

    let password = match global.password {
        Some(ref password) => SecretString::from(password.clone()),
        None => {
            let profile = profile.ok_or_else(|| CliError::NoCredentials {
                profile: profile_name.clone(),
            })?;
            resolve_password(profile, &profile_name)?
        }
    };

    let insecure = global.insecure
        || profile
            .and_then(|p| p.insecure)
            .unwrap_or(cfg.defaults.insecure);

    let ca_cert = global
        .ca_cert
        .clone()
        .or_else(|| profile.and_then(|p| p.ca_cert.clone()));

    let tls = if insecure {
        TlsVerification::DangerAcceptInvalid
    } else if let Some(path) = ca_cert {
        TlsVerification::CustomCa(path)
    } else {
        TlsVerification::SystemDefaults
    };

    let timeout = resolve_timeout(global.timeout, profile, &cfg.defaults);

    Ok(FabricConfig {
        url,
        username,
        password,
        tls,
        timeout: Duration::from_secs(timeout),
    })
}

/// Timeout precedence follows the rest of the resolver: flag, then
/// profile, then global defaults.
fn resolve_timeout(flag: Option<u64>, profile: Option<&Profile>, defaults: &Defaults) -> u64 {
    flag.or_else(|| profile.and_then(|p| p.timeout))
        .unwrap_or(defaults.timeout)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile_with_timeout(timeout: Option<u64>) -> Profile {
        Profile {
            host: "https://apic1".into(),
            timeout,
            ..Profile::default()
        }
    }

    #[test]
    fn timeout_flag_overrides_profile() {
        let profile = profile_with_timeout(Some(120));
        let resolved = resolve_timeout(Some(5), Some(&profile), &Defaults::default());
        assert_eq!(resolved, 5);
    }

    #[test]
    fn profile_timeout_applies_without_flag() {
        let profile = profile_with_timeout(Some(120));
        let resolved = resolve_timeout(None, Some(&profile), &Defaults::default());
        assert_eq!(resolved, 120);
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let profile = profile_with_timeout(None);
        assert_eq!(resolve_timeout(None, Some(&profile), &Defaults::default()), 30);
        assert_eq!(resolve_timeout(None, None, &Defaults::default()), 30);
    }
}
