use std::env;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

/// Read a profiled env var: tries {PROFILE}_{KEY} first, falls back to {KEY}.
fn profiled_env_opt(profile: &str, key: &str) -> Option<String> {
    if !profile.is_empty() {
        let prefixed = format!("{}_{}", profile, key);
        if let Some(v) = env_opt(&prefixed) {
            return Some(v);
        }
    }
    env_opt(key)
}

fn profiled_env_or(profile: &str, key: &str, default: &str) -> String {
    profiled_env_opt(profile, key).unwrap_or_else(|| default.to_string())
}

fn profiled_env_u32(profile: &str, key: &str, default: u32) -> u32 {
    profiled_env_opt(profile, key)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn profiled_env_u64(profile: &str, key: &str, default: u64) -> u64 {
    profiled_env_opt(profile, key)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

// ── Top-level config ──────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Active profile name (empty = default).
    pub profile: String,
    pub netbox: NetboxConfig,
    pub rules: RulesConfig,
}

impl Config {
    /// Build config from environment variables (call `load_dotenv()` first).
    /// Profile is read from `NETCHECK_PROFILE` env var. When set (e.g. `PROD`),
    /// every key is first looked up as `{PROFILE}_{KEY}`, falling back to `{KEY}`.
    pub fn from_env() -> Self {
        let profile = env_or("NETCHECK_PROFILE", "").to_uppercase();
        Self::for_profile(&profile)
    }

    /// Build config for a specific named profile (empty string = default).
    pub fn for_profile(profile: &str) -> Self {
        let p = profile.to_uppercase();
        let p = p.as_str();
        Self {
            profile: p.to_string(),
            netbox: NetboxConfig::from_env_profiled(p),
            rules: RulesConfig::from_env_profiled(p),
        }
    }

    pub fn profile_label(&self) -> &str {
        if self.profile.is_empty() { "default" } else { &self.profile }
    }

    /// Print a redacted summary for startup logs.
    pub fn log_summary(&self) {
        tracing::info!("Config loaded (profile: {}):", self.profile_label());
        tracing::info!(
            "  netbox:  url={}, token={}, timeout={}s, page_size={}",
            self.netbox.url.as_deref().unwrap_or("(none)"),
            if self.netbox.token.is_some() { "(set)" } else { "(none)" },
            self.netbox.timeout_secs,
            self.netbox.page_size
        );
        tracing::info!("  rules:   path={}", self.rules.path.display());
    }
}

// ── NetBox ────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetboxConfig {
    /// API base URL without trailing slash, e.g. `https://netbox.example.com`.
    pub url: Option<String>,
    pub token: Option<String>,
    pub timeout_secs: u64,
    /// Value of the `limit` query parameter on list endpoints.
    pub page_size: u32,
}

impl Default for NetboxConfig {
    fn default() -> Self {
        Self {
            url: None,
            token: None,
            timeout_secs: 15,
            page_size: 100,
        }
    }
}

impl NetboxConfig {
    fn from_env_profiled(p: &str) -> Self {
        let defaults = Self::default();
        Self {
            url: profiled_env_opt(p, "NETBOX_URL").map(|u| u.trim_end_matches('/').to_string()),
            token: profiled_env_opt(p, "NETBOX_TOKEN"),
            timeout_secs: profiled_env_u64(p, "NETBOX_TIMEOUT_SECS", defaults.timeout_secs),
            page_size: profiled_env_u32(p, "NETBOX_PAGE_SIZE", defaults.page_size),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Base URL, required before any request can be made.
    pub fn base_url(&self) -> Result<&str, ConfigError> {
        self.url
            .as_deref()
            .map(|u| u.trim_end_matches('/'))
            .filter(|u| !u.is_empty())
            .ok_or_else(|| ConfigError::Missing("NETBOX_URL".to_string()))
    }

    /// Check the settings a fetch depends on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = self.base_url()?;
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::Invalid {
                key: "NETBOX_URL".to_string(),
                value: url.to_string(),
            });
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                key: "NETBOX_TIMEOUT_SECS".to_string(),
                value: self.timeout_secs.to_string(),
            });
        }
        if self.page_size == 0 {
            return Err(ConfigError::Invalid {
                key: "NETBOX_PAGE_SIZE".to_string(),
                value: self.page_size.to_string(),
            });
        }
        Ok(())
    }
}

// ── Rules ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RulesConfig {
    pub path: PathBuf,
}

impl RulesConfig {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            path: PathBuf::from(profiled_env_or(p, "NETCHECK_RULES", "compliance-rules.yaml")),
        }
    }
}
